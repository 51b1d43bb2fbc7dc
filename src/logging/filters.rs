use tracing_subscriber::EnvFilter;

/// Строит фильтр уровня логирования.
///
/// `RUST_LOG`, если задан, имеет приоритет над `level`. Некорректная
/// директива заменяется на `info`.
pub fn build_filter(level: &str) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => match EnvFilter::try_new(level) {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!("Invalid log filter directive '{level}': {e}; falling back to 'info'");
                EnvFilter::new("info")
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_level_is_used_without_rust_log() {
        env::remove_var("RUST_LOG");
        let filter = build_filter("debug");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    #[serial]
    fn test_rust_log_takes_priority() {
        env::set_var("RUST_LOG", "mindata=trace");
        let filter = build_filter("warn");
        env::remove_var("RUST_LOG");
        assert_eq!(filter.to_string(), "mindata=trace");
    }

    #[test]
    #[serial]
    fn test_invalid_directive_falls_back() {
        env::remove_var("RUST_LOG");
        let filter = build_filter("mindata=notalevel");
        assert_eq!(filter.to_string(), "info");
    }
}
