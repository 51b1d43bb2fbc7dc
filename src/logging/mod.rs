//! Инициализация логирования для бинарных целей.
//!
//! Библиотека только пишет события через `tracing`; подписчика
//! устанавливает приложение (например, `mindata-cli`).

mod filters;

pub use filters::build_filter;

/// Устанавливает глобальный fmt-подписчик с фильтром уровня.
///
/// `RUST_LOG` переопределяет `level`.
///
/// # Errors
/// Ошибка, если глобальный подписчик уже установлен.
pub fn init_logging(level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %level,
        "Logging initialized"
    );
    Ok(())
}
