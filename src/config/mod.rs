//! Настройки процесса, загружаемые из окружения.

pub mod settings;

pub use settings::{Settings, DEFAULT_APPROACH, DEFAULT_LOG_LEVEL, ENV_PREFIX};
