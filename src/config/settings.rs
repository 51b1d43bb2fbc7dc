use ::config::{Config, Environment};
use serde::{Deserialize, Serialize};

use crate::{
    registry::get_approach, transform::DEFAULT_COMPRESSION_THRESHOLD, MinDataError,
    MinDataResult, Options,
};

/// Префикс переменных окружения: `MINDATA_COMPRESSION_THRESHOLD`,
/// `MINDATA_APPROACH`, `MINDATA_AES_KEY_HEX`, `MINDATA_LOG_LEVEL`.
pub const ENV_PREFIX: &str = "MINDATA";

/// Имя подхода по умолчанию.
pub const DEFAULT_APPROACH: &str = "MD1";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Настройки сериализации процесса.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Порог сжатия в байтах; отрицательное значение отключает сжатие.
    pub compression_threshold: i64,
    /// Имя подхода из реестра.
    pub approach: String,
    /// Ключ AES-GCM в hex (32, 48 или 64 символа).
    pub aes_key_hex: Option<String>,
    pub log_level: String,
}

impl Settings {
    /// Загружает настройки из переменных окружения с префиксом `MINDATA_`.
    pub fn load() -> MinDataResult<Self> {
        let cfg = Config::builder()
            // значения по умолчанию
            .set_default("compression_threshold", DEFAULT_COMPRESSION_THRESHOLD)
            .and_then(|b| b.set_default("approach", DEFAULT_APPROACH))
            .and_then(|b| b.set_default("log_level", DEFAULT_LOG_LEVEL))
            .map_err(config_error)?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(config_error)?;

        cfg.try_deserialize().map_err(config_error)
    }

    /// Ключ AES-GCM в байтах, если он задан.
    pub fn aes_key(&self) -> MinDataResult<Option<Vec<u8>>> {
        self.aes_key_hex
            .as_deref()
            .map(|h| {
                hex::decode(h.trim())
                    .map_err(|e| MinDataError::Config(format!("aes_key_hex: {e}")))
            })
            .transpose()
    }

    /// Собирает [`Options`]: подход ищется в глобальном реестре, ключ (если
    /// есть) подключает AES-GCM.
    pub fn to_options(&self) -> MinDataResult<Options> {
        let approach = get_approach(&self.approach)?;
        let opts = Options::new()
            .with_approach(approach)
            .with_compression_threshold(self.compression_threshold);
        match self.aes_key()? {
            Some(key) => opts.with_aes_gcm(&key),
            None => Ok(opts),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compression_threshold: DEFAULT_COMPRESSION_THRESHOLD,
            approach: DEFAULT_APPROACH.to_string(),
            aes_key_hex: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn config_error(e: ::config::ConfigError) -> MinDataError {
    MinDataError::Config(e.to_string())
}
