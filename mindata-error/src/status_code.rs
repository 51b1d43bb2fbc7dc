use std::fmt;

use num_enum::TryFromPrimitive;
#[cfg(feature = "serde_repr")]
use serde_repr::{Deserialize_repr, Serialize_repr};
#[cfg(feature = "strum")]
use strum_macros::{AsRefStr, EnumIter};

/// Коды статуса для категоризации ошибок сериализации.
///
/// # Диапазоны:
/// - 0xxx: Успех
/// - 1xxx: Общие ошибки
/// - 2xxx: Ошибки кодирования (pack)
/// - 3xxx: Ошибки декодирования (unpack)
/// - 4xxx: Трансформации (сжатие / шифрование)
/// - 5xxx: Реестр подходов и конфигурация
///
/// # Реализация:
/// - `num_enum::TryFromPrimitive` даёт нативную реализацию `TryFrom<u32>`.
/// - опционально: `strum` для `AsRefStr`/`EnumIter` (feature = "strum").
/// - опционально: `serde_repr` для сериализации в виде числового значения
///   (feature = "serde_repr").
#[cfg_attr(feature = "strum", derive(AsRefStr, EnumIter))]
#[cfg_attr(feature = "serde_repr", derive(Serialize_repr, Deserialize_repr))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 0xxx: Успех ===
    Success = 0,

    // === 1xxx: Общие ошибки ===
    Unknown = 1000,
    Unexpected = 1001,
    Internal = 1002,
    InvalidArgs = 1003,

    // === 2xxx: Кодирование ===
    TypeNotSerialisable = 2000,
    NilPointer = 2001,
    ValueOutOfRange = 2002,

    // === 3xxx: Декодирование ===
    NoData = 3000,
    UnknownTag = 3001,
    CorruptedData = 3002,
    InvalidFrame = 3003,

    // === 4xxx: Трансформации ===
    UnknownTransform = 4000,
    CompressionFailed = 4001,
    DecompressionFailed = 4002,
    InvalidCiphertext = 4003,
    InvalidKey = 4004,
    EncryptionFailed = 4005,
    AuthFailed = 4006,

    // === 5xxx: Реестр и конфигурация ===
    InvalidApproach = 5000,
    UnknownApproach = 5001,
    ConfigError = 5002,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StatusCode {
    /// Числовое представление кода статуса.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Пытается получить вариант `StatusCode` из `u32`.
    ///
    /// Использует `TryFrom<u32>` из `num_enum`; возвращает `None`, если
    /// значение не соответствует ни одному варианту.
    pub fn from_u32(v: u32) -> Option<Self> {
        Self::try_from(v).ok()
    }

    /// Вернёт `true`, если переданный `code` означает успешный результат.
    pub fn is_success(code: u32) -> bool {
        Self::Success as u32 == code
    }

    /// Ошибка вызвана входными данными вызывающей стороны (значение,
    /// буфер, ключ, имя подхода), а не внутренним сбоем.
    pub fn is_client_error(&self) -> bool {
        (2000..=5999).contains(&self.code()) || matches!(self, Self::InvalidArgs)
    }

    /// Ошибка указывает на повреждённый или подменённый буфер.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::UnknownTag
                | Self::CorruptedData
                | Self::InvalidFrame
                | Self::UnknownTransform
                | Self::DecompressionFailed
                | Self::InvalidCiphertext
                | Self::AuthFailed
        )
    }

    /// Рекомендуемый уровень логирования для данного кода.
    pub fn log_level(&self) -> LogLevel {
        match self {
            Self::Success => LogLevel::Trace,
            Self::UnknownApproach | Self::NoData => LogLevel::Debug,
            Self::TypeNotSerialisable
            | Self::NilPointer
            | Self::ValueOutOfRange
            | Self::InvalidArgs
            | Self::InvalidApproach => LogLevel::Info,
            Self::AuthFailed | Self::Internal | Self::Unexpected => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для StatusCode
////////////////////////////////////////////////////////////////////////////////

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        // Если включён feature "strum", используем human-readable имя (AsRefStr).
        // Иначе — Debug-имя.
        #[cfg(feature = "strum")]
        {
            write!(f, "{} ({})", self.as_ref(), self.code())
        }
        #[cfg(not(feature = "strum"))]
        {
            write!(f, "{:?} ({})", self, self.code())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
