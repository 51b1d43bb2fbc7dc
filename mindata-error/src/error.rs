use std::{any::Any, io};

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Единая ошибка сериализации MinData.
///
/// Ошибки кодека, конвейера трансформаций (сжатие и шифрование), фреймера и
/// реестра подходов собраны в одном перечислении: вызывающему коду нужен
/// один тип для `?` на всём пути `to_bytes` / `from_bytes`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MinDataError {
    // ==== Кодирование ====
    #[error("Type of argument is not serialisable: {kind}")]
    TypeNotSerialisable { kind: &'static str },

    #[error("Nil pointer cannot be serialised")]
    NilPointer,

    #[error("Duration does not fit into i64 nanoseconds")]
    DurationOutOfRange,

    #[error("Time zone offset of {seconds}s cannot be serialised")]
    InvalidTimeOffset { seconds: i32 },

    // ==== Декодирование ====
    #[error("No data provided for deserialisation")]
    NoDataToDeserialise,

    #[error("Invalid serialisation approach provided")]
    InvalidApproach,

    #[error("Type specified within the data is not deserialisable (tag {tag})")]
    TypeNotDeserialisable { tag: u8 },

    #[error("Unexpected deserialisation failure - possible corrupted data provided: {reason}")]
    UnexpectedDeserialisationFailure { reason: String },

    #[error("Invalid multi-value data: {reason}")]
    MalformedFrame { reason: String },

    // ==== Трансформации ====
    #[error("Unknown transform flag: {0}")]
    UnknownTransformFlag(u8),

    #[error("Compression failed: {0}")]
    Compression(#[source] io::Error),

    #[error("Decompression failed: {0}")]
    Decompression(#[source] io::Error),

    #[error("Data provided for decryption is too short: {len} < {required}")]
    InvalidDecryptionData { len: usize, required: usize },

    #[error("Invalid AES key length: {0} (expected 16, 24 or 32)")]
    InvalidKeyLength(usize),

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Message authentication failed")]
    AuthenticationFailed,

    #[error("Cipher error: {0}")]
    Cipher(String),

    // ==== Реестр и конфигурация ====
    #[error("Specified approach name is not registered: {0}")]
    UnknownApproachName(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MinDataError {
    /// Ошибка повреждённого буфера с текстовой причиной.
    pub fn corrupted(reason: impl Into<String>) -> Self {
        Self::UnexpectedDeserialisationFailure {
            reason: reason.into(),
        }
    }

    /// Ошибка разбора кадра `to_bytes_many`.
    pub fn malformed_frame(reason: impl Into<String>) -> Self {
        Self::MalformedFrame {
            reason: reason.into(),
        }
    }
}

impl ErrorExt for MinDataError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::TypeNotSerialisable { .. } => StatusCode::TypeNotSerialisable,
            Self::NilPointer => StatusCode::NilPointer,
            Self::DurationOutOfRange | Self::InvalidTimeOffset { .. } => {
                StatusCode::ValueOutOfRange
            }
            Self::NoDataToDeserialise => StatusCode::NoData,
            Self::InvalidApproach => StatusCode::InvalidApproach,
            Self::TypeNotDeserialisable { .. } => StatusCode::UnknownTag,
            Self::UnexpectedDeserialisationFailure { .. } => StatusCode::CorruptedData,
            Self::MalformedFrame { .. } => StatusCode::InvalidFrame,
            Self::UnknownTransformFlag(_) => StatusCode::UnknownTransform,
            Self::Compression(_) => StatusCode::CompressionFailed,
            Self::Decompression(_) => StatusCode::DecompressionFailed,
            Self::InvalidDecryptionData { .. } => StatusCode::InvalidCiphertext,
            Self::InvalidKeyLength(_) => StatusCode::InvalidKey,
            Self::EncryptionFailed | Self::Cipher(_) => StatusCode::EncryptionFailed,
            Self::AuthenticationFailed => StatusCode::AuthFailed,
            Self::UnknownApproachName(_) => StatusCode::UnknownApproach,
            Self::Config(_) => StatusCode::ConfigError,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
