//! Конвейер трансформаций: сжатие, затем шифрование.
//!
//! - кодирование: `pack -> compress -> encryptor`;
//! - декодирование: `decryptor -> decompress -> unpack`.

pub mod compression;
pub mod crypto;

use std::sync::Arc;

use bytes::Bytes;

pub use compression::{
    compress, decompress, decompress_with_limit, should_compress, DEFAULT_COMPRESSION_THRESHOLD,
    FLAG_DEFLATE, FLAG_RAW, MAX_DECOMPRESSED_SIZE,
};
pub use crypto::AesGcmCipher;

use crate::{MinDataResult, Options};

/// Функция шифрования или расшифровки буфера.
///
/// Ошибки функции возвращаются вызывающему коду без изменений.
pub type CipherFn = Arc<dyn Fn(&[u8]) -> MinDataResult<Vec<u8>> + Send + Sync>;

/// Применяет сжатие и (если задано) шифрование к упакованным данным.
pub fn apply(
    packed: &[u8],
    opts: &Options,
) -> MinDataResult<Vec<u8>> {
    let compressed = compress(packed, opts.effective_compression_threshold())?;
    match &opts.encryptor {
        Some(encrypt) => encrypt(&compressed),
        None => Ok(compressed),
    }
}

/// Обратная к [`apply`] операция.
pub fn reverse(
    data: &[u8],
    opts: &Options,
) -> MinDataResult<Bytes> {
    let plain = match &opts.decryptor {
        Some(decrypt) => decompress(&decrypt(data)?)?,
        None => decompress(data)?,
    };
    Ok(Bytes::from(plain))
}
