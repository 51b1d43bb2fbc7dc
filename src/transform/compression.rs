//! Условное DEFLATE-сжатие сериализованных данных.
//!
//! Первый байт результата всегда является флагом:
//! - [`FLAG_RAW`] — данные записаны как есть;
//! - [`FLAG_DEFLATE`] — данные сжаты raw DEFLATE.
//!
//! Флаг пишется даже тогда, когда сжатие отключено.

use std::io::{self, Read, Write};

use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};
use tracing::trace;

use crate::{MinDataError, MinDataResult};

/// Порог по умолчанию: буферы длиной до 25 байт не сжимаются, так как
/// затраты на DEFLATE для них выше выигрыша.
pub const DEFAULT_COMPRESSION_THRESHOLD: i64 = 25;

/// Предельный размер распакованных данных: 256 МиБ.
pub const MAX_DECOMPRESSED_SIZE: usize = 256 * 1024 * 1024;

/// Флаг несжатых данных.
pub const FLAG_RAW: u8 = 0;
/// Флаг данных, сжатых DEFLATE.
pub const FLAG_DEFLATE: u8 = 1;

/// Проверяет, нужно ли пытаться сжать буфер длины `len`.
///
/// Отрицательный порог отключает сжатие полностью.
pub fn should_compress(
    len: usize,
    threshold: i64,
) -> bool {
    match usize::try_from(threshold) {
        Ok(threshold) => len > threshold,
        Err(_) => false,
    }
}

/// Добавляет флаг и, если выгодно, сжимает данные.
///
/// Сжатый вариант выбирается только когда он строго короче исходного.
///
/// # Errors
/// `Compression`, если кодировщик DEFLATE вернул ошибку ввода-вывода.
pub fn compress(
    data: &[u8],
    threshold: i64,
) -> MinDataResult<Vec<u8>> {
    if should_compress(data.len(), threshold) {
        let deflated = deflate(data).map_err(MinDataError::Compression)?;
        if deflated.len() < data.len() {
            trace!(
                original = data.len(),
                compressed = deflated.len(),
                flag = FLAG_DEFLATE,
                "Compressed payload"
            );
            return Ok(with_flag(FLAG_DEFLATE, &deflated));
        }
        trace!(
            original = data.len(),
            compressed = deflated.len(),
            "DEFLATE output is not smaller, keeping raw payload"
        );
    } else {
        trace!(len = data.len(), threshold, "Payload below compression threshold");
    }
    Ok(with_flag(FLAG_RAW, data))
}

/// Снимает флаг и при необходимости распаковывает данные.
///
/// # Errors
/// - `UnexpectedDeserialisationFailure` для пустого буфера;
/// - `UnknownTransformFlag`, если флаг не 0 и не 1;
/// - `Decompression`, если поток DEFLATE повреждён или распаковывается
///   больше чем в [`MAX_DECOMPRESSED_SIZE`] байт.
pub fn decompress(data: &[u8]) -> MinDataResult<Vec<u8>> {
    decompress_with_limit(data, MAX_DECOMPRESSED_SIZE)
}

/// То же, что [`decompress`], но с явным пределом размера результата.
pub fn decompress_with_limit(
    data: &[u8],
    limit: usize,
) -> MinDataResult<Vec<u8>> {
    let Some((&flag, body)) = data.split_first() else {
        return Err(MinDataError::corrupted("missing compression flag"));
    };
    match flag {
        FLAG_RAW => Ok(body.to_vec()),
        FLAG_DEFLATE => inflate(body, limit).map_err(MinDataError::Decompression),
        other => Err(MinDataError::UnknownTransformFlag(other)),
    }
}

fn with_flag(
    flag: u8,
    body: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 1);
    out.push(flag);
    out.extend_from_slice(body);
    out
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::with_capacity(data.len()), Compression::best());
    encoder.write_all(data)?;
    encoder.finish()
}

fn inflate(
    data: &[u8],
    limit: usize,
) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len().saturating_mul(2).min(limit));
    // на байт больше предела, чтобы отличить ровно `limit` от переполнения
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    DeflateDecoder::new(data).take(cap).read_to_end(&mut out)?;
    if out.len() > limit {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("inflated payload exceeds {limit} bytes"),
        ));
    }
    Ok(out)
}
