//! Кодек для полей длины и количества.
//!
//! Все префиксы в фреймере имеют фиксированную ширину, поэтому смещения
//! вычисляются без разбора тегов.

use byteorder::{ByteOrder, LittleEndian};

use crate::{MinDataError, MinDataResult};

/// Ширина сериализованного `i64` в байтах.
pub const SIZE_OF_I64: usize = 8;

/// Сериализует `i64` в 8 байт little-endian.
pub fn to_bytes_i64(v: i64) -> [u8; SIZE_OF_I64] {
    v.to_le_bytes()
}

/// Десериализует `i64`, записанный [`to_bytes_i64`].
///
/// # Errors
/// `UnexpectedDeserialisationFailure`, если длина `data` не равна
/// [`SIZE_OF_I64`].
pub fn from_bytes_i64(data: &[u8]) -> MinDataResult<i64> {
    if data.len() != SIZE_OF_I64 {
        return Err(MinDataError::corrupted(format!(
            "int64 field must be {SIZE_OF_I64} bytes, got {}",
            data.len()
        )));
    }
    Ok(LittleEndian::read_i64(data))
}

/// Ширина сериализованного `i64` в байтах.
pub const fn size_of_i64() -> usize {
    SIZE_OF_I64
}
