//! Упаковка нескольких значений в один буфер.
//!
//! ```text
//! [count:8][len:8][item]...[len:8][item]
//! ```
//!
//! Все поля длины — `i64` little-endian (см. [`to_bytes_i64`]). Каждый
//! элемент упаковывается подходом независимо, а конвейер трансформаций
//! применяется один раз ко всему кадру.

use bytes::Bytes;

use crate::{
    codec::{from_bytes_i64, size_of_i64, to_bytes_i64},
    Approach, MinDataError, MinDataResult, Value,
};

/// Упаковывает значения в кадр.
///
/// # Errors
/// Первая ошибка `approach.pack` для любого элемента.
pub fn pack_many(
    approach: &dyn Approach,
    values: &[Value],
) -> MinDataResult<Vec<u8>> {
    let mut out = Vec::with_capacity(128);
    // длина среза не превышает isize::MAX
    out.extend_from_slice(&to_bytes_i64(values.len() as i64));

    for value in values {
        let item = approach.pack(value)?;
        out.extend_from_slice(&to_bytes_i64(item.len() as i64));
        out.extend_from_slice(&item);
    }
    Ok(out)
}

/// Разбирает кадр, созданный [`pack_many`].
///
/// Элементы передаются в `approach.unpack` как срезы `data` без
/// копирования.
///
/// # Errors
/// - `MalformedFrame`, если счётчик или длина отрицательны, не помещаются в
///   оставшиеся байты, или после последнего элемента остались байты;
/// - ошибки `approach.unpack` для элементов без изменений.
pub fn unpack_many(
    approach: &dyn Approach,
    mut data: Bytes,
) -> MinDataResult<Vec<Value>> {
    let count = read_len(&mut data, "item count")?;
    // каждому элементу нужен хотя бы префикс длины
    if count > data.len() / size_of_i64() {
        return Err(MinDataError::malformed_frame(format!(
            "item count {count} does not fit into {} bytes",
            data.len()
        )));
    }

    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let len = read_len(&mut data, "item length")?;
        if len > data.len() {
            return Err(MinDataError::malformed_frame(format!(
                "item {index} declares {len} bytes, only {} left",
                data.len()
            )));
        }
        out.push(approach.unpack(data.split_to(len))?);
    }

    if !data.is_empty() {
        return Err(MinDataError::malformed_frame(format!(
            "{} trailing bytes after {count} items",
            data.len()
        )));
    }
    Ok(out)
}

fn read_len(
    data: &mut Bytes,
    what: &str,
) -> MinDataResult<usize> {
    let width = size_of_i64();
    if data.len() < width {
        return Err(MinDataError::malformed_frame(format!(
            "{what}: need {width} bytes, only {} left",
            data.len()
        )));
    }
    let raw = from_bytes_i64(&data.split_to(width))?;
    usize::try_from(raw)
        .map_err(|_| MinDataError::malformed_frame(format!("{what}: negative value {raw}")))
}
