//! Сериализация [`Value`] в формат MinData.
//!
//! Каждое значение записывается как `[tag:1][body]`:
//! - скаляры — родная ширина, little-endian;
//! - срезы фиксированной ширины — `count:8` и элементы подряд;
//! - строка и срез байтов — сырые байты без длины (читаются до конца
//!   буфера);
//! - срез строк и срез срезов байтов — `count:8`, затем `len:8 + bytes`
//!   для каждого элемента;
//! - время — непрозрачный блок из [`marshal_time`];
//! - `Nil` — только тег.

use chrono::TimeDelta;

use super::{marshal_time, Tag, Value, SIZE_OF_I64};
use crate::{MinDataError, MinDataResult};

/// Упаковывает значение вместе с тегом.
///
/// # Errors
/// - `NilPointer` для [`Value::Ptr`] с `None`;
/// - `TypeNotSerialisable` для указателя на срез, `Nil` или другой
///   указатель;
/// - `DurationOutOfRange` / `InvalidTimeOffset`, если значение не
///   помещается в формат.
pub fn pack_value(value: &Value) -> MinDataResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(1 + body_size_hint(value));
    match value {
        Value::Ptr(None) => return Err(MinDataError::NilPointer),
        Value::Ptr(Some(inner)) => {
            let tag = value_tag(inner)
                .and_then(Tag::pointer)
                .ok_or(MinDataError::TypeNotSerialisable {
                    kind: "ptr(unsupported)",
                })?;
            buf.push(tag.into());
            write_body(&mut buf, inner)?;
        }
        other => {
            let tag = value_tag(other).ok_or(MinDataError::TypeNotSerialisable {
                kind: other.kind(),
            })?;
            buf.push(tag.into());
            write_body(&mut buf, other)?;
        }
    }
    Ok(buf)
}

/// Тег для значения, не являющегося указателем.
fn value_tag(value: &Value) -> Option<Tag> {
    let tag = match value {
        Value::Nil => Tag::Nil,
        Value::Int8(_) => Tag::Int8,
        Value::Int16(_) => Tag::Int16,
        Value::Int32(_) => Tag::Int32,
        Value::Int64(_) => Tag::Int64,
        Value::Uint8(_) => Tag::Uint8,
        Value::Uint16(_) => Tag::Uint16,
        Value::Uint32(_) => Tag::Uint32,
        Value::Uint64(_) => Tag::Uint64,
        Value::Float32(_) => Tag::Float32,
        Value::Float64(_) => Tag::Float64,
        Value::Bool(_) => Tag::Bool,
        Value::Duration(_) => Tag::Duration,
        Value::Int8Slice(_) => Tag::Int8Slice,
        Value::Int16Slice(_) => Tag::Int16Slice,
        Value::Int32Slice(_) => Tag::Int32Slice,
        Value::Int64Slice(_) => Tag::Int64Slice,
        Value::Uint16Slice(_) => Tag::Uint16Slice,
        Value::Uint32Slice(_) => Tag::Uint32Slice,
        Value::Uint64Slice(_) => Tag::Uint64Slice,
        Value::Float32Slice(_) => Tag::Float32Slice,
        Value::Float64Slice(_) => Tag::Float64Slice,
        Value::BoolSlice(_) => Tag::BoolSlice,
        Value::DurationSlice(_) => Tag::DurationSlice,
        Value::String(_) => Tag::String,
        Value::StringSlice(_) => Tag::StringSlice,
        Value::Bytes(_) => Tag::ByteSlice,
        Value::ByteSlices(_) => Tag::ByteSliceSlice,
        Value::Time(_) => Tag::Time,
        Value::Ptr(_) => return None,
    };
    Some(tag)
}

/// Записывает тело значения (без тега).
fn write_body(
    buf: &mut Vec<u8>,
    value: &Value,
) -> MinDataResult<()> {
    match value {
        Value::Nil => {}
        Value::Int8(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Int16(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Int32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Int64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Uint8(v) => buf.push(*v),
        Value::Uint16(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Uint32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Uint64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Float32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Float64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Bool(v) => buf.push(u8::from(*v)),
        Value::Duration(d) => buf.extend_from_slice(&duration_nanos(d)?.to_le_bytes()),
        Value::Int8Slice(v) => write_fixed(buf, v, |x| x.to_le_bytes()),
        Value::Int16Slice(v) => write_fixed(buf, v, |x| x.to_le_bytes()),
        Value::Int32Slice(v) => write_fixed(buf, v, |x| x.to_le_bytes()),
        Value::Int64Slice(v) => write_fixed(buf, v, |x| x.to_le_bytes()),
        Value::Uint16Slice(v) => write_fixed(buf, v, |x| x.to_le_bytes()),
        Value::Uint32Slice(v) => write_fixed(buf, v, |x| x.to_le_bytes()),
        Value::Uint64Slice(v) => write_fixed(buf, v, |x| x.to_le_bytes()),
        Value::Float32Slice(v) => write_fixed(buf, v, |x| x.to_le_bytes()),
        Value::Float64Slice(v) => write_fixed(buf, v, |x| x.to_le_bytes()),
        Value::BoolSlice(v) => write_fixed(buf, v, |x| [u8::from(x)]),
        Value::DurationSlice(v) => {
            // сначала проверяем все элементы, чтобы не оставить полузаписанный
            // буфер
            let nanos = v
                .iter()
                .map(duration_nanos)
                .collect::<MinDataResult<Vec<_>>>()?;
            write_fixed(buf, &nanos, |x| x.to_le_bytes());
        }
        Value::String(s) => buf.extend_from_slice(s.as_bytes()),
        Value::StringSlice(v) => write_chunks(buf, v.iter().map(String::as_bytes), v.len()),
        Value::Bytes(b) => buf.extend_from_slice(b),
        Value::ByteSlices(v) => write_chunks(buf, v.iter().map(|b| b.as_ref()), v.len()),
        Value::Time(t) => buf.extend_from_slice(&marshal_time(t)?),
        Value::Ptr(_) => {
            return Err(MinDataError::TypeNotSerialisable {
                kind: "ptr(unsupported)",
            })
        }
    }
    Ok(())
}

fn duration_nanos(d: &TimeDelta) -> MinDataResult<i64> {
    d.num_nanoseconds().ok_or(MinDataError::DurationOutOfRange)
}

/// Пишет длину/количество как `i64` little-endian.
pub(crate) fn write_len(
    buf: &mut Vec<u8>,
    len: usize,
) {
    // длина Vec не превышает isize::MAX, поэтому помещается в i64
    buf.extend_from_slice(&(len as i64).to_le_bytes());
}

fn write_fixed<T: Copy, const N: usize>(
    buf: &mut Vec<u8>,
    items: &[T],
    to_le: impl Fn(T) -> [u8; N],
) {
    buf.reserve(SIZE_OF_I64 + items.len() * N);
    write_len(buf, items.len());
    for item in items {
        buf.extend_from_slice(&to_le(*item));
    }
}

fn write_chunks<'a>(
    buf: &mut Vec<u8>,
    chunks: impl Iterator<Item = &'a [u8]>,
    count: usize,
) {
    write_len(buf, count);
    for chunk in chunks {
        write_len(buf, chunk.len());
        buf.extend_from_slice(chunk);
    }
}

/// Приблизительный размер тела, чтобы сразу выделить буфер нужного
/// размера. Для вложенных коллекций точность не важна.
fn body_size_hint(value: &Value) -> usize {
    match value {
        Value::String(s) => s.len(),
        Value::Bytes(b) => b.len(),
        Value::Int8Slice(v) => SIZE_OF_I64 + v.len(),
        Value::BoolSlice(v) => SIZE_OF_I64 + v.len(),
        Value::Int16Slice(v) => SIZE_OF_I64 + v.len() * 2,
        Value::Uint16Slice(v) => SIZE_OF_I64 + v.len() * 2,
        Value::Int32Slice(v) => SIZE_OF_I64 + v.len() * 4,
        Value::Uint32Slice(v) => SIZE_OF_I64 + v.len() * 4,
        Value::Float32Slice(v) => SIZE_OF_I64 + v.len() * 4,
        Value::Int64Slice(v) => SIZE_OF_I64 + v.len() * 8,
        Value::Uint64Slice(v) => SIZE_OF_I64 + v.len() * 8,
        Value::Float64Slice(v) => SIZE_OF_I64 + v.len() * 8,
        Value::DurationSlice(v) => SIZE_OF_I64 + v.len() * 8,
        _ => 16,
    }
}
