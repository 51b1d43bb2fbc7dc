//! Десериализация [`Value`] из формата MinData.
//!
//! Декодер работает поверх [`Bytes`]: строки и срезы байтов возвращаются
//! как срезы входного буфера без копирования. Все длины сверяются с
//! оставшимися байтами до выделения памяти, поэтому повреждённый или
//! злонамеренный вход приводит к ошибке, а не к панике или большой
//! аллокации.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use bytes::{Buf, Bytes};
use chrono::TimeDelta;
use tracing::debug;

use super::{unmarshal_time, Tag, Value, SIZE_OF_I64};
use crate::{MinDataError, MinDataResult};

/// Внутренняя причина отказа декодера.
///
/// Наружу не выходит: на границе [`unpack_value`] превращается в
/// `UnexpectedDeserialisationFailure`.
#[derive(Debug)]
struct Fault(String);

impl fmt::Display for Fault {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type DecodeResult<T> = Result<T, Fault>;

/// Распаковывает одно значение, записанное [`pack_value`].
///
/// # Errors
/// - `TypeNotDeserialisable`, если тег неизвестен;
/// - `UnexpectedDeserialisationFailure` при любом повреждении тела
///   (обрыв, лишние байты, невозможная длина, невалидный UTF-8).
///
/// [`pack_value`]: super::pack_value
pub fn unpack_value(data: Bytes) -> MinDataResult<Value> {
    let mut reader = Reader::new(data);
    let code = reader.u8().map_err(into_error)?;
    let tag = match Tag::try_from(code) {
        Ok(Tag::Unknown) | Err(_) => {
            return Err(MinDataError::TypeNotDeserialisable { tag: code })
        }
        Ok(tag) => tag,
    };

    read_body(tag, &mut reader)
        .and_then(|value| reader.finish().map(|()| value))
        .map_err(|fault| {
            debug!(?tag, %fault, "MinData decode fault");
            into_error(fault)
        })
}

fn into_error(fault: Fault) -> MinDataError {
    MinDataError::corrupted(fault.0)
}

fn read_body(
    tag: Tag,
    r: &mut Reader,
) -> DecodeResult<Value> {
    if let Some(inner) = tag.pointee() {
        return Ok(Value::Ptr(Some(Box::new(read_body(inner, r)?))));
    }

    let value = match tag {
        Tag::Nil => Value::Nil,
        Tag::Int8 => Value::Int8(r.u8()? as i8),
        Tag::Int16 => Value::Int16(LittleEndian::read_i16(&r.take(2)?)),
        Tag::Int32 => Value::Int32(LittleEndian::read_i32(&r.take(4)?)),
        Tag::Int64 => Value::Int64(r.i64()?),
        Tag::Uint8 => Value::Uint8(r.u8()?),
        Tag::Uint16 => Value::Uint16(LittleEndian::read_u16(&r.take(2)?)),
        Tag::Uint32 => Value::Uint32(LittleEndian::read_u32(&r.take(4)?)),
        Tag::Uint64 => Value::Uint64(LittleEndian::read_u64(&r.take(8)?)),
        Tag::Float32 => Value::Float32(LittleEndian::read_f32(&r.take(4)?)),
        Tag::Float64 => Value::Float64(LittleEndian::read_f64(&r.take(8)?)),
        // любое ненулевое значение считается true
        Tag::Bool => Value::Bool(r.u8()? != 0),
        Tag::Duration => Value::Duration(TimeDelta::nanoseconds(r.i64()?)),

        Tag::Int8Slice => Value::Int8Slice(r.fixed(1, |b| b[0] as i8)?),
        Tag::Int16Slice => Value::Int16Slice(r.fixed(2, LittleEndian::read_i16)?),
        Tag::Int32Slice => Value::Int32Slice(r.fixed(4, LittleEndian::read_i32)?),
        Tag::Int64Slice => Value::Int64Slice(r.fixed(8, LittleEndian::read_i64)?),
        Tag::Uint16Slice => Value::Uint16Slice(r.fixed(2, LittleEndian::read_u16)?),
        Tag::Uint32Slice => Value::Uint32Slice(r.fixed(4, LittleEndian::read_u32)?),
        Tag::Uint64Slice => Value::Uint64Slice(r.fixed(8, LittleEndian::read_u64)?),
        Tag::Float32Slice => Value::Float32Slice(r.fixed(4, LittleEndian::read_f32)?),
        Tag::Float64Slice => Value::Float64Slice(r.fixed(8, LittleEndian::read_f64)?),
        Tag::BoolSlice => Value::BoolSlice(r.fixed(1, |b| b[0] != 0)?),
        Tag::DurationSlice => Value::DurationSlice(r.fixed(8, |b| {
            TimeDelta::nanoseconds(LittleEndian::read_i64(b))
        })?),

        Tag::String => Value::String(utf8(r.rest())?),
        Tag::StringSlice => Value::StringSlice(
            r.chunks()?
                .into_iter()
                .map(utf8)
                .collect::<DecodeResult<_>>()?,
        ),
        Tag::ByteSlice => Value::Bytes(r.rest()),
        Tag::ByteSliceSlice => Value::ByteSlices(r.chunks()?),
        Tag::Time => Value::Time(unmarshal_time(&r.rest()).map_err(Fault)?),

        // указатели разобраны выше, Unknown отсекается в unpack_value
        other => return Err(Fault(format!("tag {other:?} has no body decoder"))),
    };
    Ok(value)
}

fn utf8(bytes: Bytes) -> DecodeResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| Fault(format!("invalid utf-8: {e}")))
}

////////////////////////////////////////////////////////////////////////////////
// Reader
////////////////////////////////////////////////////////////////////////////////

/// Курсор по входному буферу с проверкой границ на каждом чтении.
struct Reader {
    buf: Bytes,
}

impl Reader {
    fn new(buf: Bytes) -> Self {
        Self { buf }
    }

    fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Отрезает `n` байт от начала буфера.
    fn take(
        &mut self,
        n: usize,
    ) -> DecodeResult<Bytes> {
        if n > self.buf.len() {
            return Err(Fault(format!(
                "need {n} bytes, only {} left",
                self.buf.len()
            )));
        }
        Ok(self.buf.split_to(n))
    }

    fn u8(&mut self) -> DecodeResult<u8> {
        if !self.buf.has_remaining() {
            return Err(Fault("unexpected end of data".to_string()));
        }
        Ok(self.buf.get_u8())
    }

    fn i64(&mut self) -> DecodeResult<i64> {
        Ok(LittleEndian::read_i64(&self.take(SIZE_OF_I64)?))
    }

    /// Читает поле длины или количества: неотрицательный `i64`.
    fn len(&mut self) -> DecodeResult<usize> {
        let raw = self.i64()?;
        usize::try_from(raw).map_err(|_| Fault(format!("invalid length {raw}")))
    }

    /// Всё, что осталось в буфере.
    fn rest(&mut self) -> Bytes {
        std::mem::take(&mut self.buf)
    }

    /// Срез элементов фиксированной ширины: `count:8` и `count * width`
    /// байт.
    fn fixed<T>(
        &mut self,
        width: usize,
        read: impl Fn(&[u8]) -> T,
    ) -> DecodeResult<Vec<T>> {
        let count = self.len()?;
        let total = count
            .checked_mul(width)
            .ok_or_else(|| Fault(format!("element count {count} overflows")))?;
        let body = self.take(total)?;
        Ok(body.chunks_exact(width).map(read).collect())
    }

    /// Срез блоков переменной длины: `count:8`, затем `len:8 + bytes` для
    /// каждого.
    fn chunks(&mut self) -> DecodeResult<Vec<Bytes>> {
        let count = self.len()?;
        // каждому элементу нужен хотя бы префикс длины
        if count > self.remaining() / SIZE_OF_I64 {
            return Err(Fault(format!(
                "element count {count} does not fit into {} bytes",
                self.remaining()
            )));
        }
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let len = self.len()?;
            out.push(self.take(len)?);
        }
        Ok(out)
    }

    /// Проверяет, что тело прочитано целиком.
    fn finish(self) -> DecodeResult<()> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(Fault(format!("{} trailing bytes", self.buf.len())))
        }
    }
}
