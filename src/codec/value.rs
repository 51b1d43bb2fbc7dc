//! Замкнутое множество значений, которые умеет сериализовать MinData.

use bytes::Bytes;
use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};

/// Значение, поддерживаемое форматом MinData.
///
/// Каждому варианту соответствует ровно один тег (см. [`Tag`]), кроме
/// [`Value::Ptr`], который наследует тег указателя от значения внутри.
///
/// Строки и срезы байтов после декодирования могут ссылаться на общий
/// буфер ([`Bytes`]); это безопасно, так как `Bytes` неизменяем.
///
/// [`Tag`]: super::Tag
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    Duration(TimeDelta),
    /// Указатель на скаляр, строку или время.
    ///
    /// `None` — нулевой указатель: упаковать его нельзя.
    Ptr(Option<Box<Value>>),
    Int8Slice(Vec<i8>),
    Int16Slice(Vec<i16>),
    Int32Slice(Vec<i32>),
    Int64Slice(Vec<i64>),
    Uint16Slice(Vec<u16>),
    Uint32Slice(Vec<u32>),
    Uint64Slice(Vec<u64>),
    Float32Slice(Vec<f32>),
    Float64Slice(Vec<f64>),
    BoolSlice(Vec<bool>),
    DurationSlice(Vec<TimeDelta>),
    String(String),
    StringSlice(Vec<String>),
    Bytes(Bytes),
    ByteSlices(Vec<Bytes>),
    Time(DateTime<FixedOffset>),
}

impl Value {
    /// Оборачивает значение в указатель.
    pub fn ptr(v: impl Into<Value>) -> Self {
        Self::Ptr(Some(Box::new(v.into())))
    }

    /// Нулевой указатель.
    pub fn nil_ptr() -> Self {
        Self::Ptr(None)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Значение, на которое указывает указатель (`None` для не-указателей и
    /// нулевого указателя).
    pub fn pointee(&self) -> Option<&Value> {
        match self {
            Self::Ptr(inner) => inner.as_deref(),
            _ => None,
        }
    }

    /// Короткое имя вида значения, используется в сообщениях об ошибках и
    /// в логах.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Int8(_) => "int8",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Uint8(_) => "uint8",
            Self::Uint16(_) => "uint16",
            Self::Uint32(_) => "uint32",
            Self::Uint64(_) => "uint64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Bool(_) => "bool",
            Self::Duration(_) => "duration",
            Self::Ptr(None) => "ptr(nil)",
            Self::Ptr(Some(_)) => "ptr",
            Self::Int8Slice(_) => "[]int8",
            Self::Int16Slice(_) => "[]int16",
            Self::Int32Slice(_) => "[]int32",
            Self::Int64Slice(_) => "[]int64",
            Self::Uint16Slice(_) => "[]uint16",
            Self::Uint32Slice(_) => "[]uint32",
            Self::Uint64Slice(_) => "[]uint64",
            Self::Float32Slice(_) => "[]float32",
            Self::Float64Slice(_) => "[]float64",
            Self::BoolSlice(_) => "[]bool",
            Self::DurationSlice(_) => "[]duration",
            Self::String(_) => "string",
            Self::StringSlice(_) => "[]string",
            Self::Bytes(_) => "[]byte",
            Self::ByteSlices(_) => "[][]byte",
            Self::Time(_) => "time",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Преобразования в Value
////////////////////////////////////////////////////////////////////////////////

macro_rules! impl_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    bool => Bool,
    TimeDelta => Duration,
    Vec<i8> => Int8Slice,
    Vec<i16> => Int16Slice,
    Vec<i32> => Int32Slice,
    Vec<i64> => Int64Slice,
    Vec<u16> => Uint16Slice,
    Vec<u32> => Uint32Slice,
    Vec<u64> => Uint64Slice,
    Vec<f32> => Float32Slice,
    Vec<f64> => Float64Slice,
    Vec<bool> => BoolSlice,
    Vec<TimeDelta> => DurationSlice,
    String => String,
    Vec<String> => StringSlice,
    Bytes => Bytes,
    Vec<Bytes> => ByteSlices,
    DateTime<FixedOffset> => Time,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::StringSlice(v.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(v))
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(v))
    }
}

impl From<Vec<Vec<u8>>> for Value {
    fn from(v: Vec<Vec<u8>>) -> Self {
        Value::ByteSlices(v.into_iter().map(Bytes::from).collect())
    }
}

impl From<DateTime<chrono::Utc>> for Value {
    fn from(v: DateTime<chrono::Utc>) -> Self {
        Value::Time(v.fixed_offset())
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for Value {
    fn from(v: &DateTime<Tz>) -> Self {
        Value::Time(v.fixed_offset())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` превращается в `Nil`, `Some(v)` — в само значение.
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(42i8), Value::Int8(42));
        assert_eq!(Value::from("hi"), Value::String("hi".into()));
        assert_eq!(
            Value::from(vec!["a", "b"]),
            Value::StringSlice(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            Value::from(vec![1u8, 2, 3]),
            Value::Bytes(Bytes::from_static(&[1, 2, 3]))
        );
        assert_eq!(Value::from(None::<i64>), Value::Nil);
        assert_eq!(Value::from(Some(7u32)), Value::Uint32(7));
        assert_eq!(Value::from(()), Value::Nil);
    }

    /// Тест проверяет, что указатели сравниваются по значению, на которое
    /// они указывают.
    #[test]
    fn test_pointer_equality_is_by_pointee() {
        let a = Value::ptr(168i64);
        let b = Value::ptr(168i64);
        assert_eq!(a, b);
        assert_ne!(a, Value::ptr(169i64));
        assert_eq!(a.pointee(), Some(&Value::Int64(168)));
        assert_eq!(Value::nil_ptr().pointee(), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Nil.kind(), "nil");
        assert_eq!(Value::nil_ptr().kind(), "ptr(nil)");
        assert_eq!(Value::from(vec![1.0f32]).kind(), "[]float32");
        assert!(Value::Nil.is_nil());
        assert!(!Value::Int8(0).is_nil());
    }
}
