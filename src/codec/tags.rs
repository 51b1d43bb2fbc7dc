//! Определение тегов для бинарного формата MinData.
//!
//! Каждое значение начинается с однобайтового тега, который однозначно
//! задаёт, как разбирать следующие за ним байты. Нумерация закреплена
//! форматом `MD1` и не может меняться: новые типы получают новые коды.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Тег типа значения.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
pub enum Tag {
    /// Зарезервирован, никогда не записывается.
    Unknown = 0,
    Int8 = 1,
    PtrInt8 = 2,
    Int8Slice = 3,
    Int16 = 4,
    PtrInt16 = 5,
    Int16Slice = 6,
    Int32 = 7,
    PtrInt32 = 8,
    Int32Slice = 9,
    Int64 = 10,
    PtrInt64 = 11,
    Int64Slice = 12,
    Uint8 = 13,
    PtrUint8 = 14,
    Uint16 = 15,
    PtrUint16 = 16,
    Uint16Slice = 17,
    Uint32 = 18,
    PtrUint32 = 19,
    Uint32Slice = 20,
    Uint64 = 21,
    PtrUint64 = 22,
    Uint64Slice = 23,
    Float32 = 24,
    PtrFloat32 = 25,
    Float32Slice = 26,
    Float64 = 27,
    PtrFloat64 = 28,
    Float64Slice = 29,
    Bool = 30,
    PtrBool = 31,
    BoolSlice = 32,
    /// Длительность в наносекундах (i64)
    Duration = 33,
    PtrDuration = 34,
    DurationSlice = 35,
    /// Строка без префикса длины
    String = 36,
    PtrString = 37,
    StringSlice = 38,
    /// Непрозрачный бинарный блок времени
    Time = 39,
    PtrTime = 40,
    /// Срез байтов без префикса длины
    ByteSlice = 41,
    ByteSliceSlice = 42,
    /// Null
    Nil = 43,
}

impl Tag {
    /// Тег указателя для тега скаляра, строки или времени.
    ///
    /// Для остальных тегов (срезы, `Nil`, сами указатели) указатель не
    /// определён, и возвращается `None`.
    pub fn pointer(self) -> Option<Self> {
        let ptr = match self {
            Self::Int8 => Self::PtrInt8,
            Self::Int16 => Self::PtrInt16,
            Self::Int32 => Self::PtrInt32,
            Self::Int64 => Self::PtrInt64,
            Self::Uint8 => Self::PtrUint8,
            Self::Uint16 => Self::PtrUint16,
            Self::Uint32 => Self::PtrUint32,
            Self::Uint64 => Self::PtrUint64,
            Self::Float32 => Self::PtrFloat32,
            Self::Float64 => Self::PtrFloat64,
            Self::Bool => Self::PtrBool,
            Self::Duration => Self::PtrDuration,
            Self::String => Self::PtrString,
            Self::Time => Self::PtrTime,
            _ => return None,
        };
        Some(ptr)
    }

    /// Обратное к [`Tag::pointer`]: тег значения, на которое указывает
    /// указатель.
    pub fn pointee(self) -> Option<Self> {
        let inner = match self {
            Self::PtrInt8 => Self::Int8,
            Self::PtrInt16 => Self::Int16,
            Self::PtrInt32 => Self::Int32,
            Self::PtrInt64 => Self::Int64,
            Self::PtrUint8 => Self::Uint8,
            Self::PtrUint16 => Self::Uint16,
            Self::PtrUint32 => Self::Uint32,
            Self::PtrUint64 => Self::Uint64,
            Self::PtrFloat32 => Self::Float32,
            Self::PtrFloat64 => Self::Float64,
            Self::PtrBool => Self::Bool,
            Self::PtrDuration => Self::Duration,
            Self::PtrString => Self::String,
            Self::PtrTime => Self::Time,
            _ => return None,
        };
        Some(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Тест фиксирует коды тегов: они являются частью формата `MD1`.
    #[test]
    fn test_wire_codes_are_stable() {
        assert_eq!(u8::from(Tag::Unknown), 0);
        assert_eq!(u8::from(Tag::Int8), 1);
        assert_eq!(u8::from(Tag::Int64), 10);
        assert_eq!(u8::from(Tag::Uint8), 13);
        assert_eq!(u8::from(Tag::Bool), 30);
        assert_eq!(u8::from(Tag::String), 36);
        assert_eq!(u8::from(Tag::StringSlice), 38);
        assert_eq!(u8::from(Tag::ByteSliceSlice), 42);
        assert_eq!(u8::from(Tag::Nil), 43);
    }

    #[test]
    fn test_try_from_rejects_unknown_codes() {
        assert_eq!(Tag::try_from(10u8).unwrap(), Tag::Int64);
        assert!(Tag::try_from(44u8).is_err());
        assert!(Tag::try_from(0xFFu8).is_err());
    }

    /// Тест проверяет, что `pointer` и `pointee` взаимно обратны.
    #[test]
    fn test_pointer_pointee_roundtrip() {
        for code in 0u8..=43 {
            let tag = Tag::try_from(code).unwrap();
            if let Some(ptr) = tag.pointer() {
                assert_eq!(ptr.pointee(), Some(tag), "tag {tag:?}");
            }
        }
        assert_eq!(Tag::Int8Slice.pointer(), None);
        assert_eq!(Tag::Nil.pointer(), None);
        assert_eq!(Tag::PtrInt8.pointer(), None);
    }
}
