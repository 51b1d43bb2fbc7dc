//! Подход MinData: теговый бинарный формат.

use bytes::Bytes;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::{pack_value, unpack_value, Value};
use crate::{Approach, MinDataResult};

/// Версия формата MinData.
///
/// Любое несовместимое изменение формата получает новую версию и новое
/// имя подхода, чтобы данные, записанные старой версией, оставались
/// читаемыми.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
pub enum MinDataVersion {
    #[default]
    V1 = 1,
}

impl MinDataVersion {
    /// Имя подхода, под которым версия регистрируется в реестре.
    pub fn approach_name(self) -> &'static str {
        match self {
            Self::V1 => "MD1",
        }
    }
}

/// Реализация [`Approach`] для формата MinData.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinData {
    version: MinDataVersion,
}

impl MinData {
    /// Текущая версия формата по умолчанию.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(version: MinDataVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> MinDataVersion {
        self.version
    }
}

impl Approach for MinData {
    fn name(&self) -> &str {
        self.version.approach_name()
    }

    fn pack(
        &self,
        value: &Value,
    ) -> MinDataResult<Vec<u8>> {
        match self.version {
            MinDataVersion::V1 => pack_value(value),
        }
    }

    fn unpack(
        &self,
        data: Bytes,
    ) -> MinDataResult<Value> {
        match self.version {
            MinDataVersion::V1 => unpack_value(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_is_named_md1() {
        assert_eq!(MinData::new().name(), "MD1");
        assert_eq!(MinData::with_version(MinDataVersion::V1).name(), "MD1");
        assert_eq!(MinData::new().version(), MinDataVersion::V1);
    }

    #[test]
    fn test_version_codes() {
        assert_eq!(i8::from(MinDataVersion::V1), 1);
        assert_eq!(MinDataVersion::try_from(1i8).unwrap(), MinDataVersion::V1);
        assert!(MinDataVersion::try_from(0i8).is_err());
        assert!(MinDataVersion::try_from(2i8).is_err());
    }

    #[test]
    fn test_is_serialisable() {
        let md = MinData::new();
        assert!(md.is_serialisable(&Value::Int64(1)));
        assert!(md.is_serialisable(&Value::ptr("x")));
        assert!(!md.is_serialisable(&Value::nil_ptr()));
        assert!(!md.is_serialisable(&Value::ptr(vec![1u16])));
    }
}
