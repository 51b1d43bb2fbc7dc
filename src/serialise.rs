//! Публичные операции сериализации.
//!
//! Каждая операция проводит данные через подход и конвейер трансформаций
//! (см. [`crate::transform`]). Имя подхода не пишется в буфер: оно
//! возвращается рядом с байтами, и его нужно сохранить, чтобы потом
//! выбрать декодер.

use std::sync::Arc;

use bytes::Bytes;
use once_cell::sync::Lazy;

use crate::{
    framer::{pack_many, unpack_many},
    registry::get_approach,
    transform, Approach, MinData, MinDataError, MinDataResult, Options, Value,
};

static DEFAULT_APPROACH: Lazy<Arc<dyn Approach>> = Lazy::new(|| Arc::new(MinData::new()));

/// Подход, используемый, когда в [`Options`] он не задан (MinData V1).
pub fn default_approach() -> Arc<dyn Approach> {
    Arc::clone(&DEFAULT_APPROACH)
}

fn resolve(opts: &Options) -> Arc<dyn Approach> {
    opts.approach.clone().unwrap_or_else(default_approach)
}

/// Сериализует одно значение.
///
/// # Возвращает
/// `(bytes, approach_name)`.
pub fn to_bytes(
    value: &Value,
    opts: &Options,
) -> MinDataResult<(Vec<u8>, String)> {
    let approach = resolve(opts);
    let packed = approach.pack(value)?;
    let out = transform::apply(&packed, opts)?;
    Ok((out, approach.name().to_string()))
}

/// Десериализует значение, созданное [`to_bytes`].
///
/// # Errors
/// - `NoDataToDeserialise` для пустого `data`;
/// - `InvalidApproach`, если подход не передан;
/// - ошибки расшифровки, распаковки и декодера.
pub fn from_bytes(
    data: &[u8],
    approach: Option<&dyn Approach>,
    opts: &Options,
) -> MinDataResult<Value> {
    let (approach, body) = prepare(data, approach, opts)?;
    approach.unpack(body)
}

/// Сериализует последовательность значений в один буфер.
pub fn to_bytes_many(
    values: &[Value],
    opts: &Options,
) -> MinDataResult<(Vec<u8>, String)> {
    let approach = resolve(opts);
    let framed = pack_many(approach.as_ref(), values)?;
    let out = transform::apply(&framed, opts)?;
    Ok((out, approach.name().to_string()))
}

/// Десериализует последовательность, созданную [`to_bytes_many`].
pub fn from_bytes_many(
    data: &[u8],
    approach: Option<&dyn Approach>,
    opts: &Options,
) -> MinDataResult<Vec<Value>> {
    let (approach, body) = prepare(data, approach, opts)?;
    unpack_many(approach, body)
}

/// Как [`from_bytes`], но подход ищется по имени в глобальном реестре.
pub fn from_bytes_named(
    data: &[u8],
    approach_name: &str,
    opts: &Options,
) -> MinDataResult<Value> {
    let approach = get_approach(approach_name)?;
    from_bytes(data, Some(approach.as_ref()), opts)
}

/// Как [`from_bytes_many`], но подход ищется по имени в глобальном реестре.
pub fn from_bytes_many_named(
    data: &[u8],
    approach_name: &str,
    opts: &Options,
) -> MinDataResult<Vec<Value>> {
    let approach = get_approach(approach_name)?;
    from_bytes_many(data, Some(approach.as_ref()), opts)
}

fn prepare<'a>(
    data: &[u8],
    approach: Option<&'a dyn Approach>,
    opts: &Options,
) -> MinDataResult<(&'a dyn Approach, Bytes)> {
    if data.is_empty() {
        return Err(MinDataError::NoDataToDeserialise);
    }
    let approach = approach.ok_or(MinDataError::InvalidApproach)?;
    let body = transform::reverse(data, opts)?;
    Ok((approach, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_approach_is_md1() {
        assert_eq!(default_approach().name(), "MD1");
    }

    #[test]
    fn test_to_bytes_int64_layout() {
        let (bytes, name) = to_bytes(&Value::Int64(168), &Options::new()).unwrap();
        assert_eq!(name, "MD1");
        // 9 байт не превышают порог, флаг 0
        assert_eq!(bytes.len(), 10);
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[1], 10);
    }

    #[test]
    fn test_from_bytes_guards() {
        let md = MinData::new();
        assert!(matches!(
            from_bytes(&[], Some(&md), &Options::new()),
            Err(MinDataError::NoDataToDeserialise)
        ));
        assert!(matches!(
            from_bytes(&[0, 10], None, &Options::new()),
            Err(MinDataError::InvalidApproach)
        ));
        assert!(matches!(
            from_bytes_many(&[], Some(&md), &Options::new()),
            Err(MinDataError::NoDataToDeserialise)
        ));
    }

    #[test]
    fn test_named_lookup() {
        let (bytes, name) = to_bytes(&Value::from("abc"), &Options::new()).unwrap();
        let v = from_bytes_named(&bytes, &name, &Options::new()).unwrap();
        assert_eq!(v, Value::from("abc"));
        assert!(matches!(
            from_bytes_named(&bytes, "NOPE", &Options::new()),
            Err(MinDataError::UnknownApproachName(_))
        ));
    }
}
