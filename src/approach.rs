//! Контракт подхода к сериализации.

use std::fmt::Debug;

use bytes::Bytes;

use crate::{MinDataResult, Value};

/// Именованная взаимозаменяемая стратегия кодирования.
///
/// Имя подхода является его идентичностью в формате: оно возвращается
/// рядом с байтами из `to_bytes` и нужно, чтобы выбрать декодер. Подход
/// неизменяем после создания и разделяется как `Arc<dyn Approach>`.
pub trait Approach: Send + Sync + Debug {
    /// Стабильное имя подхода.
    fn name(&self) -> &str;

    /// Сериализует значение.
    fn pack(
        &self,
        value: &Value,
    ) -> MinDataResult<Vec<u8>>;

    /// Десериализует значение из буфера, созданного [`Approach::pack`].
    fn unpack(
        &self,
        data: Bytes,
    ) -> MinDataResult<Value>;

    /// Можно ли сериализовать значение этим подходом.
    fn is_serialisable(
        &self,
        value: &Value,
    ) -> bool {
        self.pack(value).is_ok()
    }
}
