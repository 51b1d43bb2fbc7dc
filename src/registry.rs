//! Реестр подходов к сериализации: локальные экземпляры и общий
//! глобальный реестр процесса.

use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use crate::{Approach, MinData, MinDataError, MinDataResult};

/// Общий реестр подходов процесса. Заполняется встроенными подходами при
/// первом обращении.
static GLOBAL_REGISTRY: Lazy<ApproachRegistry> = Lazy::new(ApproachRegistry::with_builtins);

/// Реестр подходов к сериализации.
///
/// Потокобезопасная таблица `name -> Approach`. Позволяет получить декодер
/// по имени, возвращённому из `to_bytes`.
#[derive(Debug)]
pub struct ApproachRegistry {
    /// Хранилище подходов: name -> Approach
    approaches: RwLock<HashMap<String, Arc<dyn Approach>>>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl ApproachRegistry {
    /// Создаёт пустой реестр.
    pub fn new() -> Self {
        Self {
            approaches: RwLock::new(HashMap::new()),
        }
    }

    /// Создаёт реестр со встроенными подходами (MinData V1).
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(MinData::new()));
        registry
    }

    /// Регистрирует подход под его именем.
    ///
    /// # Возвращает
    /// - `Some(previous)`, если подход с таким именем уже был и заменён;
    /// - `None`, если имя новое.
    pub fn register(
        &self,
        approach: Arc<dyn Approach>,
    ) -> Option<Arc<dyn Approach>> {
        let name = approach.name().to_string();
        let previous = self.approaches.write().insert(name.clone(), approach);
        debug!(
            approach = %name,
            replaced = previous.is_some(),
            "Registered serialisation approach"
        );
        previous
    }

    /// Возвращает подход по имени.
    ///
    /// # Errors
    /// `UnknownApproachName`, если имя не зарегистрировано.
    pub fn get(
        &self,
        name: &str,
    ) -> MinDataResult<Arc<dyn Approach>> {
        self.approaches
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| MinDataError::UnknownApproachName(name.to_string()))
    }

    /// Имена зарегистрированных подходов в отсортированном порядке.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.approaches.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.approaches.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.approaches.read().is_empty()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Глобальный реестр
////////////////////////////////////////////////////////////////////////////////

/// Общий реестр процесса.
pub fn global() -> &'static ApproachRegistry {
    &GLOBAL_REGISTRY
}

/// Регистрирует подход в глобальном реестре (последняя запись побеждает).
pub fn register_approach(approach: Arc<dyn Approach>) -> Option<Arc<dyn Approach>> {
    global().register(approach)
}

/// Ищет подход в глобальном реестре.
pub fn get_approach(name: &str) -> MinDataResult<Arc<dyn Approach>> {
    global().get(name)
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для ApproachRegistry
////////////////////////////////////////////////////////////////////////////////

impl Default for ApproachRegistry {
    fn default() -> Self {
        Self::new()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
