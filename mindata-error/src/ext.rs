use std::{any::Any, error::Error};

use crate::StatusCode;

/// Расширение для ошибок библиотеки (object-safe).
///
/// Предоставляет вспомогательные методы для работы с ошибками:
/// - извлечение статус-кода,
/// - безопасное сообщение для внешнего потребителя,
/// - детализированное сообщение для логов.
pub trait ErrorExt: Error + Send + Sync + 'static {
    /// Статус ошибки.
    ///
    /// По умолчанию возвращает [`StatusCode::Internal`].
    fn status_code(&self) -> StatusCode {
        StatusCode::Internal
    }

    /// Возвращает ошибку как [`Any`](std::any::Any),
    /// чтобы можно было выполнить downcast к конкретному типу.
    fn as_any(&self) -> &dyn Any;

    /// Безопасное сообщение для внешнего потребителя.
    ///
    /// Для внутренних ошибок и признаков повреждения буфера не раскрывает
    /// деталей (смещения, причины), чтобы не подсказывать атакующему, на
    /// каком байте сработала проверка.
    fn client_message(&self) -> String {
        let code = self.status_code();
        match code {
            StatusCode::Unknown | StatusCode::Internal | StatusCode::Unexpected => {
                "Internal serialisation error".to_string()
            }
            _ if code.is_corruption() => "Invalid or corrupted data".to_string(),
            _ => self.to_string(),
        }
    }

    /// Детализированное сообщение для логов.
    fn log_message(&self) -> String {
        format!("{self:?}")
    }

    /// Имя типа ошибки (для логирования).
    fn type_name(&self) -> String {
        std::any::type_name::<Self>()
            .split("::")
            .last()
            .unwrap_or("Unknown")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::{any::Any, error::Error, fmt};

    use super::*;

    // Вспомогательный тип ошибки без переопределения status_code (использует
    // default = Internal).
    #[derive(Debug)]
    struct DefaultError(pub &'static str);

    impl fmt::Display for DefaultError {
        fn fmt(
            &self,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            write!(f, "DefaultError: {}", self.0)
        }
    }

    impl Error for DefaultError {}

    impl ErrorExt for DefaultError {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Debug)]
    struct ApproachError(pub &'static str);

    impl fmt::Display for ApproachError {
        fn fmt(
            &self,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            write!(f, "unknown approach: {}", self.0)
        }
    }

    impl Error for ApproachError {}

    impl ErrorExt for ApproachError {
        fn status_code(&self) -> StatusCode {
            StatusCode::UnknownApproach
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Тест проверяет, что по умолчанию статус ошибки — `Internal`.
    #[test]
    fn test_default_status_code_is_internal() {
        let e = DefaultError("oops");
        assert_eq!(
            e.status_code(),
            StatusCode::Internal,
            "DefaultError должен иметь статус Internal"
        );
    }

    /// Тест проверяет, что для внутренних ошибок `client_message` возвращает
    /// safe-строку.
    #[test]
    fn test_client_message_internal() {
        let e = DefaultError("sensitive");
        assert_eq!(e.client_message(), "Internal serialisation error");
    }

    /// Тест проверяет, что для клиентских кодов `client_message` возвращает
    /// `Display`.
    #[test]
    fn test_client_message_passthrough() {
        let e = ApproachError("MD9");
        assert_eq!(e.client_message(), "unknown approach: MD9");
    }

    #[test]
    fn test_type_name_and_downcast() {
        let e = ApproachError("x");
        assert_eq!(e.type_name(), "ApproachError");
        assert!(e.as_any().downcast_ref::<ApproachError>().is_some());
        assert!(e.log_message().contains("ApproachError"));
    }
}
