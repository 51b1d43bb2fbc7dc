pub mod error;
pub mod ext;
pub mod status_code;

// Публичный экспорт всех типов ошибок, чтобы упростить доступ к ним из
// внешнего кода.
pub use error::*;
pub use ext::*;
pub use status_code::*;

pub type MinDataResult<T> = Result<T, MinDataError>;
