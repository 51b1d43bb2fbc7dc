//! Кодек MinData.
//!
//! Значение записывается как `[tag:1][body]`. Тег однозначно задаёт
//! раскладку тела; таблица тегов в [`Tag`] является частью формата.

pub mod decode;
pub mod encode;
pub mod int64;
pub mod mindata;
pub mod tags;
pub mod time;
pub mod value;

pub use decode::unpack_value;
pub use encode::pack_value;
pub use int64::{from_bytes_i64, size_of_i64, to_bytes_i64, SIZE_OF_I64};
pub use mindata::{MinData, MinDataVersion};
pub use tags::Tag;
pub use time::{marshal_time, unmarshal_time, TIME_BINARY_LEN_V1, TIME_BINARY_LEN_V2};
pub use value::Value;
