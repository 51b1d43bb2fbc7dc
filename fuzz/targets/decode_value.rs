#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use mindata::{
    codec::{pack_value, unpack_value},
    from_bytes, MinData, Options,
};

fuzz_target!(|data: &[u8]| {
    // декодер не должен паниковать ни на каких данных
    if let Ok(value) = unpack_value(Bytes::copy_from_slice(data)) {
        // смещение времени может оказаться непредставимым при обратном
        // кодировании, это не ошибка декодера
        if let Ok(repacked) = pack_value(&value) {
            unpack_value(Bytes::from(repacked)).expect("re-encoded value must decode");
        }
    }

    // то же самое через полный конвейер (флаг сжатия + DEFLATE)
    let _ = from_bytes(data, Some(&MinData::new()), &Options::new());
});
