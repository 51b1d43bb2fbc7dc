#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mindata::{from_bytes, to_bytes, MinData, Options, Value};

/// Подмножество значений, для которых сравнение на равенство
/// осмысленно (без чисел с плавающей точкой).
#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Nil,
    Int8(i8),
    Int64(i64),
    Uint16(u16),
    Uint64(u64),
    Bool(bool),
    Duration(i64),
    Int32Slice(Vec<i32>),
    BoolSlice(Vec<bool>),
    String(String),
    Strings(Vec<String>),
    Bytes(Vec<u8>),
    ByteSlices(Vec<Vec<u8>>),
    PtrInt64(i64),
    PtrString(String),
}

impl From<FuzzValue> for Value {
    fn from(v: FuzzValue) -> Self {
        match v {
            FuzzValue::Nil => Value::Nil,
            FuzzValue::Int8(x) => Value::Int8(x),
            FuzzValue::Int64(x) => Value::Int64(x),
            FuzzValue::Uint16(x) => Value::Uint16(x),
            FuzzValue::Uint64(x) => Value::Uint64(x),
            FuzzValue::Bool(x) => Value::Bool(x),
            FuzzValue::Duration(x) => Value::Duration(chrono::TimeDelta::nanoseconds(x)),
            FuzzValue::Int32Slice(x) => Value::Int32Slice(x),
            FuzzValue::BoolSlice(x) => Value::BoolSlice(x),
            FuzzValue::String(x) => Value::String(x),
            FuzzValue::Strings(x) => Value::StringSlice(x),
            FuzzValue::Bytes(x) => Value::from(x),
            FuzzValue::ByteSlices(x) => Value::from(x),
            FuzzValue::PtrInt64(x) => Value::ptr(x),
            FuzzValue::PtrString(x) => Value::ptr(x),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    value: FuzzValue,
    threshold: i8,
}

fuzz_target!(|input: FuzzInput| {
    let value = Value::from(input.value);
    let opts = Options::new().with_compression_threshold(i64::from(input.threshold));

    let (bytes, _) = to_bytes(&value, &opts).expect("supported value must encode");
    let back = from_bytes(&bytes, Some(&MinData::new()), &opts).expect("encoded value must decode");
    assert_eq!(back, value);
});
