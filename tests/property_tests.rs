//! Property-based tests для MinData
//!
//! Генерируют случайные значения и проверяют roundtrip через кодек,
//! фреймер и полный конвейер трансформаций, а также устойчивость
//! декодера к повреждённым данным.

use bytes::Bytes;
use mindata::{
    codec::{pack_value, unpack_value},
    default_approach, from_bytes, from_bytes_many, to_bytes, to_bytes_many,
    transform::{compress, decompress},
    Options, Value,
};
use proptest::prelude::*;

use generators::*;

/// Базовая настройка proptest
const PROPTEST_CASES: u32 = 512;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: PROPTEST_CASES,
        .. ProptestConfig::default()
    })]

    /// Главный roundtrip тест: любое значение должно корректно pack -> unpack
    #[test]
    fn codec_roundtrip(value in any_value_strategy()) {
        let packed = pack_value(&value)
            .map_err(|e| TestCaseError::fail(format!("Failed to pack value: {e}")))?;
        let decoded = unpack_value(Bytes::from(packed))
            .map_err(|e| TestCaseError::fail(format!("Failed to unpack value: {e}")))?;
        prop_assert_eq!(decoded, value);
    }

    /// Roundtrip через полный конвейер с разными порогами сжатия
    #[test]
    fn pipeline_roundtrip(value in any_value_strategy(), threshold in -1i64..64) {
        let opts = Options::new().with_compression_threshold(threshold);
        let (bytes, name) = to_bytes(&value, &opts).unwrap();
        prop_assert_eq!(name, "MD1");
        let back = from_bytes(&bytes, Some(default_approach().as_ref()), &opts).unwrap();
        prop_assert_eq!(back, value);
    }

    /// Последовательности значений, включая пустую и с Nil
    #[test]
    fn many_roundtrip(values in value_sequence_strategy()) {
        let opts = Options::new();
        let (bytes, _) = to_bytes_many(&values, &opts).unwrap();
        let back = from_bytes_many(&bytes, Some(default_approach().as_ref()), &opts).unwrap();
        prop_assert_eq!(back.len(), values.len());
        prop_assert_eq!(back, values);
    }

    /// decompress(compress(x, t)) == x для любого порога
    #[test]
    fn compression_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..512), threshold in -5i64..600) {
        let out = compress(&data, threshold).unwrap();
        prop_assert!(out[0] == 0 || out[0] == 1);
        if threshold < 0 || data.len() as i64 <= threshold {
            prop_assert_eq!(out[0], 0);
            prop_assert_eq!(&out[1..], &data[..]);
        }
        if out[0] == 1 {
            prop_assert!(out.len() - 1 < data.len());
        }
        prop_assert_eq!(decompress(&out).unwrap(), data);
    }

    /// Усечение валидного буфера в любой точке даёт ошибку, а не панику
    #[test]
    fn truncation_never_panics(value in any_value_strategy(), cut in any::<prop::sample::Index>()) {
        let packed = pack_value(&value).unwrap();
        let cut = cut.index(packed.len());
        // результат не важен (для строк усечение даёт валидную строку короче)
        let _ = unpack_value(Bytes::copy_from_slice(&packed[..cut]));
    }

    /// Произвольные байты не вызывают панику ни в одном декодере
    #[test]
    fn random_bytes_never_panic(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let md = default_approach();
        let _ = unpack_value(Bytes::from(data.clone()));
        let _ = from_bytes(&data, Some(md.as_ref()), &Options::new());
        let _ = from_bytes_many(&data, Some(md.as_ref()), &Options::new());
    }

    /// Порча кадра multi-value после усечения всегда обнаруживается
    #[test]
    fn truncated_frame_is_error(values in value_sequence_strategy(), cut in any::<prop::sample::Index>()) {
        let opts = Options::new().with_compression_threshold(-1);
        let (bytes, _) = to_bytes_many(&values, &opts).unwrap();
        // отрезаем хотя бы один байт, но оставляем флаг
        let keep = 1 + cut.index(bytes.len() - 1);
        prop_assume!(keep < bytes.len());
        let res = from_bytes_many(&bytes[..keep], Some(default_approach().as_ref()), &opts);
        prop_assert!(res.is_err());
    }
}

/// Дополнительные unit тесты для специфичных случаев
#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_nil_is_one_byte() {
        let packed = pack_value(&Value::Nil).unwrap();
        assert_eq!(packed.len(), 1);
        assert_eq!(unpack_value(Bytes::from(packed)).unwrap(), Value::Nil);
    }

    #[test]
    fn test_nan_survives_roundtrip() {
        let packed = pack_value(&Value::Float64(f64::NAN)).unwrap();
        match unpack_value(Bytes::from(packed)).unwrap() {
            Value::Float64(f) => assert!(f.is_nan()),
            other => panic!("expected float64, got {other:?}"),
        }
    }
}
