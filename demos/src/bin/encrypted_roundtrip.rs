use std::sync::Arc;

use mindata::{
    from_bytes, from_bytes_many, get_approach, to_bytes, to_bytes_many, MinData, MinDataResult,
    Options, Value,
};

fn main() -> MinDataResult<()> {
    println!("=== MinData Examples ===\n");

    example_1_encrypted()?;
    example_2_many()?;
    example_3_compression()?;

    println!("\n=== All examples completed successfully! ===");
    Ok(())
}

/// Пример 1: шифрование AES-GCM и поиск подхода по имени
fn example_1_encrypted() -> MinDataResult<()> {
    println!("Example 1: AES-GCM round trip");
    println!("-----------------------------");

    let data = vec!["Hello", "World!"];
    let key = b"01234567890123456789012345678912";

    let opts = Options::new()
        .with_approach(Arc::new(MinData::new()))
        .with_aes_gcm(key)?;
    let (bytes, name) = to_bytes(&Value::from(data.clone()), &opts)?;
    println!("Encrypted {} bytes with approach {name}", bytes.len());

    // подход восстанавливается по имени, возвращённому из to_bytes
    let approach = get_approach(&name)?;
    let back = from_bytes(&bytes, Some(approach.as_ref()), &Options::new().with_aes_gcm(key)?)?;

    match back {
        Value::StringSlice(words) => {
            println!("{}", words.join(" ") == data.join(" "));
        }
        other => println!("unexpected value: {other:?}"),
    }
    println!();
    Ok(())
}

/// Пример 2: несколько значений в одном буфере
fn example_2_many() -> MinDataResult<()> {
    println!("Example 2: multi-value buffer");
    println!("-----------------------------");

    let values = vec![
        Value::Int64(168),
        Value::from("Hello World"),
        Value::ptr(-42.0f32),
        Value::Nil,
    ];
    let opts = Options::new();
    let (bytes, name) = to_bytes_many(&values, &opts)?;
    let approach = get_approach(&name)?;
    let back = from_bytes_many(&bytes, Some(approach.as_ref()), &opts)?;

    for (i, v) in back.iter().enumerate() {
        println!("  [{i}] {v:?}");
    }
    println!("equal: {}\n", back == values);
    Ok(())
}

/// Пример 3: влияние порога сжатия на размер
fn example_3_compression() -> MinDataResult<()> {
    println!("Example 3: compression threshold");
    println!("--------------------------------");

    let value = Value::from("abc".repeat(100));
    for threshold in [-1, 25, 1000] {
        let opts = Options::new().with_compression_threshold(threshold);
        let (bytes, _) = to_bytes(&value, &opts)?;
        println!(
            "  threshold {threshold:>5}: {} bytes, flag {}",
            bytes.len(),
            bytes[0]
        );
    }
    Ok(())
}
