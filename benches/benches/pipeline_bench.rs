use std::{hint::black_box, sync::Arc};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mindata::{
    default_approach, from_bytes,
    transform::{compress, decompress, DEFAULT_COMPRESSION_THRESHOLD},
    to_bytes, MinData, Options, Value,
};

fn bench_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression");
    for &size in &[32usize, 1024, 64 * 1024] {
        let data: Vec<u8> = (0..size).map(|i| (i % 17) as u8).collect();
        let compressed = compress(&data, DEFAULT_COMPRESSION_THRESHOLD).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("compress", size), &data, |b, d| {
            b.iter(|| black_box(compress(d, DEFAULT_COMPRESSION_THRESHOLD).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("decompress", size), &compressed, |b, d| {
            b.iter(|| black_box(decompress(d).unwrap()))
        });
    }
    group.finish();
}

fn bench_to_from_bytes(c: &mut Criterion) {
    let value = Value::from(vec!["Hello"; 256]);
    let approach = default_approach();

    let variants = [
        ("plain", Options::new().with_compression_threshold(-1)),
        ("deflate", Options::new()),
        (
            "deflate+aes256",
            Options::new()
                .with_approach(Arc::new(MinData::new()))
                .with_aes_gcm(&[7u8; 32])
                .unwrap(),
        ),
    ];

    let mut group = c.benchmark_group("to_from_bytes");
    for (name, opts) in &variants {
        let (bytes, _) = to_bytes(&value, opts).unwrap();
        group.bench_function(BenchmarkId::new("to_bytes", name), |b| {
            b.iter(|| black_box(to_bytes(black_box(&value), opts).unwrap()))
        });
        group.bench_function(BenchmarkId::new("from_bytes", name), |b| {
            b.iter(|| black_box(from_bytes(&bytes, Some(approach.as_ref()), opts).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compression, bench_to_from_bytes);
criterion_main!(benches);
