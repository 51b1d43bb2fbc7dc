use std::hint::black_box;

use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mindata::{
    codec::{pack_value, unpack_value},
    framer::{pack_many, unpack_many},
    MinData, Value,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn make_strings(
    count: usize,
    len: usize,
) -> Value {
    let s = "x".repeat(len);
    Value::StringSlice(vec![s; count])
}

fn make_i64s(count: usize) -> Value {
    let mut rng = SmallRng::seed_from_u64(42);
    Value::Int64Slice((0..count).map(|_| rng.gen()).collect())
}

fn bench_pack_scalar(c: &mut Criterion) {
    let v = Value::Int64(168);
    c.bench_function("pack int64", |b| {
        b.iter(|| black_box(pack_value(black_box(&v)).unwrap()))
    });

    let v = Value::ptr("hello world");
    c.bench_function("pack ptr string", |b| {
        b.iter(|| black_box(pack_value(black_box(&v)).unwrap()))
    });
}

fn bench_slices(c: &mut Criterion) {
    let mut group = c.benchmark_group("int64 slice");
    for &count in &[16usize, 1024, 65_536] {
        let v = make_i64s(count);
        let packed = Bytes::from(pack_value(&v).unwrap());
        group.throughput(Throughput::Bytes(packed.len() as u64));

        group.bench_with_input(BenchmarkId::new("pack", count), &v, |b, v| {
            b.iter(|| black_box(pack_value(v).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("unpack", count), &packed, |b, p| {
            b.iter(|| black_box(unpack_value(p.clone()).unwrap()))
        });
    }
    group.finish();
}

fn bench_string_slices(c: &mut Criterion) {
    let mut group = c.benchmark_group("string slice");
    for &(count, len) in &[(16usize, 8usize), (1024, 32), (128, 4096)] {
        let v = make_strings(count, len);
        let packed = Bytes::from(pack_value(&v).unwrap());
        group.throughput(Throughput::Bytes(packed.len() as u64));

        let id = format!("{count}x{len}");
        group.bench_with_input(BenchmarkId::new("pack", &id), &v, |b, v| {
            b.iter(|| black_box(pack_value(v).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("unpack", &id), &packed, |b, p| {
            b.iter(|| black_box(unpack_value(p.clone()).unwrap()))
        });
    }
    group.finish();
}

fn bench_framer(c: &mut Criterion) {
    let md = MinData::new();
    let values: Vec<Value> = (0..100)
        .map(|i| {
            if i % 2 == 0 {
                Value::Int64(i)
            } else {
                Value::from(format!("item-{i}"))
            }
        })
        .collect();
    let framed = Bytes::from(pack_many(&md, &values).unwrap());

    c.bench_function("pack_many 100", |b| {
        b.iter(|| black_box(pack_many(&md, black_box(&values)).unwrap()))
    });
    c.bench_function("unpack_many 100", |b| {
        b.iter(|| black_box(unpack_many(&md, framed.clone()).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_pack_scalar,
    bench_slices,
    bench_string_slices,
    bench_framer
);
criterion_main!(benches);
