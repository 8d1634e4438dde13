//! Benchmarks for volstream.
//!
//! Run with:
//!     cargo bench

use std::io::{Read, SeekFrom, Write};

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use volstream::{GrowthPolicy, StreamConfig, VolatileStream};

fn bench_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");

    for size in [64 * 1024, 1024 * 1024, 10 * 1024 * 1024] {
        let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            format!("sequential_{}kb", size / 1024),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut stream = VolatileStream::open().unwrap();
                    for piece in data.chunks(4096) {
                        stream.write_all(black_box(piece)).unwrap();
                    }
                    black_box(stream.len().unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_growth_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth");
    let size = 1024 * 1024; // 1 MB
    let data = vec![0xA5u8; size];

    for (name, growth) in [
        ("doubling", GrowthPolicy::Doubling),
        ("page_aligned", GrowthPolicy::PageAligned { page_size: 4096 }),
    ] {
        let config = StreamConfig::default().with_growth(growth);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut stream = VolatileStream::open_with(config).unwrap();
                for piece in data.chunks(512) {
                    stream.write_all(piece).unwrap();
                }
                black_box(stream.capacity().unwrap())
            });
        });
    }

    group.finish();
}

fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    let size = 1024 * 1024; // 1 MB

    let mut stream = VolatileStream::open().unwrap();
    stream.write_all(&vec![1u8; size]).unwrap();

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("buffered", |b| {
        let mut buf = vec![0u8; 64 * 1024];
        b.iter(|| {
            stream.seek(SeekFrom::Start(0)).unwrap();
            let mut total = 0usize;
            loop {
                let n = Read::read(&mut stream, &mut buf).unwrap();
                if n == 0 {
                    break;
                }
                total += n;
            }
            black_box(total)
        });
    });

    group.bench_function("sparse_seek", |b| {
        b.iter(|| {
            let mut stream = VolatileStream::open().unwrap();
            stream.seek(SeekFrom::Start(black_box(size as u64))).unwrap();
            stream.write_all(b"X").unwrap();
            black_box(stream.len().unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_writes, bench_growth_policies, bench_reads);
criterion_main!(benches);
