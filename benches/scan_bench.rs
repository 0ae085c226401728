//! Benchmarks for csvscan.
//!
//! Run with:
//!     cargo bench

use std::io::{BufRead, BufReader, Cursor};

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use csvscan::{ScanConfig, Scanner};

/// Ratings-shaped input where one row in `every` has item 110.
fn ratings(rows: usize, every: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(rows * 24);
    for i in 0..rows {
        let item = if i % every == 0 { 110 } else { 200 + i % 5000 };
        let rating = (i * 7 + 3) % 10;
        let line = format!(
            "{},{},{}.{},{}\n",
            i / 20,
            item,
            rating / 2,
            (rating % 2) * 5,
            1_112_486_027 + i
        );
        out.extend_from_slice(line.as_bytes());
    }
    out
}

fn bench_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner");

    for rows in [10_000, 100_000, 1_000_000] {
        let data = ratings(rows, 100);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(format!("rows_{}", rows), &data, |b, data| {
            let mut scanner = Scanner::new(ScanConfig::new("110")).unwrap();
            b.iter(|| {
                scanner.reset();
                scanner.feed(&mut Cursor::new(black_box(data))).unwrap();
                black_box(scanner.result())
            });
        });
    }

    group.finish();
}

fn bench_buffer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_sizes");
    let data = ratings(200_000, 100);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for capacity in [4 * 1024, 64 * 1024, 1024 * 1024] {
        group.bench_function(format!("buffer_{}k", capacity / 1024), |b| {
            let config = ScanConfig::new("110").with_buffer_capacity(capacity);
            let mut scanner = Scanner::new(config).unwrap();
            b.iter(|| {
                scanner.reset();
                scanner.feed(&mut Cursor::new(black_box(&data))).unwrap();
                black_box(scanner.result())
            });
        });
    }

    group.finish();
}

fn bench_match_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_ratio");

    for every in [1, 10, 1000] {
        let data = ratings(200_000, every);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(format!("one_in_{}", every), &data, |b, data| {
            let mut scanner = Scanner::new(ScanConfig::new("110")).unwrap();
            b.iter(|| {
                scanner.reset();
                scanner.feed(&mut Cursor::new(black_box(data))).unwrap();
                black_box(scanner.result())
            });
        });
    }

    group.finish();
}

fn bench_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("baseline");
    let data = ratings(200_000, 100);
    group.throughput(Throughput::Bytes(data.len() as u64));

    // Owned line per record, split into a Vec, for comparison.
    group.bench_function("split_lines", |b| {
        b.iter(|| {
            let reader = BufReader::new(Cursor::new(black_box(&data)));
            let mut sum = 0f64;
            let mut count = 0u64;
            for line in reader.lines() {
                let line = line.unwrap();
                let parts: Vec<&str> = line.split(',').collect();
                if parts[1] == "110" {
                    sum += parts[2].parse::<f64>().unwrap();
                    count += 1;
                }
            }
            black_box((sum, count))
        });
    });

    group.bench_function("scanner", |b| {
        let mut scanner = Scanner::new(ScanConfig::new("110")).unwrap();
        b.iter(|| {
            scanner.reset();
            scanner.feed(&mut Cursor::new(black_box(&data))).unwrap();
            black_box(scanner.result())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scanner,
    bench_buffer_sizes,
    bench_match_ratio,
    bench_baseline
);
criterion_main!(benches);
