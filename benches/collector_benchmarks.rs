use criterion::{black_box, criterion_group, criterion_main, Criterion};
use socialloader::collector::{clean_line, split_urls};
use socialloader::utils::URL_PLACEHOLDER;

fn benchmark_clean_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("Line Cleaning");

    group.bench_function("plain", |b| {
        b.iter(|| clean_line(black_box("https://youtu.be/dQw4w9WgXcQ")))
    });

    group.bench_function("quoted", |b| {
        b.iter(|| clean_line(black_box("  \"https://www.instagram.com/p/Cabc123/\",  ")))
    });

    let long_line = format!("'{}',", "a".repeat(2000));
    group.bench_function("long", |b| b.iter(|| clean_line(black_box(&long_line))));

    group.finish();
}

fn benchmark_split_urls(c: &mut Criterion) {
    let mut group = c.benchmark_group("URL Splitting");

    for count in [1usize, 10, 100, 1000] {
        let mut raw = String::from(URL_PLACEHOLDER);
        for i in 0..count {
            raw.push_str(&format!("\n  'https://www.youtube.com/watch?v={:011}',\n", i));
        }

        group.bench_function(format!("{} urls", count), |b| {
            b.iter(|| split_urls(black_box(&raw), URL_PLACEHOLDER))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_clean_line, benchmark_split_urls);
criterion_main!(benches);
