#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tagtree::scanner::scan;
use tagtree::Document;

fn large_document() -> String {
    let sample = include_str!("../tests/input/sample.xml");
    let note = sample
        .find("<note")
        .and_then(|start| sample.get(start..))
        .unwrap();
    let mut input = String::from("<notes>\n");
    for _ in 0..500 {
        for line in note.lines() {
            input.push('\t');
            input.push_str(line);
            input.push('\n');
        }
    }
    input.push_str("</notes>\n");
    input
}

fn bench_scan(c: &mut Criterion) {
    let input = large_document();

    c.bench_function("scan_top_level", |b| b.iter(|| scan(black_box(&input)).len()));
}

fn bench_load(c: &mut Criterion) {
    let input = large_document();

    c.bench_function("load_document", |b| {
        b.iter(|| Document::parse(black_box(&input)).unwrap())
    });
}

fn bench_print(c: &mut Criterion) {
    let document = Document::parse(&large_document()).unwrap();

    c.bench_function("print_document", |b| b.iter(|| black_box(&document).print()));
}

criterion_group!(benches, bench_scan, bench_load, bench_print);
criterion_main!(benches);
