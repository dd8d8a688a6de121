use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use streetkey::{AddressParser, split_street_number, street_number_close};

const CORPUS: &[&str] = &[
    "2 The St",
    "2-4 The St",
    "unit 2a/62 The St",
    "lot 1,55 Mars St",
    "SOLD1/77 Surrey Rd",
    "A and B/149 Manning Road",
    "202&203&204 Melville Parade",
    "FL 1 12/4-8 Queen Street",
    "201 (Rear) Bishopsgate Street",
    "18/9 Petrea Place",
];

fn bench_canonicalize(c: &mut Criterion) {
    let parser = AddressParser::new();
    c.bench_function("canonicalize_corpus", |b| {
        b.iter(|| {
            for short in CORPUS {
                let _ = black_box(parser.parse(black_box(short)));
            }
        })
    });
}

fn bench_decompose(c: &mut Criterion) {
    c.bench_function("split_street_number", |b| {
        b.iter(|| {
            for number in ["1", "1A", "1&1A", "1/2-4", "A&B/2&4", "38-42/2"] {
                black_box(split_street_number(black_box(number)));
            }
        })
    });

    c.bench_function("street_number_close", |b| {
        b.iter(|| black_box(street_number_close(black_box("1A"), black_box("1-3"))))
    });
}

criterion_group!(benches, bench_canonicalize, bench_decompose);
criterion_main!(benches);
