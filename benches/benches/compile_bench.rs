//! # Tile Compiler Benchmarks
//!
//! Measures the parse, validate and encode stages separately and end to end.
//!
//! Run: `cargo bench --bench compile_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_core::{compile, encode, parse, parse_expr, Compiler, TruthTable};

const ALU: &str = r#"
module adder {
    (w0 ~= n0) ~= e1 -> e0;
    (w0 & n0) | (e1 & (n0 ~= w0)) -> s0;
    w1 <-> e1;
}

module mux {
    (w0 & ~n0) | (e1 & n0) -> s1;
    n1 <-> s1;
}

module relay {
    w0 <-> e0;
    w1 <-> e1;
    n0 <-> s0;
    n1 <-> s1;
}

adder, mux, relay
"#;

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    group.bench_function("parse", |b| b.iter(|| black_box(parse(black_box(ALU)))));

    let program = parse(ALU).unwrap();
    let compiler = Compiler::default();
    group.bench_function("validate", |b| {
        b.iter(|| {
            for decl in &program.modules {
                let _ = black_box(compiler.build_module(decl));
            }
        })
    });

    let modules: Vec<_> = program
        .modules
        .iter()
        .map(|decl| compiler.build_module(decl).unwrap())
        .collect();
    group.bench_function("encode", |b| {
        b.iter(|| {
            for module in &modules {
                black_box(encode(module));
            }
        })
    });

    group.finish();
}

fn bench_truth_table(c: &mut Criterion) {
    let expr = parse_expr("~((w0 ~= n0) & (e1 | ~(w0 & n0)))").unwrap();
    c.bench_function("truth_table", |b| b.iter(|| black_box(TruthTable::of(black_box(&expr)))));
}

fn bench_end_to_end(c: &mut Criterion) {
    c.bench_function("compile", |b| b.iter(|| black_box(compile(black_box(ALU)))));
}

criterion_group!(benches, bench_stages, bench_truth_table, bench_end_to_end);
criterion_main!(benches);
