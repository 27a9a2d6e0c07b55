//! Reduction and evaluation benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench reduction
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lof_rs::eval::Evaluator;
use lof_rs::form::Form;
use lof_rs::generator::{deep_calling, mixed, reducible, wide_crossing, FormGenerator, GeneratorConfig};
use lof_rs::parser::parse;
use lof_rs::reduce::ReductionEngine;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A batch of random forms of bounded depth, drawn from a fixed seed.
fn random_batch(depth: usize, count: usize, seed: u64) -> Vec<Form> {
    let config = GeneratorConfig::new(depth, 3).with_seed(seed);
    FormGenerator::new(config).generate_batch(count)
}

// ============================================================================
// Benchmark: Reduction of random forms by depth
// ============================================================================

fn bench_reduce_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce/random");

    for depth in [2, 4, 6, 8] {
        let forms = random_batch(depth, 100, 42);
        let total_size: usize = forms.iter().map(Form::size).sum();
        group.throughput(Throughput::Elements(total_size as u64));
        group.bench_with_input(BenchmarkId::new("depth", depth), &forms, |b, forms| {
            let engine = ReductionEngine::default();
            b.iter(|| forms.iter().map(|f| engine.reduce(f)).filter(Form::is_simple_mark).count());
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Adversarial shapes
// ============================================================================

fn bench_adversarial(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce/adversarial");

    for n in [8, 32, 128] {
        let cases = [
            ("deep_calling", deep_calling(n)),
            ("wide_crossing", wide_crossing(n)),
            ("mixed", mixed(n / 4, 3)),
            ("reducible", reducible(n)),
        ];
        for (name, form) in cases {
            group.bench_with_input(BenchmarkId::new(name, n), &form, |b, form| {
                let engine = ReductionEngine::default();
                b.iter(|| engine.reduce(form));
            });
        }
    }

    group.finish();
}

// ============================================================================
// Benchmark: Trace recording overhead
// ============================================================================

fn bench_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce/trace");
    let form = mixed(6, 3);

    let engine = ReductionEngine::default();
    group.bench_function("reduce", |b| b.iter(|| engine.reduce(&form)));
    group.bench_function("reduce_with_trace", |b| b.iter(|| engine.reduce_with_trace(&form)));

    group.finish();
}

// ============================================================================
// Benchmark: Direct evaluation versus reduction
// ============================================================================

fn bench_evaluate_vs_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval/vs_reduce");

    for depth in [4, 8] {
        let forms = random_batch(depth, 100, 7);
        let evaluator = Evaluator::new();
        group.bench_with_input(BenchmarkId::new("evaluate", depth), &forms, |b, forms| {
            b.iter(|| evaluator.count_true(forms));
        });
        group.bench_with_input(BenchmarkId::new("reduce", depth), &forms, |b, forms| {
            b.iter(|| forms.iter().filter(|f| evaluator.engine().reduce(f).is_simple_mark()).count());
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Parsing
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    // Random bracket strings, balanced by construction.
    for len in [64, 1024] {
        let mut text = String::new();
        let mut open = 0;
        while text.chars().count() < len {
            if open > 0 && rng.random_bool(0.5) {
                text.push('⟩');
                open -= 1;
            } else {
                text.push('⟨');
                open += 1;
            }
        }
        text.extend(std::iter::repeat('⟩').take(open));

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("len", len), &text, |b, text| {
            b.iter(|| parse(text));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_reduce_random,
    bench_adversarial,
    bench_trace,
    bench_evaluate_vs_reduce,
    bench_parse,
);

criterion_main!(benches);
