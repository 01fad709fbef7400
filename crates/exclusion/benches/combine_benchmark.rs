//! crates/exclusion/benches/combine_benchmark.rs
//!
//! Benchmarks for exclude-filter combination and evaluation.
//!
//! Run with: `cargo bench -p exclusion`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use exclusion::{ArtifactName, ExcludeFilter, ExclusionSession, ModuleId};

/// Generate `count` distinct edge excludes mixing every leaf kind.
fn generate_rules(count: usize) -> Vec<ExcludeFilter> {
    (0..count)
        .map(|index| match index % 4 {
            0 => ExcludeFilter::group(format!("org.vendor{index}")).unwrap(),
            1 => ExcludeFilter::module_name(format!("lib{index}")).unwrap(),
            2 => ExcludeFilter::module(ModuleId::new(format!("com.acme{index}"), "core")).unwrap(),
            _ => ExcludeFilter::artifact(
                ModuleId::new("com.acme", format!("dist{index}")),
                ArtifactName::new(format!("dist{index}"), "zip"),
            )
            .unwrap(),
        })
        .collect()
}

/// Benchmark plain union and intersection construction.
fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");

    for size in [4, 16, 64, 256] {
        let rules = generate_rules(size);

        group.bench_with_input(BenchmarkId::new("union", size), &rules, |b, rules| {
            b.iter(|| black_box(ExcludeFilter::union(black_box(rules).iter().cloned())));
        });
        group.bench_with_input(BenchmarkId::new("intersection", size), &rules, |b, rules| {
            b.iter(|| black_box(ExcludeFilter::intersection(black_box(rules).iter().cloned())));
        });
    }

    group.finish();
}

/// Benchmark session combination with a warm memo.
fn bench_session_memo(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_memo");

    for size in [4, 64] {
        let rules = generate_rules(size);
        let session = ExclusionSession::new();
        session.union(rules.iter().cloned());

        group.bench_with_input(BenchmarkId::new("union_hit", size), &rules, |b, rules| {
            b.iter(|| black_box(session.union(black_box(rules).iter().cloned())));
        });
    }

    group.finish();
}

/// Benchmark evaluation against a merged filter.
fn bench_accept(c: &mut Criterion) {
    let mut group = c.benchmark_group("accept");

    let rules = generate_rules(64);
    let first = ExcludeFilter::union(rules[..48].iter().cloned());
    let second = ExcludeFilter::union(rules[16..].iter().cloned());
    let merged = ExcludeFilter::intersection([first, second]);
    let module = ModuleId::new("org.unrelated", "widget");
    let artifact = ArtifactName::new("widget", "jar");

    group.bench_function("accept_module", |b| {
        b.iter(|| black_box(merged.accept_module(black_box(&module))));
    });
    group.bench_function("accept_artifact", |b| {
        b.iter(|| black_box(merged.accept_artifact(black_box(&module), black_box(&artifact))));
    });
    group.bench_function("accept_all_short_circuit", |b| {
        let everything = ExcludeFilter::accept_all();
        b.iter(|| black_box(everything.accept_module(black_box(&module))));
    });

    group.finish();
}

criterion_group!(benches, bench_combine, bench_session_memo, bench_accept);
criterion_main!(benches);
