use anemoi_jive::anemoi::{Anemoi, AnemoiParams, DerivationCache, State};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn patterned_state(params: &AnemoiParams) -> State {
    let field = params.field();
    let n = params.branches().count() as u64;
    State::new(
        (0..n).map(|i| field.from_u64(7 * i + 3)).collect(),
        (0..n).map(|i| field.from_u64(11 * i + 5)).collect(),
    )
}

fn bench_permute(c: &mut Criterion) {
    let mut group = c.benchmark_group("permute");
    for branches in 1..=4usize {
        let params = AnemoiParams::bn254(branches, 5).expect("valid parameters");
        let state = patterned_state(&params);
        let anemoi = Anemoi::new(params);

        group.bench_with_input(BenchmarkId::from_parameter(branches), &state, |b, st| {
            b.iter(|| black_box(anemoi.permute(st).expect("valid state")));
        });
    }
    group.finish();
}

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("jive_with_derivation");
    let params = AnemoiParams::bn254(2, 5).expect("valid parameters");
    let state = patterned_state(&params);

    group.bench_function("uncached", |b| {
        b.iter(|| {
            let anemoi = Anemoi::new(params.clone());
            black_box(anemoi.compress(&state).expect("valid state"))
        });
    });

    let cache = DerivationCache::new();
    group.bench_function("cached", |b| {
        b.iter(|| {
            let anemoi = Anemoi::with_cache(params.clone(), &cache);
            black_box(anemoi.compress(&state).expect("valid state"))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_permute, bench_derivation);
criterion_main!(benches);
