// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_environment`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Once;

use understory_environment::{
    Element, Environment, EnvironmentValues, Overrides, ResolutionCache, environment_key, render,
};

environment_key! {
    /// Primary axis under test.
    Value: i32 = 0;
    /// Padding keys to grow the snapshot.
    K0: u32 = 0;
    /// Padding key.
    K1: u32 = 0;
    /// Padding key.
    K2: u32 = 0;
    /// Padding key.
    K3: u32 = 0;
    /// Padding key.
    K4: u32 = 0;
    /// Padding key.
    K5: u32 = 0;
    /// Padding key.
    K6: u32 = 0;
    /// Padding key.
    K7: u32 = 0;
    /// Text axis, to measure clone cost on lookup.
    Text: String = String::new();
}

fn padded() -> EnvironmentValues {
    let overrides = Overrides::new()
        .set::<K0>(1)
        .set::<K1>(1)
        .set::<K2>(1)
        .set::<K3>(1)
        .set::<K4>(1)
        .set::<K5>(1)
        .set::<K6>(1)
        .set::<K7>(1);
    EnvironmentValues::new().with_overrides(&overrides)
}

fn bench_environment(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: EnvironmentValues={} Overrides={} ErasedValue={}",
            core::mem::size_of::<EnvironmentValues>(),
            core::mem::size_of::<Overrides>(),
            core::mem::size_of::<understory_environment::ErasedValue>(),
        );
    });

    let empty = EnvironmentValues::new();
    let padded = padded();
    let with_value = padded.with_override::<Value>(7);

    let mut group = c.benchmark_group("environment/get");

    group.bench_function("default/empty", |b| {
        b.iter(|| black_box(empty.get::<Value>()));
    });

    group.bench_function("default/padded", |b| {
        b.iter(|| black_box(padded.get::<Value>()));
    });

    group.bench_function("override/padded", |b| {
        b.iter(|| black_box(with_value.get::<Value>()));
    });

    let with_text =
        padded.with_override::<Text>("hello world hello world hello world".to_string());
    group.bench_function("override/string_clone", |b| {
        b.iter(|| black_box(with_text.get::<Text>()));
    });
    group.bench_function("override/string_ref", |b| {
        b.iter(|| black_box(with_text.get_explicit::<Text>().map(String::len)));
    });

    group.finish();

    let mut group = c.benchmark_group("environment/derive");

    group.bench_function("with_override/empty", |b| {
        b.iter(|| black_box(empty.with_override::<Value>(1)));
    });

    group.bench_function("with_override/padded", |b| {
        b.iter(|| black_box(padded.with_override::<Value>(1)));
    });

    let edge = Overrides::new().set::<Value>(1).set::<K3>(2).set::<Value>(3);
    group.bench_function("with_overrides/three_bindings", |b| {
        b.iter(|| black_box(padded.with_overrides(&edge)));
    });

    group.finish();

    let mut group = c.benchmark_group("environment/render");

    for depth in [4_usize, 16, 64] {
        group.bench_with_input(BenchmarkId::new("nested_scopes", depth), &depth, |b, &depth| {
            let mut tree = Element::from_fn(|env| Element::text(env.get::<Value>().to_string()));
            for i in 0..depth {
                tree = Element::stack([tree]).environment::<Value>(i32::try_from(i).unwrap());
            }
            b.iter(|| black_box(render(&tree, &empty)));
        });
    }

    group.finish();

    let mut group = c.benchmark_group("environment/cache");

    group.bench_function("resolve/hit", |b| {
        let mut cache = ResolutionCache::<u32>::new();
        cache.resolve::<Value>(1, Environment::new(&with_value));
        b.iter(|| black_box(cache.resolve::<Value>(1, Environment::new(&with_value))));
    });

    group.bench_function("resolve/invalidate", |b| {
        b.iter_batched(
            || {
                let mut cache = ResolutionCache::<u32>::new();
                cache.resolve::<Value>(1, Environment::new(&padded));
                cache
            },
            |mut cache| black_box(cache.resolve::<Value>(1, Environment::new(&with_value))),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_environment);
criterion_main!(benches);
