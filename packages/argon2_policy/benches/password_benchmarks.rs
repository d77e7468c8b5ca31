//! Benchmarks for hashing, verification and the rehash check
//!
//! Hashing cost is dominated by Argon2 itself; the interesting numbers are how
//! the profiles compare and how cheap rejection and the rehash check are.

use argon2_policy::{profiles, PasswordHasher, Runtime};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// Hash and verify under the cheap and recommended profiles
fn benchmark_profiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("argon2_profiles");
    group.sample_size(10);

    for (name, params) in [
        ("CHEAPEST", profiles::CHEAPEST),
        ("RFC_9106_LOW_MEMORY", profiles::RFC_9106_LOW_MEMORY),
    ] {
        let hasher = PasswordHasher::from_parameters(params, Runtime::Native)
            .expect("profile should be valid");
        let stored = hasher.hash("benchmark password").expect("hash should succeed");

        group.bench_with_input(BenchmarkId::new("hash", name), &hasher, |b, hasher| {
            b.iter(|| {
                let hash = hasher.hash("benchmark password").expect("hash should succeed");
                std::hint::black_box(hash);
            });
        });

        group.bench_with_input(BenchmarkId::new("verify", name), &stored, |b, stored| {
            b.iter(|| {
                let ok = hasher
                    .verify(stored, "benchmark password")
                    .expect("verify should succeed");
                std::hint::black_box(ok);
            });
        });
    }
    group.finish();
}

/// Work that never touches Argon2
fn benchmark_policy_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_overhead");

    let hasher = PasswordHasher::from_parameters(profiles::CHEAPEST, Runtime::Native)
        .expect("profile should be valid");
    let stored = hasher.hash("benchmark password").expect("hash should succeed");

    group.bench_function("check_needs_rehash", |b| {
        b.iter(|| {
            let needs = hasher
                .check_needs_rehash(&stored)
                .expect("stored hash should parse");
            std::hint::black_box(needs);
        });
    });

    group.bench_function("reject_foreign_header", |b| {
        b.iter(|| {
            let result = hasher.verify("$2b$12$R9h/cIPz0gi.URNNX3kh2O", "benchmark password");
            std::hint::black_box(result.is_err());
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_profiles, benchmark_policy_overhead);
criterion_main!(benches);
