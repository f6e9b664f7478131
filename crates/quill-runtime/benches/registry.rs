//! Registry hot-path benchmarks: merged lookup (hit and miss) and define.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quill_runtime::{Environment, FunctionRegistry, Value};

fn seeded_registry(env: &Environment, functions: usize) -> FunctionRegistry {
    let registry = FunctionRegistry::new();
    for i in 0..functions {
        registry
            .register_variadic(env, &format!("fn_{}", i), |args| {
                Ok(Value::Number(args.len() as f64))
            })
            .unwrap();
    }
    registry
}

fn bench_lookup_hit(c: &mut Criterion) {
    let env = Environment::new("bench");
    let registry = seeded_registry(&env, 200);
    c.bench_function("lookup_hit", |b| {
        b.iter(|| registry.lookup(&env, black_box("fn_100")))
    });
}

fn bench_lookup_root_fallback(c: &mut Criterion) {
    let env = Environment::new("bench");
    let registry = seeded_registry(&Environment::root(), 200);
    // Force the environment table into existence so the merge spans both.
    registry
        .register_variadic(&env, "local", |_| Ok(Value::Null))
        .unwrap();
    c.bench_function("lookup_root_fallback", |b| {
        b.iter(|| registry.lookup(&env, black_box("fn_100")))
    });
}

fn bench_lookup_miss(c: &mut Criterion) {
    let env = Environment::new("bench");
    let registry = seeded_registry(&env, 200);
    c.bench_function("lookup_miss", |b| {
        b.iter(|| registry.lookup(&env, black_box("absent")))
    });
}

fn bench_define(c: &mut Criterion) {
    let env = Environment::new("bench");
    let registry = FunctionRegistry::new();
    c.bench_function("define", |b| {
        b.iter(|| {
            registry
                .register_variadic(&env, black_box("hot"), |_| Ok(Value::Null))
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_lookup_hit,
    bench_lookup_root_fallback,
    bench_lookup_miss,
    bench_define
);
criterion_main!(benches);
