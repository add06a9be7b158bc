//! Benchmarks for print queue resolution and rendering.
//!
//! Synthetic hierarchies model a long refinement chain: machine `Mi` refines
//! `M(i-1)` and sees context `Ci`, which extends `C(i-1)`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use eventb_to_txt::model::{Artifact, Context, Identifier, LabeledPredicate, Machine};
use eventb_to_txt::phases::ordering;
use eventb_to_txt::registry::Registry;
use eventb_to_txt::render::RenderOptions;

fn refinement_chain(depth: usize) -> Registry {
    let mut registry = Registry::new();

    for i in 0..depth {
        let mut context = Context::new(format!("C{}", i), format!("m/C{}.buc", i));
        if i > 0 {
            context.extends = vec![format!("C{}", i - 1)];
        }
        context.constants = vec![Identifier {
            identifier: format!("k{}", i),
            comment: None,
        }];
        registry.register(Artifact::from(context)).unwrap();
    }

    for i in 0..depth {
        let mut machine = Machine::new(format!("M{}", i), format!("m/M{}.bum", i));
        if i > 0 {
            machine.refines = Some(format!("M{}", i - 1));
        }
        machine.sees = vec![format!("C{}", i)];
        machine.invariants = vec![LabeledPredicate {
            label: format!("inv{}", i),
            predicate: format!("x{} ∈ ℕ", i),
            theorem: None,
            comment: None,
        }];
        registry.register(Artifact::from(machine)).unwrap();
    }

    registry
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");

    for depth in [10, 100, 1000] {
        let registry = refinement_chain(depth);
        group.bench_with_input(BenchmarkId::new("chain", depth), &registry, |b, registry| {
            b.iter(|| ordering::resolve(black_box(registry)).unwrap())
        });
    }

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let registry = refinement_chain(100);
    let options = RenderOptions::default();

    c.bench_function("render_chain_100", |b| {
        b.iter(|| {
            registry
                .iter()
                .map(|artifact| artifact.render(black_box(&options)).len())
                .sum::<usize>()
        })
    });
}

criterion_group!(benches, bench_resolution, bench_rendering);
criterion_main!(benches);
