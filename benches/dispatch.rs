//! Dispatch cost of hand-written, free-function and composed visitors.
//!
//! Run with: cargo bench --bench dispatch

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use value_visit::{
    CategoryList, ComposedVisitor, FreeVisitor, List, Positional, Visitor, VisitableContainer,
    capability,
};

fn build_list(len: usize) -> List {
    let mut list = List::with_capacity(len);
    for i in 0..len {
        match i % 3 {
            0 => list.push(i as i64),
            1 => list.push(i as f64),
            _ => list.push(format!("item-{i}")),
        }
    }
    list
}

#[derive(Default)]
struct Manual {
    total: f64,
    chars: usize,
}

impl Visitor<'_, Positional> for Manual {
    fn categories(&self) -> CategoryList {
        CategoryList::SCALAR
    }

    fn visit_integral(&mut self, _: usize, value: i64) -> bool {
        self.total += value as f64;
        true
    }

    fn visit_floating(&mut self, _: usize, value: f64) -> bool {
        self.total += value;
        true
    }

    fn visit_string(&mut self, _: usize, value: &str) -> bool {
        self.chars += value.len();
        true
    }
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for len in [100, 10_000] {
        let list = build_list(len);

        group.bench_with_input(BenchmarkId::new("manual", len), &list, |b, list| {
            b.iter(|| {
                let mut visitor = Manual::default();
                list.iterate(&mut visitor);
                black_box((visitor.total, visitor.chars))
            });
        });

        group.bench_with_input(BenchmarkId::new("free", len), &list, |b, list| {
            b.iter(|| {
                let mut integral = 0.0;
                let mut floating = 0.0;
                let mut chars = 0;
                let mut visitor = FreeVisitor::<capability::Scalar<Positional>>::builder()
                    .integral(|_: usize, value: i64| {
                        integral += value as f64;
                        true
                    })
                    .floating(|_: usize, value: f64| {
                        floating += value;
                        true
                    })
                    .string(|_: usize, value: &str| {
                        chars += value.len();
                        true
                    })
                    .build()
                    .unwrap();
                list.iterate(&mut visitor);
                drop(visitor);
                black_box((integral + floating, chars))
            });
        });

        group.bench_with_input(BenchmarkId::new("composed", len), &list, |b, list| {
            b.iter(|| {
                let mut numbers = Manual::default();
                let mut chars = 0;
                let text = FreeVisitor::<capability::String<Positional>>::builder()
                    .string(|_: usize, value: &str| {
                        chars += value.len();
                        true
                    })
                    .build()
                    .unwrap();
                let mut visitor = ComposedVisitor::<capability::Scalar<Positional>>::builder()
                    .with(NumbersOnly(&mut numbers))
                    .with(text)
                    .build()
                    .unwrap();
                list.iterate(&mut visitor);
                drop(visitor);
                black_box((numbers.total, chars))
            });
        });
    }

    group.finish();
}

/// Restricts [`Manual`] to the numeric categories.
struct NumbersOnly<'a>(&'a mut Manual);

impl Visitor<'_, Positional> for NumbersOnly<'_> {
    fn categories(&self) -> CategoryList {
        CategoryList::NUMERIC
    }

    fn visit_integral(&mut self, index: usize, value: i64) -> bool {
        self.0.visit_integral(index, value)
    }

    fn visit_floating(&mut self, index: usize, value: f64) -> bool {
        self.0.visit_floating(index, value)
    }
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
