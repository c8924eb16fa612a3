//! Hit-test performance benchmarks.
//!
//! Hit-testing runs on every pointer move, so it must stay constant-time
//! regardless of how many stories are loaded or how far the row is scrolled.
//!
//! Run with: cargo bench --bench hit_test

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use storystrip::strip::{compute_layout, HitTester, Layout, LayoutInput, SmallStyle, StripStyle};

/// Layout of `items` stories in a 120-column viewport scrolled to the middle.
fn layout_for(items: usize, ratio: f64) -> Layout {
    let style = StripStyle::default();
    let scroll_left = style.full.content_width(items) / 2;
    let input = LayoutInput {
        scroll_left,
        last_ratio: ratio,
        ..LayoutInput::new(items, 120)
    };
    compute_layout(&input, &style, 1.0)
}

/// Hit-testing should not depend on the number of items.
fn benchmark_hit_test_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test_scaling");
    let tester = HitTester::new(SmallStyle::default(), false);

    for items in [10usize, 1_000, 100_000] {
        let layout = layout_for(items, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(items), &layout, |b, layout| {
            b.iter(|| {
                for x in 0..120 {
                    black_box(tester.test(black_box(layout), f64::from(x)));
                }
            });
        });
    }

    group.finish();
}

/// Mid-transition layouts take the blended path through every boundary.
fn benchmark_hit_test_transition(c: &mut Criterion) {
    let tester = HitTester::new(SmallStyle::default(), true);
    let layout = layout_for(50, 0.5);

    c.bench_function("hit_test_transition", |b| {
        b.iter(|| {
            for x in -10..130 {
                black_box(tester.test(black_box(&layout), f64::from(x)));
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_hit_test_scaling,
    benchmark_hit_test_transition
);
criterion_main!(benches);
