use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wiki_reconcile_engine::{ProjectionMode, locate, make_replacement_patch, parse_markup, project};
mod common;

fn bench_parse_and_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    for sections in [10, 100] {
        let article = common::generate_article(sections);
        group.bench_with_input(BenchmarkId::new("parse", sections), &article, |b, article| {
            b.iter(|| black_box(parse_markup(black_box(article))));
        });
        group.bench_with_input(
            BenchmarkId::new("project", sections),
            &article,
            |b, article| {
                b.iter(|| black_box(project(black_box(article), ProjectionMode::Full)));
            },
        );
    }

    group.finish();
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    group.sample_size(20);

    for sections in [10, 100] {
        let article = common::generate_article(sections);
        let excerpt = common::last_section_excerpt(sections);
        group.bench_with_input(
            BenchmarkId::new("exact_projection", sections),
            &article,
            |b, article| {
                b.iter(|| black_box(locate(black_box(&excerpt), black_box(article))));
            },
        );
    }

    // A miss walks every strategy
    let article = common::generate_article(10);
    group.bench_function("miss", |b| {
        b.iter(|| black_box(locate(black_box("nowhere to be found"), black_box(&article))));
    });

    group.finish();
}

fn bench_patch(c: &mut Criterion) {
    let article = common::generate_article(50);
    let patch = make_replacement_patch(common::last_section_excerpt(50), "Replaced text");

    c.bench_function("replacement_patch", |b| {
        b.iter(|| black_box(patch(black_box(&article))));
    });
}

criterion_group!(benches, bench_parse_and_project, bench_locate, bench_patch);
criterion_main!(benches);
