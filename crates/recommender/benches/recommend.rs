//! Benchmarks for similarity lookups
//!
//! Run with: cargo bench --package recommender
//!
//! Uses a synthetic catalog about the size of the TMDB 5000 dataset.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use data_loader::{Catalog, Movie, SimilarityMatrix};
use recommender::SimilarityRecommender;
use std::sync::Arc;

const SIZE: usize = 4800;

fn synthetic_catalog() -> Arc<Catalog> {
    let rows = (0..SIZE)
        .map(|i| {
            (0..SIZE)
                .map(|j| ((i * 31 + j * 17) % 1000) as f32 / 1000.0)
                .collect()
        })
        .collect();
    let movies = (0..SIZE)
        .map(|i| Movie::new(i as u32, format!("Movie {}", i)))
        .collect();

    let matrix = SimilarityMatrix::from_rows(rows).expect("Failed to build matrix");
    Arc::new(Catalog::new(movies, matrix).expect("Failed to build catalog"))
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = SimilarityRecommender::new(synthetic_catalog());

    c.bench_function("recommend_top_10", |b| {
        b.iter(|| {
            let recs = recommender.recommend(black_box("Movie 2400"), black_box(10));
            black_box(recs)
        })
    });

    c.bench_function("recommend_full_ranking", |b| {
        b.iter(|| {
            let recs = recommender.recommend(black_box("Movie 2400"), black_box(SIZE));
            black_box(recs)
        })
    });
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);
