use criterion::{Criterion, black_box, criterion_group, criterion_main};
use shiori_core::{Catalog, Normalizer, RawRecord, Recommender, RecommenderConfig};

const AUTHORS: &[&str] = &[
    "Frank Herbert",
    "Jane Austen",
    "J.R.R. Tolkien/Christopher Tolkien",
    "Ursula K. Le Guin",
    "Terry Pratchett/Neil Gaiman",
    "Octavia E. Butler",
];

const PUBLISHERS: &[&str] = &[
    "Ace Books",
    "Penguin Classics",
    "Houghton Mifflin Company",
    "Tor Books Inc.",
];

fn synthetic_rows(n: usize) -> Vec<RawRecord> {
    (0..n)
        .map(|i| {
            RawRecord::new(
                format!("The Chronicle of Volume {i} (Series #{})", i % 7),
                AUTHORS[i % AUTHORS.len()],
                PUBLISHERS[i % PUBLISHERS.len()],
                if i % 5 == 0 { "spa" } else { "eng" },
            )
        })
        .collect()
}

fn bench_recommender(c: &mut Criterion) {
    let normalizer = Normalizer::new().unwrap();
    let rows = synthetic_rows(2_000);
    let catalog = Catalog::from_raw(&normalizer, &rows);

    c.bench_function("normalize_catalog_2000", |b| {
        b.iter(|| Catalog::from_raw(&normalizer, black_box(&rows)));
    });

    c.bench_function("build_recommender_2000", |b| {
        b.iter(|| {
            Recommender::build(black_box(catalog.clone()), RecommenderConfig::default()).unwrap()
        });
    });

    let recommender = Recommender::build(catalog, RecommenderConfig::default()).unwrap();

    c.bench_function("recommend_title_hit", |b| {
        b.iter(|| recommender.recommend(black_box("volume 1999")).unwrap());
    });

    c.bench_function("recommend_not_found", |b| {
        b.iter(|| recommender.recommend(black_box("neuromancer")).unwrap());
    });
}

criterion_group!(benches, bench_recommender);
criterion_main!(benches);
