use criterion::{criterion_group, criterion_main, Criterion};
use engine::corpus;
use engine::tokenizer::normalize;
use engine::Engine;

fn bench_normalize(c: &mut Criterion) {
    let text: String = corpus::sample().iter().map(|d| d.content.as_str()).collect::<Vec<_>>().join(" ");
    c.bench_function("normalize_sample_corpus", |b| b.iter(|| normalize(&text)));
}

fn bench_search(c: &mut Criterion) {
    let engine = Engine::new(corpus::sample());
    c.bench_function("search_exact", |b| b.iter(|| engine.search("risk management")));
    // misses every key, so each term scans the whole vocabulary
    c.bench_function("search_fuzzy_fallback", |b| b.iter(|| engine.search("complience regulashun")));
}

criterion_group!(benches, bench_normalize, bench_search);
criterion_main!(benches);
