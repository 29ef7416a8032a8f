use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reward_draw::{DrawEngine, HistoryStore, MemoryStore, TierTable};

fn bench_draw(c: &mut Criterion) {
    let now = Utc::now();
    let mut engine = DrawEngine::seeded(TierTable::standard(), 1);

    c.bench_function("draw", |b| b.iter(|| engine.draw(black_box(&now))));
}

fn bench_record_full_history(c: &mut Criterion) {
    let now = Utc::now();
    let mut engine = DrawEngine::seeded(TierTable::standard(), 2);
    let mut history = HistoryStore::new(MemoryStore::new());
    for _ in 0..50 {
        if let Ok(result) = engine.draw(&now) {
            history.record(result);
        }
    }

    c.bench_function("record_full_history", |b| {
        b.iter(|| {
            if let Ok(result) = engine.draw(&now) {
                black_box(history.record(result));
            }
        })
    });
}

criterion_group!(benches, bench_draw, bench_record_full_history);
criterion_main!(benches);
