//! Gesture benchmark: Measure the pointer-move hot path.
//!
//! Target: < 100ns per move event through the session

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::{Duration, Instant};
use swipedeck::gesture::GestureTuning;
use swipedeck::{
    CardItem, Deck, DeckGenerator, Decision, GestureTracker, Point, PointerEvent, PointerKind, Session,
    SwipeConfig,
};

fn tuning_transform(c: &mut Criterion) {
    let tuning = GestureTuning::default();
    c.bench_function("tuning_transform", |b| {
        b.iter(|| tuning.transform(black_box(87.5), black_box(-23.0)))
    });
}

fn tracker_move(c: &mut Criterion) {
    let mut tracker = GestureTracker::default();
    tracker.pointer_down(Point::new(0.0, 0.0));
    let mut x = 0.0_f32;

    c.bench_function("tracker_pointer_move", |b| {
        b.iter(|| {
            x = (x + 1.0) % 240.0;
            tracker.pointer_move(black_box(Point::new(x - 120.0, 4.0)))
        })
    });
}

fn session_move(c: &mut Criterion) {
    let deck = Deck::new(vec![CardItem::new("c0", "img://0", "cat")]);
    let mut session = Session::with_deck(SwipeConfig::default(), DeckGenerator::default(), deck).unwrap();
    let target = session.top_id().unwrap();
    let now = Instant::now();
    session.pointer(
        &PointerEvent::new(PointerKind::Down, Point::new(0.0, 0.0), target.clone()),
        now,
    );
    let event = PointerEvent::new(PointerKind::Move, Point::new(64.0, 12.0), target);

    c.bench_function("session_pointer_move", |b| {
        b.iter(|| session.pointer(black_box(&event), now))
    });
}

fn full_deck(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide_full_deck");
    for size in [16_usize, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let config = SwipeConfig {
                deck_size: size,
                ..SwipeConfig::default()
            };
            b.iter(|| {
                let mut session = Session::with_defaults(config.clone()).unwrap();
                let mut now = Instant::now();
                while !session.is_exhausted() {
                    session.decide_top(Decision::Like, now);
                    now += Duration::from_millis(250);
                    session.tick(now);
                }
                black_box(session.summary().liked_count())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, tuning_transform, tracker_move, session_move, full_deck);
criterion_main!(benches);
