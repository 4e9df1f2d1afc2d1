use std::sync::Arc;

use batch_selfplay::nn::{encode_position_for_nn, FillEmptyHistory, InputFormat, RandomPolicy};
use batch_selfplay::rules::{GameTree, Opening, STARTING_FEN};
use batch_selfplay::training::{MultiGameSelfPlay, PlayerOptions, SelfPlayConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Full lock-step runs with a growing number of concurrent games
fn bench_multi_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_game");
    let config = SelfPlayConfig::default().with_max_plies(40);

    for games in [1usize, 8, 32].iter() {
        let openings = vec![Opening::startpos(); *games];
        group.bench_with_input(BenchmarkId::from_parameter(games), games, |b, _| {
            b.iter(|| {
                let mut play = MultiGameSelfPlay::new(
                    PlayerOptions::new(Arc::new(RandomPolicy::new(1))),
                    PlayerOptions::new(Arc::new(RandomPolicy::new(2))),
                    black_box(&openings),
                    None,
                    config.clone(),
                )
                .expect("valid openings");
                play.play().expect("self-play failed");
                black_box(play.summary())
            });
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let opening = Opening::startpos().with_moves(["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"]);
    let tree = GameTree::from_opening(&opening, None).expect("valid opening");
    assert_eq!(tree.start_fen(), STARTING_FEN);

    c.bench_function("encode_position", |b| {
        b.iter(|| {
            encode_position_for_nn(
                InputFormat::Classical,
                black_box(tree.position_history()),
                8,
                FillEmptyHistory::FenOnly,
            )
        });
    });
}

criterion_group!(benches, bench_multi_game, bench_encode);
criterion_main!(benches);
