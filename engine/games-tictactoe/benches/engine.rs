use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use game_core::{GameState, Player};
use games_tictactoe::{Move, State};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn midgame() -> State {
    State::from_layout("X O .\n. X .\nO . .", Player::X).unwrap()
}

fn bench_legal_actions(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_legal_actions");

    group.bench_function("empty_board", |b| {
        let state = State::new(3);
        b.iter(|| state.legal_actions());
    });

    group.bench_function("midgame", |b| {
        let state = midgame();
        b.iter(|| state.legal_actions());
    });

    group.finish();
}

fn bench_result(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_result");

    group.bench_function("midgame", |b| {
        let state = midgame();
        b.iter(|| state.result());
    });

    group.bench_function("five_by_five", |b| {
        let state = State::new(5);
        b.iter(|| state.result());
    });

    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_apply");
    group.bench_function("center", |b| {
        let state = State::new(3);
        let mv = Move {
            row: 1,
            col: 1,
            mover: Player::X,
        };
        b.iter(|| state.apply(&mv).unwrap());
    });
    group.finish();
}

fn bench_random_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_playout");
    group.bench_function("full_game", |b| {
        b.iter_batched(
            || ChaCha20Rng::seed_from_u64(42),
            |mut rng| {
                let mut state = State::new(3);
                while !state.is_terminal() {
                    let legal = state.legal_actions();
                    let mv = legal[rng.gen_range(0..legal.len())];
                    state = state.apply(&mv).unwrap();
                }
                state
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_legal_actions,
    bench_result,
    bench_apply,
    bench_random_playout
);
criterion_main!(benches);
