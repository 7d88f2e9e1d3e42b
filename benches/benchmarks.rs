use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pellet::agents::{better_evaluation, Evaluation};
use pellet::env::Direction;
use pellet::game::{layouts, Game, GameState};
use pellet::mdp::{GridWorld, Schedule, ValueIterationAgent};
use pellet::search::{self, Strategy};

fn game_step_circle(c: &mut Criterion) {
    let game = Game::parse(
        r#"
        %%%%%%
        %    %
        %P%% %
        %    %
        %%%%%%"#,
    )
    .unwrap();

    c.bench_function("game_step_circle", |b| {
        b.iter(|| {
            use Direction::*;
            let mut game = game.clone();
            for dir in [Up, Right, Right, Right, Down, Down, Left, Left, Left, Up] {
                game = game.successor(0, black_box(dir));
            }
            game
        })
    });
}

fn game_step_random(c: &mut Criterion) {
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    let game = Game::parse(layouts::SMALL_CLASSIC).unwrap();

    c.bench_function("game_step_random", |b| {
        b.iter(|| {
            let mut rng = SmallRng::seed_from_u64(0);
            let mut game = game.clone();
            for _ in 0..100 {
                for i in 0..game.num_agents() {
                    if let Some(&action) = game.legal_actions(i).choose(&mut rng) {
                        game = game.successor(i, action);
                    }
                }
                if game.is_terminal() {
                    break;
                }
            }
        })
    });
}

fn better_heuristic(c: &mut Criterion) {
    let game = Game::parse(layouts::SMALL_CLASSIC).unwrap();

    c.bench_function("better_heuristic", |b| {
        b.iter(|| better_evaluation(black_box(&game)))
    });
}

fn tree_search(c: &mut Criterion) {
    let game = Game::parse(layouts::MINIMAX_CLASSIC).unwrap();

    let mut group = c.benchmark_group("tree_search");
    for strategy in [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Expectimax] {
        group.bench_function(format!("{strategy:?}"), |b| {
            b.iter(|| {
                search::tree_search(
                    black_box(&game),
                    black_box(2),
                    strategy,
                    &Evaluation::Better,
                )
            })
        });
    }
    group.finish();
}

fn value_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_iteration");
    for name in ["book", "discount"] {
        let mdp = GridWorld::get(name).unwrap();
        for schedule in [
            Schedule::Batch,
            Schedule::Cyclic,
            Schedule::PrioritizedSweeping { theta: 1e-5 },
        ] {
            group.bench_function(format!("{name} {schedule:?}"), |b| {
                b.iter(|| {
                    ValueIterationAgent::solve(black_box(&mdp), 0.9, schedule, black_box(100))
                        .value(&mdp.start().unwrap())
                })
            });
        }
    }
    group.finish();
}

criterion_group!(
    benches,
    game_step_circle,
    game_step_random,
    better_heuristic,
    tree_search,
    value_iteration,
);
criterion_main!(benches);
