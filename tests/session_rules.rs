use std::time::Duration;

use classic_snake::game::{
    Cell, Direction, EndReason, GameConfig, GameOverSignal, Phase, Session, StepResult,
    TurnResult,
};
use classic_snake::leaderboard::{Leaderboard, LeaderboardEntry, MAX_ENTRIES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn new_game(seed: u64) -> Session<StdRng> {
    let mut session =
        Session::with_rng(GameConfig::default(), StdRng::seed_from_u64(seed)).unwrap();
    session.start_new_game();
    session
}

fn expected_interval(score: u32) -> Duration {
    Duration::from_millis(400u64.saturating_sub(2 * score as u64).max(100))
}

#[test]
fn first_tick_moves_head_right() {
    let mut session = new_game(1);
    assert_eq!(session.snake().head(), Cell::new(5, 5));
    assert_eq!(session.snake().len(), 3);

    session.tick();

    assert_eq!(session.snake().head(), Cell::new(6, 5));
    assert_eq!(session.snake().len(), 3);
}

#[test]
fn reverse_turn_is_rejected() {
    let mut session = new_game(2);
    let head = session.snake().head();

    assert_eq!(session.set_direction(Direction::Left), TurnResult::Rejected);
    assert_eq!(session.direction(), Direction::Right);
    assert_eq!(session.snake().head(), head);
}

#[test]
fn running_into_the_wall_ends_the_game() {
    let mut session = new_game(3);

    // Head starts in column 5 of 20; column 20 is outside the grid
    for _ in 0..14 {
        assert!(!matches!(session.tick(), StepResult::Ended(_)));
    }
    assert_eq!(session.tick(), StepResult::Ended(EndReason::Wall));
    assert_eq!(session.phase(), Phase::GameOver(EndReason::Wall));

    // Frozen until a new game starts
    let frozen = session.snapshot();
    assert_eq!(session.tick(), StepResult::Ignored);
    assert_eq!(session.set_direction(Direction::Up), TurnResult::Ignored);
    assert_eq!(session.snapshot(), frozen);
}

#[test]
fn start_new_game_twice_gives_identical_state() {
    let mut session = new_game(4);
    session.set_direction(Direction::Down);
    for _ in 0..5 {
        session.tick();
    }

    session.start_new_game();
    let first = session.snapshot();
    session.start_new_game();
    let second = session.snapshot();

    for snapshot in [&first, &second] {
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.tick_interval, Duration::from_millis(400));
        assert_eq!(snapshot.segments.len(), 3);
        assert_eq!(snapshot.segments.last().unwrap().cell, Cell::new(5, 5));
    }
    assert_eq!(first.segments, second.segments);
    assert_eq!(session.direction(), Direction::Right);
}

#[test]
fn random_play_keeps_invariants() {
    let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
    let mut driver = StdRng::seed_from_u64(99);

    for seed in 0..20 {
        let mut session = new_game(seed);

        for _ in 0..500 {
            let before = session.snapshot();
            let prev_head = session.snake().head();

            let (direction, step) = if driver.gen_bool(0.2) {
                let turn = directions[driver.gen_range(0..4)];
                match session.set_direction(turn) {
                    TurnResult::Turned(step) => (turn, step),
                    _ => continue,
                }
            } else {
                (session.direction(), session.tick())
            };

            let snapshot = session.snapshot();
            assert_eq!(snapshot.tick_interval, expected_interval(snapshot.score));
            assert_eq!(snapshot.segments.iter().filter(|s| s.is_head).count(), 1);

            match step {
                StepResult::Moved => {
                    assert_eq!(session.snake().head(), prev_head.moved_in_direction(direction));
                    assert!(snapshot.segments.len() >= before.segments.len());
                    assert_eq!(snapshot.score, before.score);
                }
                StepResult::Ate { interval } => {
                    assert_eq!(snapshot.score, before.score + 1);
                    assert_eq!(interval, snapshot.tick_interval);
                    assert_eq!(session.snake().target_len(), snapshot.segments.len() + 1);
                }
                StepResult::Ended(_) => break,
                StepResult::Ignored => unreachable!("session was running"),
            }

            let food = snapshot.food.expect("food while running");
            assert!(session.grid().contains(food));
            assert!(snapshot.segments.iter().all(|s| s.cell != food));
        }
    }
}

#[test]
fn zero_score_never_reaches_the_leaderboard() {
    let board = Leaderboard::default();
    let config = GameConfig {
        start_cell: Cell::new(19, 5),
        ..GameConfig::default()
    };
    let mut session = Session::with_rng(config, StdRng::seed_from_u64(5)).unwrap();
    session.start_new_game();

    // Head starts against the right wall
    assert_eq!(session.tick(), StepResult::Ended(EndReason::Wall));
    assert_eq!(session.score(), 0);
    assert!(board.is_empty());
    assert_eq!(
        session.game_over_signal(&board),
        Some(GameOverSignal::Final { score: 0 })
    );
}

#[test]
fn low_score_does_not_enter_a_full_board() {
    let mut board = Leaderboard::from_entries(
        [50, 40, 30, 20, 10]
            .into_iter()
            .map(|score| LeaderboardEntry::new("p", score))
            .collect(),
        MAX_ENTRIES,
    );

    assert!(!board.qualifies(5));
    assert_eq!(board.submit("late", 5), None);
    assert_eq!(board.len(), MAX_ENTRIES);
    assert_eq!(board.lowest_score(), Some(10));
}
