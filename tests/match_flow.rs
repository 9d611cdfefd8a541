use glam::Vec2;
use retro_tennis::driver::{LoopDriver, Pacing, PresentationSink, ScriptedInput, StopReason};
use retro_tennis::sim::{GameEvent, GamePhase, GameState, ScriptedCoin, Side, Snapshot, TickInput};
use retro_tennis::{Error, GameConfig};

#[derive(Default)]
struct Recorder {
    snapshots: Vec<Snapshot>,
}

impl PresentationSink for Recorder {
    fn present(&mut self, snapshot: &Snapshot) -> Result<(), Error> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }
}

fn idle(ticks: usize) -> impl Iterator<Item = TickInput> {
    std::iter::repeat_n(TickInput::default(), ticks)
}

#[test]
fn test_unattended_match_runs_to_game_over() {
    // Nobody moves, so every serve either misses a paddle or gets returned
    // until somebody reaches three
    let config = GameConfig {
        winning_score: 3,
        ..Default::default()
    };
    let mut state = GameState::new(config, 1234).expect("valid config");
    let driver = LoopDriver::new(&state).with_pacing(Pacing::Unpaced);
    let mut input = ScriptedInput::new(std::iter::once(TickInput::start()).chain(idle(20_000)));
    let mut sink = Recorder::default();

    let summary = driver.run(&mut state, &mut input, &mut sink).expect("run");

    assert_eq!(summary.reason, StopReason::Quit);
    assert_eq!(summary.final_phase, GamePhase::GameOver);
    assert_eq!(summary.score_left.max(summary.score_right), 3);
    assert!(summary.score_left.min(summary.score_right) < 3);

    let wins: Vec<_> = sink
        .snapshots
        .iter()
        .flat_map(|s| s.events.iter())
        .filter(|e| matches!(e, GameEvent::MatchWon { .. }))
        .collect();
    assert_eq!(wins.len(), 1);

    // Frozen after the win
    let last = sink.snapshots.last().expect("snapshots");
    let won_at = sink
        .snapshots
        .iter()
        .position(|s| s.phase == GamePhase::GameOver)
        .expect("game over reached");
    for snap in &sink.snapshots[won_at..] {
        assert_eq!(snap.ball, last.ball);
        assert_eq!(snap.score_left, last.score_left);
        assert_eq!(snap.score_right, last.score_right);
    }
}

#[test]
fn test_paddles_never_leave_the_field() {
    let mut state = GameState::new(GameConfig::default(), 77).expect("valid config");
    let driver = LoopDriver::new(&state).with_pacing(Pacing::Unpaced);
    let up = TickInput {
        left_up: true,
        right_up: true,
        ..Default::default()
    };
    let down = TickInput {
        left_down: true,
        right_down: true,
        ..Default::default()
    };
    let script = std::iter::once(TickInput::start())
        .chain(std::iter::repeat_n(up, 100))
        .chain(std::iter::repeat_n(down, 100));
    let mut input = ScriptedInput::new(script);
    let mut sink = Recorder::default();

    driver.run(&mut state, &mut input, &mut sink).expect("run");

    for snap in &sink.snapshots {
        for paddle in [snap.left, snap.right] {
            assert!(paddle.y >= 0.0);
            assert!(paddle.y <= 600.0 - 90.0);
        }
    }
    assert_eq!(sink.snapshots[100].left.y, 0.0);
    assert_eq!(sink.snapshots.last().expect("snapshots").right.y, 510.0);
}

#[test]
fn test_restart_after_game_over() {
    let config = GameConfig {
        winning_score: 1,
        ..Default::default()
    };
    let mut state = GameState::with_rng(config, ScriptedCoin::new([false, true]).expect("non-empty"))
        .expect("valid");
    let driver = LoopDriver::new(&state).with_pacing(Pacing::Unpaced);

    // Serve goes left; the left paddle steps aside so the ball gets through
    let dodge = TickInput {
        left_up: true,
        ..Default::default()
    };
    let script = std::iter::once(TickInput::start())
        .chain(std::iter::repeat_n(dodge, 200))
        .chain(idle(1))
        .chain(std::iter::once(TickInput::start()));
    let mut input = ScriptedInput::new(script);
    let mut sink = Recorder::default();

    let summary = driver.run(&mut state, &mut input, &mut sink).expect("run");

    let game_over = sink
        .snapshots
        .iter()
        .find(|s| s.phase == GamePhase::GameOver)
        .expect("right side wins the only point");
    assert_eq!(game_over.winner, Some(Side::Right));
    assert_eq!((game_over.score_left, game_over.score_right), (0, 1));

    assert_eq!(summary.final_phase, GamePhase::Playing);
    assert_eq!((summary.score_left, summary.score_right), (0, 0));
    assert_eq!(state.winner, None);
    assert_eq!(state.ball.center(), Vec2::new(400.0, 300.0));
}
