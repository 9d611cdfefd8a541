//! Fixed-tick loop driver
//!
//! Each iteration samples input, runs one simulation tick and presents one
//! snapshot, then sleeps until the next scheduled tick. The simulation never
//! sees wall-clock time; pacing is entirely the driver's concern.

use std::collections::VecDeque;
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use crate::Error;
use crate::consts::MAX_TICK_LAG;
use crate::sim::{GamePhase, GameState, ServeRandom, Snapshot, TickInput, TickOutcome, tick};

/// Where per-tick control state comes from
pub trait InputSource {
    fn sample(&mut self) -> TickInput;
}

/// Where per-tick snapshots go
pub trait PresentationSink {
    fn present(&mut self, snapshot: &Snapshot) -> Result<(), Error>;
}

/// Replays a fixed list of inputs, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> TickInput {
        self.inputs.pop_front().unwrap_or_else(TickInput::quit)
    }
}

/// Writes one JSON object per line for every `stride`-th snapshot
pub struct JsonLinesSink<W: Write> {
    out: W,
    stride: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, stride: 1 }
    }

    /// Only write snapshots whose tick is a multiple of `stride`, plus any
    /// snapshot that carries events
    pub fn with_stride(mut self, stride: u64) -> Self {
        self.stride = stride.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Flush buffered output and hand back the writer
    pub fn finish(mut self) -> Result<W, Error> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> PresentationSink for JsonLinesSink<W> {
    fn present(&mut self, snapshot: &Snapshot) -> Result<(), Error> {
        if snapshot.tick % self.stride != 0 && snapshot.events.is_empty() {
            return Ok(());
        }
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

/// How the loop spaces out ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep so ticks land at the configured rate
    RealTime,
    /// Run ticks back to back (headless runs and tests)
    Unpaced,
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    TickLimit,
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Ticks simulated (a quitting tick is not counted)
    pub ticks: u64,
    pub reason: StopReason,
    pub final_phase: GamePhase,
    pub score_left: u32,
    pub score_right: u32,
}

pub struct LoopDriver {
    period: Duration,
    pacing: Pacing,
    max_ticks: Option<u64>,
}

impl LoopDriver {
    /// A real-time driver at the match's configured tick rate
    pub fn new<R>(state: &GameState<R>) -> Self {
        Self {
            period: Duration::from_secs_f64(state.config.tick_seconds()),
            pacing: Pacing::RealTime,
            max_ticks: None,
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run until the input asks to quit or the tick limit is reached
    pub fn run<R, I, S>(
        &self,
        state: &mut GameState<R>,
        input: &mut I,
        sink: &mut S,
    ) -> Result<RunSummary, Error>
    where
        R: ServeRandom,
        I: InputSource,
        S: PresentationSink,
    {
        let mut ticks = 0u64;
        let mut next_deadline = Instant::now();

        let reason = loop {
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                break StopReason::TickLimit;
            }

            let sampled = input.sample();
            if tick(state, &sampled) == TickOutcome::Quit {
                log::info!("Quit requested after {} ticks", ticks);
                break StopReason::Quit;
            }
            ticks += 1;
            sink.present(&state.snapshot())?;

            if self.pacing == Pacing::RealTime {
                next_deadline = self.wait_for(next_deadline);
            }
        };

        Ok(RunSummary {
            ticks,
            reason,
            final_phase: state.phase,
            score_left: state.score_left,
            score_right: state.score_right,
        })
    }

    /// Sleep until the tick after `deadline` and return the new deadline
    fn wait_for(&self, deadline: Instant) -> Instant {
        let next = deadline + self.period;
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
            next
        } else if now - next > self.period * MAX_TICK_LAG {
            log::warn!(
                "Loop fell {:?} behind schedule, resynchronizing",
                now - next
            );
            now
        } else {
            // Slightly late: run the next tick immediately to catch up
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::ScriptedCoin;

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

    fn state() -> GameState<ScriptedCoin> {
        GameState::with_rng(GameConfig::default(), ScriptedCoin::constant(true)).expect("valid")
    }

    #[test]
    fn test_scripted_input_quits_when_exhausted() {
        let mut input = ScriptedInput::new([TickInput::start()]);
        assert_eq!(input.sample(), TickInput::start());
        assert_eq!(input.sample(), TickInput::quit());
        assert_eq!(input.sample(), TickInput::quit());
    }

    #[test]
    fn test_one_snapshot_per_tick() {
        let mut state = state();
        let driver = LoopDriver::new(&state).with_pacing(Pacing::Unpaced);
        let mut input = ScriptedInput::new(
            std::iter::once(TickInput::start()).chain(std::iter::repeat_n(TickInput::default(), 9)),
        );
        let mut sink = Recorder::default();

        let summary = driver.run(&mut state, &mut input, &mut sink).expect("run");

        assert_eq!(summary.reason, StopReason::Quit);
        assert_eq!(summary.ticks, 10);
        assert_eq!(summary.final_phase, GamePhase::Playing);
        assert_eq!(sink.snapshots.len(), 10);
        let ticks: Vec<u64> = sink.snapshots.iter().map(|s| s.tick).collect();
        assert_eq!(ticks, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_tick_limit() {
        let mut state = state();
        let driver = LoopDriver::new(&state)
            .with_pacing(Pacing::Unpaced)
            .with_max_ticks(3);
        let mut input = ScriptedInput::new(std::iter::repeat_n(TickInput::default(), 10));
        let mut sink = Recorder::default();

        let summary = driver.run(&mut state, &mut input, &mut sink).expect("run");
        assert_eq!(summary.reason, StopReason::TickLimit);
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.final_phase, GamePhase::Welcome);
    }

    #[test]
    fn test_real_time_pacing_spaces_ticks() {
        let config = GameConfig {
            tick_rate: 200,
            ..Default::default()
        };
        let mut state = GameState::with_rng(config, ScriptedCoin::constant(false)).expect("valid");
        let driver = LoopDriver::new(&state);
        let period = driver.period().as_secs_f64();
        assert!((period - 0.005).abs() < 1e-6);

        let mut input = ScriptedInput::new(std::iter::repeat_n(TickInput::default(), 4));
        let mut sink = Recorder::default();
        let started = Instant::now();
        driver.run(&mut state, &mut input, &mut sink).expect("run");
        assert!(started.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_json_lines_sink() {
        let mut state = state();
        let driver = LoopDriver::new(&state).with_pacing(Pacing::Unpaced);
        let mut input = ScriptedInput::new([
            TickInput::start(),
            TickInput::default(),
            TickInput::default(),
            TickInput::default(),
        ]);
        let mut sink = JsonLinesSink::new(Vec::new()).with_stride(2);
        driver.run(&mut state, &mut input, &mut sink).expect("run");

        let out = String::from_utf8(sink.into_inner()).expect("utf8");
        let snapshots: Vec<Snapshot> = out
            .lines()
            .map(|line| serde_json::from_str(line).expect("valid json line"))
            .collect();
        // Tick 1 carries MatchStarted, ticks 2 and 4 fall on the stride
        let ticks: Vec<u64> = snapshots.iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![1, 2, 4]);
    }

    struct Unflushable;

    impl Write for Unflushable {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("stdout closed"))
        }
    }

    #[test]
    fn test_finish_reports_flush_errors() {
        let mut sink = JsonLinesSink::new(Unflushable);
        let snapshot = state().snapshot();
        sink.present(&snapshot).expect("write succeeds");
        assert!(matches!(sink.finish(), Err(Error::Io(_))));

        let sink = JsonLinesSink::new(Vec::new());
        assert_eq!(sink.finish().expect("flush"), Vec::<u8>::new());
    }
}
