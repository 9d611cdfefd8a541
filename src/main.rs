//! Retro Tennis entry point
//!
//! Runs a headless demo match: a scripted input sweeps both paddles up and
//! down while snapshots stream to stdout as JSON lines.

use std::env;
use std::io::{self, BufWriter};
use std::process::ExitCode;

use retro_tennis::driver::{JsonLinesSink, LoopDriver, Pacing, ScriptedInput};
use retro_tennis::sim::{GameState, TickInput};
use retro_tennis::{Error, GameConfig};

const CONFIG_ENV_VAR: &str = "RETRO_TENNIS_CONFIG";
const SEED_ENV_VAR: &str = "RETRO_TENNIS_SEED";
const TICKS_ENV_VAR: &str = "RETRO_TENNIS_TICKS";
const UNPACED_ENV_VAR: &str = "RETRO_TENNIS_UNPACED";

const DEFAULT_DEMO_TICKS: u64 = 3600;
/// Ticks spent moving in one direction before turning around
const SWEEP_TICKS: u64 = 40;

fn env_u64(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not an unsigned integer", name, raw);
            None
        }
    }
}

/// Start the match, then sweep the paddles in opposite directions
fn demo_script(ticks: u64) -> ScriptedInput {
    let sweeps = (1..ticks).map(|t| {
        let up = (t / SWEEP_TICKS) % 2 == 0;
        TickInput {
            left_up: up,
            left_down: !up,
            right_up: !up,
            right_down: up,
            ..Default::default()
        }
    });
    ScriptedInput::new(std::iter::once(TickInput::start()).chain(sweeps))
}

fn run() -> Result<(), Error> {
    let config = match env::var_os(CONFIG_ENV_VAR) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = env_u64(SEED_ENV_VAR).unwrap_or_else(rand::random);
    let ticks = env_u64(TICKS_ENV_VAR).unwrap_or(DEFAULT_DEMO_TICKS);
    let pacing = if env::var_os(UNPACED_ENV_VAR).is_some() {
        Pacing::Unpaced
    } else {
        Pacing::RealTime
    };
    log::info!(
        "Retro Tennis starting: seed {}, {} ticks at {} Hz, {:?}",
        seed,
        ticks,
        config.tick_rate,
        pacing
    );

    let mut state = GameState::new(config, seed)?;
    let driver = LoopDriver::new(&state).with_pacing(pacing);
    let mut input = demo_script(ticks);
    let mut sink = JsonLinesSink::new(BufWriter::new(io::stdout().lock()))
        .with_stride(u64::from(state.config.tick_rate));

    let summary = driver.run(&mut state, &mut input, &mut sink)?;
    log::info!(
        "Finished after {} ticks ({:?}): {} - {}, phase {:?}",
        summary.ticks,
        summary.reason,
        summary.score_left,
        summary.score_right,
        summary.final_phase
    );
    sink.finish()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("retro-tennis: {}", e);
            ExitCode::FAILURE
        }
    }
}
