//! Headless autoplay entry point.
//!
//! Boots logging, loads the config, starts the logic thread and plays one
//! session by pressing each lane when a note reaches the judgment line.

use anyhow::{Context, bail};
use clap::Parser;
use lanefall::core::input::bindings::KeyBindings;
use lanefall::logic;
use lanefall::models::engine::Difficulty;
use lanefall::models::settings::GameConfig;
use lanefall::shared::snapshot::GameplaySnapshot;
use lanefall::system::bus::{SessionCommand, SystemBus, SystemEvent};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use winit::keyboard::KeyCode;

#[derive(Parser, Debug)]
#[command(name = "lanefall", about = "Headless autoplay for the lanefall engine")]
struct Args {
    /// Config file, defaults are used if it does not exist.
    #[arg(long, default_value = "settings.toml")]
    config: PathBuf,

    #[arg(long, default_value_t = 4)]
    lanes: usize,

    #[arg(long, value_parser = parse_difficulty, default_value = "normal")]
    difficulty: Difficulty,

    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Overrides the chart horizon from the config.
    #[arg(long)]
    horizon_ms: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::ALL
        .into_iter()
        .find(|d| d.name().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown difficulty {s:?} (easy, normal, hard)"))
}

/// Rejects speeds the session would refuse, before the logic thread starts.
fn check_speed(speed: f64) -> anyhow::Result<()> {
    if !(speed.is_finite() && speed > 0.0) {
        bail!("--speed must be positive and finite, got {speed}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    let args = Args::parse();
    log::info!("MAIN: Booting lanefall autoplay...");

    let mut config = GameConfig::load_or_default(&args.config);
    if let Some(horizon) = args.horizon_ms {
        config.session.horizon_ms = horizon;
    }
    if args.seed.is_some() {
        config.session.seed = args.seed;
    }
    config.validate().context("invalid configuration")?;

    check_speed(args.speed)?;

    let mut bindings = KeyBindings::new();
    bindings.reload_from_settings(&config.keybinds);
    if !bindings.supports(args.lanes) {
        bail!("no key table for {} lanes", args.lanes);
    }
    let keys: Vec<KeyCode> = (0..args.lanes)
        .filter_map(|lane| bindings.key_for_lane(args.lanes, lane))
        .collect();

    // Press when within a quarter of the perfect window.
    let press_distance = config.hit_window.perfect / 4.0;
    let deadline = Duration::from_secs_f64(config.session.horizon_ms / 1000.0 + 10.0);

    let bus = SystemBus::new();
    let handle = logic::start_thread(bus.clone(), config);

    bus.command_tx
        .send(SessionCommand::Start {
            lane_count: args.lanes,
            difficulty: args.difficulty,
            speed_multiplier: args.speed,
        })
        .context("logic thread is gone")?;

    let started = Instant::now();
    let mut pressed = HashSet::new();
    let mut held: Vec<KeyCode> = Vec::new();

    while started.elapsed() < deadline {
        let Ok(snapshot) = bus.snapshot_rx.recv_timeout(Duration::from_millis(100)) else {
            continue;
        };

        for code in held.drain(..) {
            bus.command_tx.send(SessionCommand::KeyUp(code))?;
        }
        if snapshot.chart_cleared {
            break;
        }

        for note in &snapshot.visible_notes {
            if (note.position - snapshot.judgment_line).abs() > press_distance {
                continue;
            }
            if !pressed.insert(note.id) {
                continue;
            }
            if let Some(&code) = keys.get(note.lane) {
                bus.command_tx.send(SessionCommand::KeyDown(code))?;
                held.push(code);
            }
        }
    }

    bus.command_tx.send(SessionCommand::End)?;
    bus.sys_tx.send(SystemEvent::Quit)?;
    let last = match handle.join() {
        Ok(snapshot) => snapshot,
        Err(_) => bail!("logic thread panicked"),
    };
    report(&last);
    Ok(())
}

fn report(snapshot: &GameplaySnapshot) {
    let stats = &snapshot.stats;
    log::info!(
        "MAIN: {:?} {}K | score {} | max combo {} | perfect {} good {} miss {} | {:.2}%",
        snapshot.difficulty,
        snapshot.lane_count,
        stats.score,
        stats.max_combo,
        stats.perfect,
        stats.good,
        stats.miss,
        snapshot.accuracy
    );
}
