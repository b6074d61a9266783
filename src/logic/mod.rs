//! Logic thread owning the gameplay session.
//!
//! The thread drains inbound commands, fires the session's pending frame at
//! the refresh rate, and publishes snapshots. Commands and frames run on the
//! same thread, so the session is never mutated concurrently.

pub mod scheduler;

use crate::core::time::{SystemTimeSource, TimeSource};
use crate::models::settings::GameConfig;
use crate::shared::snapshot::GameplaySnapshot;
use crate::state::game::GameSession;
use crate::system::bus::{SessionCommand, SystemBus, SystemEvent};
use std::thread;
use std::time::{Duration, Instant};

/// Target refreshes per second.
const REFRESH_RATE: u64 = 240;

/// Applies one inbound command to the session.
pub fn apply_command<T: TimeSource>(session: &mut GameSession<T>, command: SessionCommand) {
    match command {
        SessionCommand::Start {
            lane_count,
            difficulty,
            speed_multiplier,
        } => {
            if let Err(e) = session.start_session(lane_count, difficulty, speed_multiplier) {
                log::warn!("LOGIC: {e}");
            }
        }
        SessionCommand::Pause => session.pause_session(),
        SessionCommand::Resume => session.resume_session(),
        SessionCommand::Reset => session.reset_session(),
        SessionCommand::End => session.end_session(),
        SessionCommand::KeyDown(code) => {
            session.key_down(code);
        }
        SessionCommand::KeyUp(code) => session.key_up(code),
    }
}

/// Spawns the logic thread. It returns the final snapshot when it quits.
pub fn start_thread(bus: SystemBus, config: GameConfig) -> thread::JoinHandle<GameplaySnapshot> {
    thread::Builder::new()
        .name("Logic Thread".to_string())
        .spawn(move || {
            log::info!("LOGIC: Thread started");

            let mut session = GameSession::new(config, SystemTimeSource::new());
            let frame_dt = Duration::from_nanos(1_000_000_000 / REFRESH_RATE);
            let mut next_frame = Instant::now();

            loop {
                // 1. Handle system events
                if let Ok(SystemEvent::Quit) = bus.sys_rx.try_recv() {
                    log::info!("LOGIC: Quit received...");
                    session.end_session();
                    return session.get_snapshot();
                }

                // 2. Apply commands synchronously, between frames
                let mut dirty = false;
                while let Ok(command) = bus.command_rx.try_recv() {
                    log::trace!("LOGIC: {command:?}");
                    apply_command(&mut session, command);
                    dirty = true;
                }

                // 3. Fire the pending frame on refresh
                let now = Instant::now();
                if now >= next_frame {
                    dirty |= session.frame();
                    next_frame += frame_dt;
                    if next_frame < now {
                        next_frame = now + frame_dt;
                    }
                }

                // 4. Publish, dropping the frame if the shell is behind
                if dirty {
                    let _ = bus.snapshot_tx.try_send(session.get_snapshot());
                }

                thread::sleep(Duration::from_millis(1));
            }
        })
        .expect("Failed to spawn Logic thread")
}
