//! Shared channel infrastructure between the shell and the logic thread.
//!
//! The `SystemBus` carries lifecycle commands and key events in, and
//! gameplay snapshots out. All session mutation happens on the logic thread.

use crate::models::engine::Difficulty;
use crate::shared::snapshot::GameplaySnapshot;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use winit::keyboard::KeyCode;

/// Inbound commands from the application shell.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Start {
        lane_count: usize,
        difficulty: Difficulty,
        speed_multiplier: f64,
    },
    Pause,
    Resume,
    Reset,
    End,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

/// System-level events.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Stop the logic thread after ending the session.
    Quit,
}

/// Channels between the shell and the logic thread. Clones share the same channels.
#[derive(Clone)]
pub struct SystemBus {
    /// Shell → Logic: lifecycle commands and key events.
    pub command_tx: Sender<SessionCommand>,
    pub command_rx: Receiver<SessionCommand>,

    /// Logic → Shell: gameplay snapshots.
    pub snapshot_tx: Sender<GameplaySnapshot>,
    pub snapshot_rx: Receiver<GameplaySnapshot>,

    /// Shell → Logic: system events.
    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,
}

impl SystemBus {
    /// Opens every channel. Snapshots are bounded, the rest unbounded.
    pub fn new() -> Self {
        let (command_tx, command_rx) = unbounded();

        // Bounded snapshot channel: max 2 frames queued to limit latency
        let (snapshot_tx, snapshot_rx) = bounded(2);

        let (sys_tx, sys_rx) = unbounded();

        Self {
            command_tx,
            command_rx,
            snapshot_tx,
            snapshot_rx,
            sys_tx,
            sys_rx,
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
