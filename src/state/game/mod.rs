//! Core gameplay session for the falling-note game.
//!
//! `GameSession` owns everything that lives for one play: the chart arena,
//! the pausable clock, the frame scheduler and the running stats. It handles:
//! - Lifecycle commands (start, pause, resume, end, reset)
//! - Per-frame motion update and miss detection
//! - Key presses judged against the last frame's positions

mod clock;
mod error;
mod input;
mod notes;
mod snapshot;

pub use clock::PlayClock;
pub use error::SessionError;

use crate::core::input::InputManager;
use crate::core::input::bindings::KeyBindings;
use crate::core::time::TimeSource;
use crate::logic::scheduler::{FrameScheduler, FrameToken};
use crate::models::engine::{Difficulty, DifficultyProfile, NoteData, chart};
use crate::models::settings::GameConfig;
use crate::models::stats::Stats;
use crate::shared::snapshot::JudgementLabel;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Menu,
    Playing,
    Paused,
    Ended,
}

/// Arena entry: a chart note plus its position as of the last frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveNote {
    pub note: NoteData,
    pub position: f64,
}

/// Main gameplay session handling note timing, judgement and scoring.
pub struct GameSession<T: TimeSource> {
    config: GameConfig,
    time: T,

    state: SessionState,
    lane_count: usize,
    difficulty: Option<Difficulty>,
    profile: Option<DifficultyProfile>,
    speed_multiplier: f64,

    /// Chart notes indexed by `NoteId`.
    notes: Vec<ActiveNote>,
    /// Index of the first unresolved note.
    head_index: usize,

    stats: Stats,
    clock: PlayClock,
    scheduler: FrameScheduler,
    input: InputManager,
    /// Elapsed time used by the last frame.
    elapsed_ms: f64,
    last_label: Option<JudgementLabel>,
}

impl<T: TimeSource> GameSession<T> {
    pub fn new(config: GameConfig, time: T) -> Self {
        let mut bindings = KeyBindings::new();
        bindings.reload_from_settings(&config.keybinds);

        Self {
            config,
            time,
            state: SessionState::Menu,
            lane_count: 0,
            difficulty: None,
            profile: None,
            speed_multiplier: 1.0,
            notes: Vec::new(),
            head_index: 0,
            stats: Stats::new(),
            clock: PlayClock::new(),
            scheduler: FrameScheduler::new(),
            input: InputManager::new(bindings),
            elapsed_ms: 0.0,
            last_label: None,
        }
    }

    /// Starts a session with a freshly generated chart.
    pub fn start_session(
        &mut self,
        lane_count: usize,
        difficulty: Difficulty,
        speed_multiplier: f64,
    ) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let profile = difficulty.profile();
        let horizon_ms = self.config.session.horizon_ms;
        if !(horizon_ms.is_finite() && horizon_ms > 0.0) {
            log::warn!("SESSION: Start rejected, horizon is {horizon_ms}");
            return Err(SessionError::InvalidHorizon(horizon_ms));
        }
        let chart = match self.config.session.seed {
            Some(seed) => chart::generate_seeded(lane_count, &profile, horizon_ms, seed),
            None => chart::generate(lane_count, &profile, horizon_ms),
        };
        self.start_with_chart(lane_count, difficulty, speed_multiplier, chart)
    }

    /// Starts a session on a caller-provided chart.
    ///
    /// The chart is re-sorted and re-numbered, so hand-built note lists are fine.
    pub fn start_with_chart(
        &mut self,
        lane_count: usize,
        difficulty: Difficulty,
        speed_multiplier: f64,
        chart: Vec<NoteData>,
    ) -> Result<(), SessionError> {
        self.ensure_idle()?;
        if !(speed_multiplier.is_finite() && speed_multiplier > 0.0) {
            return Err(SessionError::InvalidSpeed(speed_multiplier));
        }
        if !self.input.update_lane_count(lane_count) {
            log::warn!("SESSION: Start rejected, no key table for {lane_count} lanes");
            return Err(SessionError::UnsupportedLaneCount(lane_count));
        }

        let profile = difficulty.profile();
        let playfield = self.config.playfield;
        let total = chart.len();
        let playable: Vec<NoteData> = chart
            .into_iter()
            .filter(|note| {
                note.lane < lane_count && note.scheduled_ms.is_finite() && note.scheduled_ms >= 0.0
            })
            .collect();
        if playable.len() < total {
            log::warn!(
                "SESSION: Dropped {} note(s) outside the lanes or the timeline",
                total - playable.len()
            );
        }

        self.notes = chart::finalize(playable)
            .into_iter()
            .map(|mut note| {
                note.resolved = false;
                let position =
                    playfield.position_of(note.scheduled_ms, 0.0, speed_multiplier, profile.speed_factor);
                ActiveNote { note, position }
            })
            .collect();
        for (i, entry) in self.notes.iter_mut().enumerate() {
            entry.note.id.0 = i as u32;
        }

        self.lane_count = lane_count;
        self.difficulty = Some(difficulty);
        self.profile = Some(profile);
        self.speed_multiplier = speed_multiplier;
        self.head_index = 0;
        self.stats = Stats::new();
        self.elapsed_ms = 0.0;
        self.last_label = None;
        self.clock.start();
        self.scheduler.cancel();
        self.scheduler.request();
        self.state = SessionState::Playing;

        log::info!(
            "SESSION: Started {}K {} x{:.2} with {} notes",
            lane_count,
            difficulty.name(),
            speed_multiplier,
            self.notes.len()
        );
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if matches!(self.state, SessionState::Playing | SessionState::Paused) {
            log::warn!("SESSION: Start rejected, session is {:?}", self.state);
            return Err(SessionError::SessionActive(self.state));
        }
        Ok(())
    }

    /// Freezes play. Ignored unless playing.
    pub fn pause_session(&mut self) {
        if self.state != SessionState::Playing {
            log::debug!("SESSION: Pause ignored in {:?}", self.state);
            return;
        }
        self.clock.pause(self.time.now_ms());
        self.scheduler.cancel();
        self.input.release_all();
        self.state = SessionState::Paused;
        log::info!("SESSION: Paused at {:.0}ms", self.elapsed_ms);
    }

    /// Continues a paused session. Ignored unless paused.
    pub fn resume_session(&mut self) {
        if self.state != SessionState::Paused {
            log::debug!("SESSION: Resume ignored in {:?}", self.state);
            return;
        }
        self.clock.resume();
        self.state = SessionState::Playing;
        self.scheduler.request();
        log::info!("SESSION: Resumed");
    }

    /// Stops play but keeps the final stats readable.
    pub fn end_session(&mut self) {
        if !matches!(self.state, SessionState::Playing | SessionState::Paused) {
            return;
        }
        self.scheduler.cancel();
        self.input.release_all();
        self.state = SessionState::Ended;
        log::info!(
            "SESSION: Ended, score {} max combo {}",
            self.stats.score,
            self.stats.max_combo
        );
    }

    /// Drops all session data and returns to the menu.
    pub fn reset_session(&mut self) {
        self.scheduler.cancel();
        self.notes.clear();
        self.head_index = 0;
        self.stats = Stats::new();
        self.clock = PlayClock::new();
        self.elapsed_ms = 0.0;
        self.last_label = None;
        self.input.release_all();
        self.state = SessionState::Menu;
        log::info!("SESSION: Reset");
    }

    /// Runs a frame if one is due, reading the time source.
    pub fn frame(&mut self) -> bool {
        match self.scheduler.take_due() {
            Some(token) => {
                let now = self.time.now_ms();
                self.on_frame(token, now)
            }
            None => false,
        }
    }

    /// Runs the tick for `token` unless it was cancelled since it was issued.
    pub fn on_frame(&mut self, token: FrameToken, now_ms: f64) -> bool {
        if !self.scheduler.accepts(token) || self.state != SessionState::Playing {
            log::trace!("SESSION: Dropped stale frame");
            return false;
        }

        let elapsed = self.clock.tick(now_ms);
        self.update(elapsed);

        if self.state == SessionState::Playing {
            self.scheduler.request();
        }
        true
    }

    /// Motion update, then miss sweep, both at the same elapsed time.
    pub(crate) fn update(&mut self, elapsed_ms: f64) {
        self.elapsed_ms = elapsed_ms;
        self.update_positions(elapsed_ms);
        self.detect_misses();
        self.expire_label(elapsed_ms);
    }

    /// Handles a key press. Returns the judgement when a note was hit.
    pub fn key_down(&mut self, code: KeyCode) -> Option<crate::models::stats::Judgement> {
        if self.state != SessionState::Playing {
            return None;
        }
        let action = self.input.key_down(code)?;
        self.judge(action.lane(), self.elapsed_ms)
    }

    pub fn key_up(&mut self, code: KeyCode) {
        self.input.key_up(code);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn notes(&self) -> &[ActiveNote] {
        &self.notes
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.input.bindings
    }

    pub fn last_label(&self) -> Option<&JudgementLabel> {
        self.last_label.as_ref()
    }

    /// Speed factor of the active difficulty, 1.0 outside a session.
    pub fn difficulty_speed_factor(&self) -> f64 {
        self.profile.map_or(1.0, |p| p.speed_factor)
    }

    /// Elapsed time at which `note` reaches the judgment line.
    pub fn arrival_ms(&self, note: &NoteData) -> f64 {
        self.config.playfield.arrival_ms(
            note.scheduled_ms,
            self.speed_multiplier,
            self.difficulty_speed_factor(),
        )
    }

    /// True once every note of a non-empty chart has been resolved.
    pub fn chart_cleared(&self) -> bool {
        !self.notes.is_empty() && self.head_index >= self.notes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::ManualTimeSource;
    use crate::models::stats::Judgement;
    use std::rc::Rc;

    /// Playfield where position equals elapsed minus scheduled time.
    pub(super) fn linear_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.playfield.base_speed = 1000.0;
        config.playfield.judgment_line = 500.0;
        config.playfield.line_offset = 0.0;
        config
    }

    pub(super) fn session_with(
        notes: Vec<NoteData>,
    ) -> (GameSession<Rc<ManualTimeSource>>, Rc<ManualTimeSource>) {
        let time = Rc::new(ManualTimeSource::new());
        let mut session = GameSession::new(linear_config(), Rc::clone(&time));
        session
            .start_with_chart(4, Difficulty::Normal, 1.0, notes)
            .unwrap();
        (session, time)
    }

    #[test]
    fn starts_playing_with_frame_pending() {
        let (session, _) = session_with(vec![NoteData::single(0, 1000.0)]);
        assert_eq!(session.state(), SessionState::Playing);
        assert!(session.scheduler.is_pending());
        assert_eq!(session.notes().len(), 1);
    }

    #[test]
    fn rejects_start_while_active() {
        let (mut session, _) = session_with(vec![]);
        let err = session.start_session(7, Difficulty::Hard, 1.0).unwrap_err();
        assert_eq!(err, SessionError::SessionActive(SessionState::Playing));
        assert_eq!(session.lane_count(), 4);

        session.pause_session();
        assert!(matches!(
            session.start_session(4, Difficulty::Easy, 1.0),
            Err(SessionError::SessionActive(SessionState::Paused))
        ));
    }

    #[test]
    fn rejects_bad_setup() {
        let mut session = GameSession::new(GameConfig::default(), ManualTimeSource::new());
        assert_eq!(
            session.start_session(42, Difficulty::Easy, 1.0),
            Err(SessionError::UnsupportedLaneCount(42))
        );
        assert_eq!(
            session.start_session(4, Difficulty::Easy, 0.0),
            Err(SessionError::InvalidSpeed(0.0))
        );
        assert_eq!(session.state(), SessionState::Menu);
    }

    #[test]
    fn unplayable_notes_are_dropped() {
        let chart = vec![
            NoteData::single(0, f64::NAN),
            NoteData::single(1, -20.0),
            NoteData::single(2, f64::INFINITY),
            NoteData::single(9, 100.0),
            NoteData::single(3, 900.0),
        ];
        let (mut session, time) = session_with(chart);
        assert_eq!(session.notes().len(), 1);
        assert_eq!(session.notes()[0].note.lane, 3);
        assert_eq!(session.notes()[0].note.id.index(), 0);

        time.set(0.0);
        session.frame();
        time.set(10.0);
        session.frame();
        assert_eq!(session.stats().miss, 0);
    }

    #[test]
    fn unbounded_horizon_is_rejected() {
        let mut config = GameConfig::default();
        config.session.horizon_ms = f64::INFINITY;
        let mut session = GameSession::new(config, ManualTimeSource::new());
        assert_eq!(
            session.start_session(4, Difficulty::Hard, 1.0),
            Err(SessionError::InvalidHorizon(f64::INFINITY))
        );
        assert_eq!(session.state(), SessionState::Menu);
        assert!(session.notes().is_empty());
    }

    #[test]
    fn generated_session_uses_seed() {
        let mut config = GameConfig::default();
        config.session.seed = Some(5);
        config.session.horizon_ms = 10_000.0;

        let mut a = GameSession::new(config.clone(), ManualTimeSource::new());
        let mut b = GameSession::new(config, ManualTimeSource::new());
        a.start_session(5, Difficulty::Hard, 1.0).unwrap();
        b.start_session(5, Difficulty::Hard, 1.0).unwrap();
        assert!(!a.notes().is_empty());
        assert_eq!(a.notes(), b.notes());
    }

    #[test]
    fn restart_after_end_regenerates() {
        let (mut session, time) = session_with(vec![NoteData::single(0, 1000.0)]);
        time.set(0.0);
        session.frame();
        session.end_session();
        assert_eq!(session.state(), SessionState::Ended);
        assert!(!session.frame());

        session
            .start_with_chart(4, Difficulty::Normal, 1.0, vec![NoteData::single(1, 50.0), NoteData::single(2, 20.0)])
            .unwrap();
        assert_eq!(session.stats(), &Stats::new());
        assert_eq!(session.notes()[0].note.lane, 2);
        assert_eq!(session.notes()[1].note.id.index(), 1);
    }

    #[test]
    fn stale_frame_after_pause_does_nothing() {
        let (mut session, time) = session_with(vec![NoteData::single(0, 0.0)]);
        time.set(0.0);
        session.frame();

        let token = session.scheduler.take_due().unwrap();
        session.pause_session();
        assert!(!session.on_frame(token, 10_000.0));
        assert_eq!(session.stats().miss, 0);
        assert_eq!(session.elapsed_ms(), 0.0);
    }

    #[test]
    fn stale_frame_after_reset_cannot_touch_stats() {
        let (mut session, time) = session_with(vec![NoteData::single(0, 0.0)]);
        time.set(0.0);
        session.frame();
        let token = session.scheduler.take_due().unwrap();

        session.reset_session();
        assert!(!session.on_frame(token, 10_000.0));
        assert_eq!(session.state(), SessionState::Menu);
        assert!(session.notes().is_empty());
        assert_eq!(session.stats(), &Stats::new());
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let (mut session, time) = session_with(vec![NoteData::single(0, 5000.0)]);
        time.set(100.0);
        session.frame();
        time.set(400.0);
        session.frame();
        assert_eq!(session.elapsed_ms(), 300.0);

        session.pause_session();
        assert!(!session.frame());
        time.set(9_000.0);
        assert_eq!(session.key_down(KeyCode::KeyD), None);

        session.resume_session();
        session.frame();
        assert_eq!(session.elapsed_ms(), 300.0);
        time.set(9_050.0);
        session.frame();
        assert_eq!(session.elapsed_ms(), 350.0);
    }

    #[test]
    fn resume_while_playing_is_noop() {
        let (mut session, time) = session_with(vec![]);
        time.set(0.0);
        session.frame();
        time.set(200.0);
        session.resume_session();
        session.frame();
        assert_eq!(session.elapsed_ms(), 200.0);
    }

    #[test]
    fn chart_cleared_after_last_resolution() {
        let (mut session, time) = session_with(vec![NoteData::single(0, 0.0)]);
        time.set(0.0);
        session.frame();
        assert!(!session.chart_cleared());
        time.set(700.0);
        session.frame();
        assert!(session.chart_cleared());
        assert_eq!(session.stats().miss, 1);
        // Session keeps playing until told otherwise.
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn judgement_label_expires() {
        let (mut session, time) = session_with(vec![NoteData::single(0, 0.0)]);
        time.set(0.0);
        session.frame();
        time.set(500.0);
        session.frame();
        assert_eq!(session.key_down(KeyCode::KeyD), Some(Judgement::Perfect));
        assert_eq!(session.last_label().map(|l| l.text), Some("PERFECT"));

        time.set(999.0);
        session.frame();
        assert!(session.last_label().is_some());
        time.set(1000.0);
        session.frame();
        assert!(session.last_label().is_none());
    }
}
