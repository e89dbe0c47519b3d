//! Playback orchestration: the session state machine that sequences clock,
//! cursor, and scheduler each tick and publishes a consistent snapshot.

pub mod snapshot;

pub use snapshot::Snapshot;

use std::fmt;
use std::str::FromStr;

use flightdeck_clock::MissionClock;
use flightdeck_core::constants::MISSION_WINDOW_END_S;
use flightdeck_core::{countdown, progress};
use flightdeck_events::EventScheduler;
use flightdeck_telemetry::{ReplayCursor, TelemetrySeries};
use thiserror::Error;

/// Discrete playback rates exposed on the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackSpeed {
    #[default]
    X1,
    X2,
    X4,
}

impl PlaybackSpeed {
    /// Wall-clock multiplier applied by the mission clock.
    pub fn multiplier(self) -> f64 {
        match self {
            PlaybackSpeed::X1 => 1.0,
            PlaybackSpeed::X2 => 2.0,
            PlaybackSpeed::X4 => 4.0,
        }
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackSpeed::X1 => write!(f, "1x"),
            PlaybackSpeed::X2 => write!(f, "2x"),
            PlaybackSpeed::X4 => write!(f, "4x"),
        }
    }
}

impl FromStr for PlaybackSpeed {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "1x" => Ok(PlaybackSpeed::X1),
            "2" | "2x" => Ok(PlaybackSpeed::X2),
            "4" | "4x" => Ok(PlaybackSpeed::X4),
            other => Err(ControlError::UnsupportedSpeed(other.to_string())),
        }
    }
}

/// Lifecycle of a playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Running,
    Finished,
}

/// Rejected control-surface calls. These leave the session untouched.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("playback already started; use restart")]
    AlreadyStarted,
    #[error("playback has not started")]
    NotStarted,
    #[error("playback is not running")]
    NotRunning,
    #[error("unsupported playback speed '{0}' (expected 1, 2, or 4)")]
    UnsupportedSpeed(String),
}

/// Opaque handle identifying one playback session generation.
///
/// A tick carrying a token from before a restart is discarded, so a host
/// callback scheduled against the old session cannot touch the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken(u64);

/// Result of one scheduling tick, carrying the explicit continue/halt decision.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Playback continues; the host should schedule the next tick.
    Continue(Snapshot),
    /// The mission window is exhausted; playback has stopped.
    Finished(Snapshot),
    /// The tick belonged to a stale session or a non-running state; nothing changed.
    Stale,
}

/// Orchestrates one telemetry replay: advances the mission clock, reveals
/// samples, updates the event display, and publishes snapshots.
///
/// All mutation is serialized through [`PlaybackController::tick`]; the
/// controller is single-threaded by construction and owns every piece of
/// session state.
#[derive(Debug)]
pub struct PlaybackController {
    series: TelemetrySeries,
    clock: MissionClock,
    cursor: ReplayCursor,
    scheduler: EventScheduler,
    state: PlaybackState,
    speed: PlaybackSpeed,
    generation: u64,
}

impl PlaybackController {
    /// Controller over a loaded series, in the `Idle` state.
    pub fn new(series: TelemetrySeries) -> Self {
        Self {
            series,
            clock: MissionClock::new(),
            cursor: ReplayCursor::new(),
            scheduler: EventScheduler::new(),
            state: PlaybackState::Idle,
            speed: PlaybackSpeed::X1,
            generation: 0,
        }
    }

    /// Begin playback from the pre-roll countdown. Valid only while `Idle`.
    pub fn start(&mut self, now_ms: f64) -> Result<SessionToken, ControlError> {
        if self.state != PlaybackState::Idle {
            return Err(ControlError::AlreadyStarted);
        }
        self.clock.start(now_ms);
        self.state = PlaybackState::Running;
        Ok(SessionToken(self.generation))
    }

    /// Discard the current session and begin a fresh one. Valid while
    /// `Running` or `Finished`; before the first `start` there is no session
    /// to discard and the call is rejected.
    ///
    /// Clock, cursor, and scheduler are replaced together and the generation
    /// bumped, so a tick scheduled before the restart lands as [`TickOutcome::Stale`].
    pub fn restart(&mut self, now_ms: f64) -> Result<SessionToken, ControlError> {
        if self.state == PlaybackState::Idle {
            return Err(ControlError::NotStarted);
        }
        self.clock.reset();
        self.cursor.reset();
        self.scheduler.reset();
        self.speed = PlaybackSpeed::X1;
        self.generation += 1;
        self.clock.start(now_ms);
        self.state = PlaybackState::Running;
        Ok(SessionToken(self.generation))
    }

    /// Run one scheduling tick at the given wall-clock timestamp (milliseconds).
    pub fn tick(&mut self, token: SessionToken, now_ms: f64) -> TickOutcome {
        if self.state != PlaybackState::Running || token.0 != self.generation {
            return TickOutcome::Stale;
        }
        self.clock.advance(now_ms);
        let mission_time_s = self.clock.mission_time_s();
        let newly_revealed = self
            .cursor
            .reveal_up_to(&self.series, mission_time_s)
            .to_vec();
        self.scheduler.update(mission_time_s, now_ms);
        let snapshot = self.snapshot(mission_time_s, newly_revealed);
        if mission_time_s <= MISSION_WINDOW_END_S {
            TickOutcome::Continue(snapshot)
        } else {
            self.state = PlaybackState::Finished;
            TickOutcome::Finished(snapshot)
        }
    }

    /// Change the playback rate. Valid only while `Running`; elapsed time under
    /// the old rate is folded in first so the boundary neither gains nor loses
    /// mission time.
    pub fn set_speed(&mut self, speed: PlaybackSpeed, now_ms: f64) -> Result<(), ControlError> {
        if self.state != PlaybackState::Running {
            return Err(ControlError::NotRunning);
        }
        self.clock.set_speed(speed.multiplier(), now_ms);
        self.speed = speed;
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// True while a session is actively ticking.
    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    /// Current playback rate.
    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    /// The series under replay.
    pub fn series(&self) -> &TelemetrySeries {
        &self.series
    }

    fn snapshot(&self, mission_time_s: f64, newly_revealed: Vec<flightdeck_telemetry::Sample>) -> Snapshot {
        let revealed = self.cursor.revealed(&self.series);
        // Before the first sample is revealed the readouts show the pad state.
        let current = revealed.last().unwrap_or(self.series.first());
        Snapshot {
            mission_time_s,
            countdown_label: countdown::label(mission_time_s),
            progress: progress::fraction(mission_time_s),
            revealed_len: revealed.len(),
            newly_revealed,
            active_event: self.scheduler.active().map(|event| event.name),
            altitude_m: current.altitude_m,
            velocity_m_s: current.velocity_m_s,
        }
    }
}
