//! Session bell timer.
//!
//! The bell timer is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` once
//! per second with the current time and the day's schedule.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle
//! ```
//!
//! Idle means no active session (or school mode off); Running tracks the
//! session currently in progress. When the wall clock reaches the running
//! session's end boundary, `tick()` returns that session exactly once - the
//! bell. A fired-marker guarantees at-most-once even if a tick lands past
//! the boundary second.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::timetable::{active_session, ClassSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// Caller-ticked countdown over the day's schedule.
#[derive(Debug, Clone, Default)]
pub struct BellTimer {
    /// The session currently being timed (Running state).
    current: Option<ClassSession>,
    /// Id of the session whose bell already rang.
    fired: Option<String>,
}

impl BellTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerState {
        if self.current.is_some() {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    /// The session currently being timed, if any.
    pub fn current_session(&self) -> Option<&ClassSession> {
        self.current.as_ref()
    }

    /// Seconds until the running session ends, floored at zero.
    pub fn remaining_secs(&self, now: NaiveTime) -> Option<u32> {
        let current = self.current.as_ref()?;
        let end_secs = current.end_min as u32 * 60;
        Some(end_secs.saturating_sub(now.num_seconds_from_midnight()))
    }

    /// Remaining time as `MM:SS` (total minutes, not wrapped at the hour).
    pub fn remaining_display(&self, now: NaiveTime) -> Option<String> {
        let secs = self.remaining_secs(now)?;
        Some(format!("{:02}:{:02}", secs / 60, secs % 60))
    }

    /// Advance the timer by one wall-clock observation.
    ///
    /// Returns the session that just ended when the bell rings; the caller
    /// feeds that into the bell/XP award handler. With school mode off the
    /// timer cancels to Idle and can never ring.
    pub fn tick(
        &mut self,
        now: NaiveTime,
        sessions: &[ClassSession],
        school_mode: bool,
    ) -> Option<ClassSession> {
        if !school_mode {
            self.cancel();
            return None;
        }

        let now_secs = now.num_seconds_from_midnight();

        if let Some(current) = self.current.clone() {
            let end_secs = current.end_min as u32 * 60;
            if now_secs >= end_secs && self.fired.as_deref() != Some(current.id.as_str()) {
                self.fired = Some(current.id.clone());
                self.resync(now, sessions);
                return Some(current);
            }
        }

        self.resync(now, sessions);
        None
    }

    /// Stop ticking. No bell can fire until a later tick re-enters Running.
    pub fn cancel(&mut self) {
        self.current = None;
        self.fired = None;
    }

    /// Re-resolve the running session from the schedule.
    fn resync(&mut self, now: NaiveTime, sessions: &[ClassSession]) {
        let now_min = (now.num_seconds_from_midnight() / 60) as u16;
        self.current = active_session(sessions, now_min).cloned();
    }
}
