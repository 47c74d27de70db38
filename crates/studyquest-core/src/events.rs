use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timetable::ClassSession;
use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// The CLI prints them; front ends subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// School mode switched on. `attendance_bonus` is true the first time
    /// on a calendar date (200 XP and a streak update happen then).
    SchoolModeStarted {
        attendance_bonus: bool,
        streak: u32,
        at: DateTime<Utc>,
    },
    SchoolModeStopped {
        at: DateTime<Utc>,
    },
    /// One more topic logged for the session in progress.
    TopicLogged {
        pending: u32,
        at: DateTime<Utc>,
    },
    /// Bell rang for an ended session and XP was awarded.
    /// `topics_banked > 0` means a topic record was appended.
    BellAwarded {
        session_id: String,
        session_name: String,
        xp_awarded: u64,
        topics_banked: u32,
        at: DateTime<Utc>,
    },
    TaskCompleted {
        assignment_id: String,
        xp_awarded: u64,
        at: DateTime<Utc>,
    },
    AssignmentAdded {
        assignment_id: String,
        at: DateTime<Utc>,
    },
    /// XP crossed a level boundary.
    LevelUp {
        level: u32,
        at: DateTime<Utc>,
    },
    /// Full dashboard snapshot for pollers.
    StateSnapshot {
        school_mode_active: bool,
        timer_state: TimerState,
        xp: u64,
        level: u32,
        progress: f64,
        streak: u32,
        attendance_days: usize,
        active_session: Option<ClassSession>,
        next_session: Option<ClassSession>,
        remaining: Option<String>,
        urgent_count: usize,
        at: DateTime<Utc>,
    },
}
