//! Application state and its transitions.
//!
//! `AppState` is the single aggregate every component reads. The four
//! transitions here (bell award, task completion, school-mode toggle,
//! assignment creation) are the only XP writers; each one recomputes the
//! level before returning, so `level == xp / XP_PER_LEVEL + 1` holds after
//! every call. Transitions return the domain events they produced;
//! persistence is the store's job (see [`store`]).

pub mod store;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assignments::{Assignment, Priority};
use crate::events::Event;
use crate::progression::{level_for, Badge};
use crate::timetable::{ClassSession, Timetable};

pub use store::StateStore;

/// XP per topic banked at the bell.
pub const XP_PER_TOPIC: u64 = 20;
/// Base XP for finishing a class with at least one topic logged.
pub const TOPIC_SESSION_XP: u64 = 100;
/// Flat XP for a break, or a class with nothing logged.
pub const IDLE_SESSION_XP: u64 = 50;
/// First school-mode activation of a calendar date.
pub const ATTENDANCE_XP: u64 = 200;

/// Per-user progression record. Append-only; replaced wholesale on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub xp: u64,
    pub level: u32,
    pub badges: Vec<Badge>,
    pub streak: u32,
    pub last_active: DateTime<Utc>,
    /// Calendar dates school mode was activated on. No duplicates.
    pub attendance: Vec<NaiveDate>,
    pub topic_history: Vec<TopicRecord>,
}

impl UserStats {
    /// Add XP, recompute the level, and stamp activity.
    /// Returns a `LevelUp` event when a boundary was crossed.
    fn award_xp(&mut self, amount: u64, at: DateTime<Utc>) -> Option<Event> {
        let before = self.level;
        self.xp += amount;
        self.level = level_for(self.xp);
        self.last_active = at;
        (self.level > before).then_some(Event::LevelUp {
            level: self.level,
            at,
        })
    }

    pub fn total_topics(&self) -> u64 {
        self.topic_history.iter().map(|r| u64::from(r.count)).sum()
    }

    pub fn total_study_minutes(&self) -> u64 {
        self.topic_history
            .iter()
            .map(|r| u64::from(r.duration_minutes))
            .sum()
    }
}

/// Topics banked for one ended class session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub session_id: String,
    pub subject_name: String,
    pub count: u32,
    pub duration_minutes: u32,
    pub date: DateTime<Utc>,
}

/// The aggregate root: everything the dashboard reads, in one blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub stats: UserStats,
    pub timetable: Timetable,
    pub assignments: Vec<Assignment>,
    pub school_mode_active: bool,
}

impl AppState {
    /// First-run defaults: 450 XP, the built-in timetable, and two starter
    /// assignments due relative to `today`.
    pub fn seed(today: NaiveDate, now: DateTime<Utc>) -> Self {
        let xp = 450;
        Self {
            stats: UserStats {
                xp,
                level: level_for(xp),
                badges: Vec::new(),
                streak: 3,
                last_active: now,
                attendance: Vec::new(),
                topic_history: Vec::new(),
            },
            timetable: Timetable::seed(),
            assignments: vec![
                Assignment::new(
                    "a1",
                    "Calculus Quiz Prep",
                    "Math",
                    today + chrono::Duration::days(2),
                    500,
                    Priority::High,
                ),
                Assignment::new(
                    "a2",
                    "Code a React App",
                    "CS",
                    today + chrono::Duration::days(5),
                    800,
                    Priority::Medium,
                ),
            ],
            school_mode_active: false,
        }
    }

    /// Bell handler: award XP for the session that just ended.
    ///
    /// A non-break session with topics pending banks a [`TopicRecord`] and
    /// awards `pending * 20 + 100`; anything else awards a flat 50. The
    /// caller owns the pending counter and resets it when `topics_banked`
    /// in the returned event is non-zero.
    pub fn handle_bell(
        &mut self,
        session: &ClassSession,
        pending_topics: u32,
        now: DateTime<Utc>,
    ) -> Vec<Event> {
        let (xp_awarded, topics_banked) = if !session.is_break && pending_topics > 0 {
            self.stats.topic_history.push(TopicRecord {
                session_id: session.id.clone(),
                subject_name: session.name.clone(),
                count: pending_topics,
                duration_minutes: u32::from(session.duration_min()),
                date: now,
            });
            (
                u64::from(pending_topics) * XP_PER_TOPIC + TOPIC_SESSION_XP,
                pending_topics,
            )
        } else {
            (IDLE_SESSION_XP, 0)
        };

        let level_up = self.stats.award_xp(xp_awarded, now);
        let mut events = vec![Event::BellAwarded {
            session_id: session.id.clone(),
            session_name: session.name.clone(),
            xp_awarded,
            topics_banked,
            at: now,
        }];
        events.extend(level_up);
        events
    }

    /// Complete an assignment by id. Unknown or already-completed ids are a
    /// no-op (empty event list, state untouched).
    pub fn complete_task(&mut self, id: &str, now: DateTime<Utc>) -> Vec<Event> {
        let Some(assignment) = self
            .assignments
            .iter_mut()
            .find(|a| a.id == id && !a.completed)
        else {
            return Vec::new();
        };

        assignment.completed = true;
        assignment.completed_at = Some(now);
        let xp_awarded = assignment.xp_reward;
        let assignment_id = assignment.id.clone();

        let level_up = self.stats.award_xp(xp_awarded, now);
        let mut events = vec![Event::TaskCompleted {
            assignment_id,
            xp_awarded,
            at: now,
        }];
        events.extend(level_up);
        events
    }

    /// Flip school mode. The first activation on `today` records attendance,
    /// updates the streak, and awards 200 XP - at most once per date.
    /// Deactivation touches nothing but the flag.
    pub fn toggle_school_mode(&mut self, today: NaiveDate, now: DateTime<Utc>) -> Vec<Event> {
        if self.school_mode_active {
            self.school_mode_active = false;
            return vec![Event::SchoolModeStopped { at: now }];
        }

        self.school_mode_active = true;
        if self.stats.attendance.contains(&today) {
            return vec![Event::SchoolModeStarted {
                attendance_bonus: false,
                streak: self.stats.streak,
                at: now,
            }];
        }

        self.stats.streak = match today.pred_opt() {
            Some(yesterday) if self.stats.attendance.contains(&yesterday) => {
                self.stats.streak + 1
            }
            _ => 1,
        };
        self.stats.attendance.push(today);
        let level_up = self.stats.award_xp(ATTENDANCE_XP, now);

        let mut events = vec![Event::SchoolModeStarted {
            attendance_bonus: true,
            streak: self.stats.streak,
            at: now,
        }];
        events.extend(level_up);
        events
    }

    /// Create a new incomplete assignment with a fresh id.
    pub fn add_assignment(
        &mut self,
        title: impl Into<String>,
        subject: impl Into<String>,
        due_date: NaiveDate,
        xp_reward: u64,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Vec<Event> {
        let id = Uuid::new_v4().to_string();
        self.assignments.push(Assignment::new(
            id.clone(),
            title,
            subject,
            due_date,
            xp_reward,
            priority,
        ));
        vec![Event::AssignmentAdded {
            assignment_id: id,
            at: now,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::ClassSession;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 16, 9, 30, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
    }

    fn class_session() -> ClassSession {
        ClassSession::new("1", "Mathematics", 8 * 60 + 30, 9 * 60 + 30).unwrap()
    }

    #[test]
    fn seed_defaults() {
        let state = AppState::seed(today(), now());
        assert_eq!(state.stats.xp, 450);
        assert_eq!(state.stats.level, 1);
        assert_eq!(state.stats.streak, 3);
        assert_eq!(state.assignments.len(), 2);
        assert_eq!(state.assignments[0].due_date, today() + Duration::days(2));
        assert_eq!(state.assignments[1].due_date, today() + Duration::days(5));
        assert!(!state.school_mode_active);
        assert!(state.stats.attendance.is_empty());
    }

    #[test]
    fn bell_with_pending_topics_banks_a_record() {
        let mut state = AppState::seed(today(), now());
        let session = ClassSession::new("1", "Mathematics", 8 * 60 + 30, 9 * 60 + 30).unwrap();

        let events = state.handle_bell(&session, 3, now());

        // 3 topics * 20 + 100 on top of the seeded 450.
        assert_eq!(state.stats.xp, 450 + 160);
        assert_eq!(state.stats.level, 1);
        assert_eq!(state.stats.topic_history.len(), 1);
        let record = &state.stats.topic_history[0];
        assert_eq!(record.count, 3);
        assert_eq!(record.duration_minutes, 60);
        assert_eq!(record.subject_name, "Mathematics");
        assert!(matches!(
            events[0],
            Event::BellAwarded { xp_awarded: 160, topics_banked: 3, .. }
        ));
    }

    #[test]
    fn bell_on_break_awards_flat_xp() {
        let mut state = AppState::seed(today(), now());
        let recess = ClassSession::new("3", "Recess", 640, 660).unwrap().as_break();

        let events = state.handle_bell(&recess, 3, now());

        assert_eq!(state.stats.xp, 450 + 50);
        assert!(state.stats.topic_history.is_empty());
        assert!(matches!(
            events[0],
            Event::BellAwarded { xp_awarded: 50, topics_banked: 0, .. }
        ));
    }

    #[test]
    fn bell_with_no_topics_awards_flat_xp() {
        let mut state = AppState::seed(today(), now());
        let events = state.handle_bell(&class_session(), 0, now());
        assert_eq!(state.stats.xp, 500);
        assert!(state.stats.topic_history.is_empty());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn complete_task_awards_reward_once() {
        let mut state = AppState::seed(today(), now());

        let events = state.complete_task("a1", now());
        assert_eq!(state.stats.xp, 950);
        assert_eq!(state.stats.level, 1);
        assert!(state.assignments[0].completed);
        assert_eq!(state.assignments[0].completed_at, Some(now()));
        assert!(matches!(
            events[0],
            Event::TaskCompleted { xp_awarded: 500, .. }
        ));

        // Second completion is a no-op.
        let before = state.clone();
        assert!(state.complete_task("a1", now()).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn complete_task_unknown_id_is_a_noop() {
        let mut state = AppState::seed(today(), now());
        let before = state.clone();
        assert!(state.complete_task("missing", now()).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn completing_big_assignment_levels_up() {
        let mut state = AppState::seed(today(), now());
        let events = state.complete_task("a2", now());
        // 450 + 800 = 1250 -> level 2.
        assert_eq!(state.stats.xp, 1250);
        assert_eq!(state.stats.level, 2);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::LevelUp { level: 2, .. })));
    }

    #[test]
    fn attendance_bonus_at_most_once_per_date() {
        let mut state = AppState::seed(today(), now());

        let events = state.toggle_school_mode(today(), now());
        assert!(state.school_mode_active);
        assert_eq!(state.stats.xp, 650);
        assert_eq!(state.stats.attendance, vec![today()]);
        assert!(matches!(
            events[0],
            Event::SchoolModeStarted { attendance_bonus: true, .. }
        ));

        state.toggle_school_mode(today(), now());
        assert!(!state.school_mode_active);

        let events = state.toggle_school_mode(today(), now());
        assert!(state.school_mode_active);
        assert_eq!(state.stats.xp, 650, "no double attendance credit");
        assert_eq!(state.stats.attendance.len(), 1);
        assert!(matches!(
            events[0],
            Event::SchoolModeStarted { attendance_bonus: false, .. }
        ));
    }

    #[test]
    fn streak_increments_on_consecutive_days_and_resets_after_gap() {
        let mut state = AppState::seed(today(), now());

        state.toggle_school_mode(today(), now());
        assert_eq!(state.stats.streak, 1, "no attendance yesterday");
        state.toggle_school_mode(today(), now());

        let tomorrow = today() + Duration::days(1);
        state.toggle_school_mode(tomorrow, now());
        assert_eq!(state.stats.streak, 2);
        state.toggle_school_mode(tomorrow, now());

        let after_gap = tomorrow + Duration::days(3);
        state.toggle_school_mode(after_gap, now());
        assert_eq!(state.stats.streak, 1);
    }

    #[test]
    fn add_assignment_then_complete_it() {
        let mut state = AppState::seed(today(), now());
        let events = state.add_assignment(
            "Essay Draft",
            "Literature",
            today() + Duration::days(1),
            300,
            Priority::Low,
            now(),
        );
        let Event::AssignmentAdded { assignment_id, .. } = &events[0] else {
            panic!("expected AssignmentAdded");
        };
        assert_eq!(state.assignments.len(), 3);

        let events = state.complete_task(assignment_id, now());
        assert!(matches!(
            events[0],
            Event::TaskCompleted { xp_awarded: 300, .. }
        ));
        assert_eq!(state.stats.xp, 750);
    }

    #[test]
    fn level_invariant_holds_after_every_transition() {
        let mut state = AppState::seed(today(), now());
        state.toggle_school_mode(today(), now());
        state.handle_bell(&class_session(), 5, now());
        state.complete_task("a1", now());
        state.complete_task("a2", now());
        assert_eq!(state.stats.level, level_for(state.stats.xp));
    }

    #[test]
    fn state_serde_roundtrip_is_identical() {
        let mut state = AppState::seed(today(), now());
        state.toggle_school_mode(today(), now());
        state.handle_bell(&class_session(), 2, now());

        let json = serde_json::to_string(&state).unwrap();
        let back: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
