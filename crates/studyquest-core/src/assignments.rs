//! Assignments and deadline triage.
//!
//! An assignment crosses from incomplete to complete exactly once and is
//! never deleted. Triage classifies incomplete assignments as urgent when
//! the ceiling-divided day difference to the due date is two days or less,
//! which includes anything already overdue.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Urgency window in calendar days.
pub const URGENT_WITHIN_DAYS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub due_date: NaiveDate,
    pub xp_reward: u64,
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub priority: Priority,
}

impl Assignment {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        subject: impl Into<String>,
        due_date: NaiveDate,
        xp_reward: u64,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subject: subject.into(),
            due_date,
            xp_reward,
            completed: false,
            completed_at: None,
            priority,
        }
    }
}

/// Whole days until `due` (midnight), rounded up. Negative when overdue,
/// zero on the due date itself.
pub fn days_remaining(due: NaiveDate, now: NaiveDateTime) -> i64 {
    let due_start = due.and_time(chrono::NaiveTime::MIN);
    let secs = (due_start - now).num_seconds();
    secs.div_euclid(86_400) + i64::from(secs.rem_euclid(86_400) > 0)
}

/// Incomplete assignments due within [`URGENT_WITHIN_DAYS`] (overdue
/// included), input order preserved.
pub fn urgent_assignments(assignments: &[Assignment], now: NaiveDateTime) -> Vec<&Assignment> {
    assignments
        .iter()
        .filter(|a| !a.completed && days_remaining(a.due_date, now) <= URGENT_WITHIN_DAYS)
        .collect()
}

/// Display classification of a due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueLabel {
    Overdue,
    DueToday,
    DaysLeft(i64),
}

impl DueLabel {
    pub fn for_date(due: NaiveDate, now: NaiveDateTime) -> Self {
        let days = days_remaining(due, now);
        if days < 0 {
            DueLabel::Overdue
        } else if days == 0 {
            DueLabel::DueToday
        } else {
            DueLabel::DaysLeft(days)
        }
    }
}

impl std::fmt::Display for DueLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DueLabel::Overdue => f.write_str("OVERDUE"),
            DueLabel::DueToday => f.write_str("DUE TODAY"),
            DueLabel::DaysLeft(n) => write!(f, "{n}d left"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn noon(date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(12, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
    }

    fn assignment(id: &str, due: NaiveDate, completed: bool) -> Assignment {
        let mut a = Assignment::new(id, "Quiz Prep", "Math", due, 500, Priority::High);
        a.completed = completed;
        a
    }

    #[test]
    fn days_remaining_rounds_up() {
        let now = noon(today());
        assert_eq!(days_remaining(today() + Duration::days(2), now), 2);
        assert_eq!(days_remaining(today() + Duration::days(3), now), 3);
        assert_eq!(days_remaining(today(), now), 0);
        assert_eq!(days_remaining(today() - Duration::days(1), now), -1);
    }

    #[test]
    fn urgency_window_is_inclusive_at_two_days() {
        let now = noon(today());
        let assignments = vec![
            assignment("due2", today() + Duration::days(2), false),
            assignment("due3", today() + Duration::days(3), false),
            assignment("overdue", today() - Duration::days(4), false),
            assignment("done", today(), true),
        ];

        let urgent = urgent_assignments(&assignments, now);
        let ids: Vec<&str> = urgent.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["due2", "overdue"]);
    }

    #[test]
    fn completed_is_never_urgent() {
        let now = noon(today());
        let assignments = vec![assignment("done", today() - Duration::days(10), true)];
        assert!(urgent_assignments(&assignments, now).is_empty());
    }

    #[test]
    fn urgent_preserves_input_order() {
        let now = noon(today());
        let assignments = vec![
            assignment("b", today() + Duration::days(1), false),
            assignment("a", today() - Duration::days(1), false),
            assignment("c", today(), false),
        ];
        let ids: Vec<&str> = urgent_assignments(&assignments, now)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn due_labels() {
        let now = noon(today());
        assert_eq!(
            DueLabel::for_date(today() - Duration::days(2), now),
            DueLabel::Overdue
        );
        assert_eq!(DueLabel::for_date(today(), now), DueLabel::DueToday);
        assert_eq!(
            DueLabel::for_date(today() + Duration::days(5), now),
            DueLabel::DaysLeft(5)
        );
        assert_eq!(DueLabel::Overdue.to_string(), "OVERDUE");
        assert_eq!(DueLabel::DueToday.to_string(), "DUE TODAY");
        assert_eq!(DueLabel::DaysLeft(5).to_string(), "5d left");
    }
}
