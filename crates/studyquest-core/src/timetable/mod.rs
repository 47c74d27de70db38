//! Weekly class timetable and session lookup.
//!
//! Sessions carry minute-of-day bounds (`[start, end)` half-open) and live
//! in display order per weekday. Schedules are assumed non-overlapping;
//! overlapping input is a configuration error and is not validated here.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MINUTES_PER_DAY: u16 = 1440;

/// Day of the week, ordered Monday-first for display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Case-insensitive parse of an English day name.
    pub fn parse(s: &str) -> Option<DayOfWeek> {
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(w: Weekday) -> Self {
        match w {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One scheduled class (or break) on a weekday.
///
/// Immutable once part of a day's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    pub id: String,
    pub name: String,
    /// Minute-of-day, 0..=1439.
    pub start_min: u16,
    /// Minute-of-day, 0..=1439. Always greater than `start_min`.
    pub end_min: u16,
    #[serde(default)]
    pub is_break: bool,
    #[serde(default)]
    pub room: Option<String>,
}

impl ClassSession {
    /// Build a session, validating the minute bounds.
    ///
    /// # Errors
    /// Returns a `ValidationError` if either bound is out of range or the
    /// interval is empty/inverted.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_min: u16,
        end_min: u16,
    ) -> Result<Self, ValidationError> {
        if start_min >= MINUTES_PER_DAY {
            return Err(ValidationError::MinuteOutOfRange(start_min));
        }
        if end_min >= MINUTES_PER_DAY {
            return Err(ValidationError::MinuteOutOfRange(end_min));
        }
        if end_min <= start_min {
            return Err(ValidationError::InvalidSessionBounds {
                start: start_min,
                end: end_min,
            });
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            start_min,
            end_min,
            is_break: false,
            room: None,
        })
    }

    pub fn as_break(mut self) -> Self {
        self.is_break = true;
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn duration_min(&self) -> u16 {
        self.end_min - self.start_min
    }

    /// Whether `now_min` falls in the session's `[start, end)` interval.
    pub fn contains(&self, now_min: u16) -> bool {
        self.start_min <= now_min && now_min < self.end_min
    }

    pub fn start_display(&self) -> String {
        format_minute_of_day(self.start_min)
    }

    pub fn end_display(&self) -> String {
        format_minute_of_day(self.end_min)
    }
}

/// Parse an `HH:mm` string into a minute-of-day.
///
/// # Errors
/// Returns a `ValidationError` for anything that is not a zero-padded or
/// unpadded 24h `HH:mm` time.
pub fn parse_minute_of_day(s: &str) -> Result<u16, ValidationError> {
    let invalid = || ValidationError::InvalidTime(s.to_string());
    let (h, m) = s.split_once(':').ok_or_else(invalid)?;
    let hours: u16 = h.parse().map_err(|_| invalid())?;
    let minutes: u16 = m.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Format a minute-of-day as `HH:mm`.
pub fn format_minute_of_day(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// The session whose `[start, end)` interval contains `now_min`, first in
/// display order.
pub fn active_session(sessions: &[ClassSession], now_min: u16) -> Option<&ClassSession> {
    sessions.iter().find(|s| s.contains(now_min))
}

/// The upcoming session with the smallest start strictly after `now_min`,
/// ties broken by list order.
pub fn next_session(sessions: &[ClassSession], now_min: u16) -> Option<&ClassSession> {
    let mut best: Option<&ClassSession> = None;
    for session in sessions.iter().filter(|s| s.start_min > now_min) {
        if best.is_none_or(|b| session.start_min < b.start_min) {
            best = Some(session);
        }
    }
    best
}

/// Weekly timetable: display-ordered sessions per weekday.
///
/// Static at runtime; edited only through configuration. Serializes as a
/// map of English day names so the blob stays readable in both JSON and
/// TOML (`{"Monday": [...]}`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    days: BTreeMap<DayOfWeek, Vec<ClassSession>>,
}

impl Serialize for Timetable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (day, sessions) in &self.days {
            map.serialize_entry(day.name(), sessions)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Timetable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<ClassSession>>::deserialize(deserializer)?;
        let mut days = BTreeMap::new();
        for (name, sessions) in raw {
            let day = DayOfWeek::parse(&name)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown weekday: {name}")))?;
            days.insert(day, sessions);
        }
        Ok(Timetable { days })
    }
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions for a weekday, in display order. Empty for unscheduled days.
    pub fn sessions_for(&self, day: DayOfWeek) -> &[ClassSession] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn set_day(&mut self, day: DayOfWeek, sessions: Vec<ClassSession>) {
        self.days.insert(day, sessions);
    }

    /// Weekdays that have at least one session, Monday-first.
    pub fn scheduled_days(&self) -> impl Iterator<Item = DayOfWeek> + '_ {
        self.days
            .iter()
            .filter(|(_, sessions)| !sessions.is_empty())
            .map(|(day, _)| *day)
    }

    /// The built-in weekly timetable used on first run.
    pub fn seed() -> Self {
        fn class(id: &str, name: &str, start: &str, end: &str) -> ClassSession {
            let start = parse_minute_of_day(start).expect("seed timetable start time");
            let end = parse_minute_of_day(end).expect("seed timetable end time");
            ClassSession::new(id, name, start, end).expect("seed timetable bounds")
        }

        let mut timetable = Timetable::new();
        timetable.set_day(
            DayOfWeek::Monday,
            vec![
                class("1", "Mathematics", "08:30", "09:30"),
                class("2", "Physics", "09:40", "10:40"),
                class("3", "Recess", "10:40", "11:00").as_break(),
                class("4", "Literature", "11:00", "12:00"),
                class("5", "Lunch Break", "12:00", "13:00").as_break(),
                class("6", "Computer Science", "13:00", "14:30"),
            ],
        );
        timetable.set_day(
            DayOfWeek::Tuesday,
            vec![
                class("7", "Chemistry", "09:00", "10:30"),
                class("8", "History", "10:45", "12:00"),
            ],
        );
        timetable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sessions() -> Vec<ClassSession> {
        vec![
            ClassSession::new("1", "Mathematics", 8 * 60 + 30, 9 * 60 + 30).unwrap(),
            ClassSession::new("2", "Physics", 9 * 60 + 40, 10 * 60 + 40).unwrap(),
        ]
    }

    #[test]
    fn active_and_next_mid_session() {
        let sessions = two_sessions();
        // 09:00 - inside the first session, second one upcoming.
        let now = 9 * 60;
        assert_eq!(active_session(&sessions, now).unwrap().id, "1");
        assert_eq!(next_session(&sessions, now).unwrap().start_min, 9 * 60 + 40);
    }

    #[test]
    fn gap_between_sessions_has_no_active() {
        let sessions = two_sessions();
        // 09:35 - in the gap.
        let now = 9 * 60 + 35;
        assert!(active_session(&sessions, now).is_none());
        assert_eq!(next_session(&sessions, now).unwrap().id, "2");
    }

    #[test]
    fn session_interval_is_half_open() {
        let sessions = two_sessions();
        assert!(active_session(&sessions, 8 * 60 + 30).is_some());
        assert!(active_session(&sessions, 9 * 60 + 30).is_none());
    }

    #[test]
    fn next_session_none_after_last_start() {
        let sessions = two_sessions();
        assert!(next_session(&sessions, 10 * 60).is_none());
    }

    #[test]
    fn constructor_rejects_inverted_bounds() {
        assert!(ClassSession::new("x", "X", 600, 600).is_err());
        assert!(ClassSession::new("x", "X", 600, 599).is_err());
        assert!(ClassSession::new("x", "X", 1440, 1441).is_err());
    }

    #[test]
    fn parse_and_format_hhmm() {
        assert_eq!(parse_minute_of_day("08:30").unwrap(), 510);
        assert_eq!(parse_minute_of_day("00:00").unwrap(), 0);
        assert_eq!(parse_minute_of_day("23:59").unwrap(), 1439);
        assert!(parse_minute_of_day("24:00").is_err());
        assert!(parse_minute_of_day("0830").is_err());
        assert_eq!(format_minute_of_day(510), "08:30");
    }

    #[test]
    fn seed_timetable_shape() {
        let t = Timetable::seed();
        let monday = t.sessions_for(DayOfWeek::Monday);
        assert_eq!(monday.len(), 6);
        assert_eq!(monday[0].name, "Mathematics");
        assert!(monday[2].is_break && monday[4].is_break);
        assert_eq!(t.sessions_for(DayOfWeek::Tuesday).len(), 2);
        assert!(t.sessions_for(DayOfWeek::Friday).is_empty());
    }

    #[test]
    fn timetable_serde_roundtrip() {
        let t = Timetable::seed();
        let json = serde_json::to_string(&t).unwrap();
        let back: Timetable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
