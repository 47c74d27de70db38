//! Durable wrapper around [`AppState`].
//!
//! The store owns the database handle, the in-memory state, and the
//! per-school-day pending topic counter. Every mutator applies one state
//! transition and then persists synchronously. Persistence failure is
//! logged and swallowed: the in-memory copy stays authoritative for the
//! rest of the process, and a missing or corrupt blob on the next start
//! simply re-seeds.

use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike, Utc};
use tracing::warn;

use crate::assignments::{urgent_assignments, Priority};
use crate::error::CoreError;
use crate::events::Event;
use crate::progression::progress_fraction;
use crate::state::AppState;
use crate::storage::{Config, Database};
use crate::timer::TimerState;
use crate::timetable::{active_session, next_session, ClassSession, DayOfWeek};

const STATE_KEY: &str = "app_state";
const PENDING_TOPICS_KEY: &str = "pending_topics";

pub struct StateStore {
    db: Database,
    state: AppState,
    /// Topics logged since the last bell. Runtime scratch, persisted under
    /// its own key so separate CLI invocations share it.
    pending_topics: u32,
}

impl StateStore {
    /// Open the default database and load or seed state.
    ///
    /// # Errors
    /// Returns an error only if the database itself cannot be opened;
    /// unreadable state is seeded, never an error.
    pub fn open() -> Result<Self, CoreError> {
        let db = Database::open()?;
        Ok(Self::open_with(db, Local::now().date_naive(), Utc::now()))
    }

    /// Load from `db`, seeding defaults (relative to `today`) when the
    /// blob is absent or corrupt.
    pub fn open_with(db: Database, today: NaiveDate, now: DateTime<Utc>) -> Self {
        let state = match db.kv_get(STATE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<AppState>(&json) {
                Ok(state) => state,
                Err(e) => {
                    warn!(error = %e, "stored state unreadable, seeding defaults");
                    AppState::seed(today, now)
                }
            },
            Ok(None) => AppState::seed(today, now),
            Err(e) => {
                warn!(error = %e, "could not read stored state, seeding defaults");
                AppState::seed(today, now)
            }
        };
        let pending_topics = db
            .kv_get(PENDING_TOPICS_KEY)
            .ok()
            .flatten()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        Self {
            db,
            state,
            pending_topics,
        }
    }

    /// Overlay the configured custom timetable, if any.
    pub fn apply_config(&mut self, config: &Config) {
        if let Some(custom) = &config.custom_timetable {
            self.state.timetable = custom.clone();
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn pending_topics(&self) -> u32 {
        self.pending_topics
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Build a full dashboard snapshot event for `now`.
    pub fn snapshot(&self, now: DateTime<Local>) -> Event {
        let day = DayOfWeek::from(now.weekday());
        let sessions = self.state.timetable.sessions_for(day);
        let time = now.time();
        let now_secs = time.num_seconds_from_midnight();
        let now_min = (now_secs / 60) as u16;

        let active = active_session(sessions, now_min).cloned();
        let next = next_session(sessions, now_min).cloned();
        let timer_state = if self.state.school_mode_active && active.is_some() {
            TimerState::Running
        } else {
            TimerState::Idle
        };
        let remaining = active.as_ref().map(|s| {
            let secs = (u32::from(s.end_min) * 60).saturating_sub(now_secs);
            format!("{:02}:{:02}", secs / 60, secs % 60)
        });
        let urgent_count = urgent_assignments(&self.state.assignments, now.naive_local()).len();

        Event::StateSnapshot {
            school_mode_active: self.state.school_mode_active,
            timer_state,
            xp: self.state.stats.xp,
            level: self.state.stats.level,
            progress: progress_fraction(self.state.stats.xp),
            streak: self.state.stats.streak,
            attendance_days: self.state.stats.attendance.len(),
            active_session: active,
            next_session: next,
            remaining,
            urgent_count,
            at: Utc::now(),
        }
    }

    // ── Mutators ─────────────────────────────────────────────────────

    pub fn complete_task(&mut self, id: &str) -> Vec<Event> {
        let events = self.state.complete_task(id, Utc::now());
        if !events.is_empty() {
            self.persist_state();
        }
        events
    }

    pub fn toggle_school_mode(&mut self) -> Vec<Event> {
        let events = self
            .state
            .toggle_school_mode(Local::now().date_naive(), Utc::now());
        self.persist_state();
        events
    }

    pub fn log_topic(&mut self) -> Vec<Event> {
        self.pending_topics += 1;
        self.persist_pending();
        vec![Event::TopicLogged {
            pending: self.pending_topics,
            at: Utc::now(),
        }]
    }

    pub fn handle_bell(&mut self, session: &ClassSession) -> Vec<Event> {
        let events = self.state.handle_bell(session, self.pending_topics, Utc::now());
        let banked = events.iter().any(
            |e| matches!(e, Event::BellAwarded { topics_banked, .. } if *topics_banked > 0),
        );
        if banked {
            self.pending_topics = 0;
            self.persist_pending();
        }
        self.persist_state();
        events
    }

    pub fn add_assignment(
        &mut self,
        title: impl Into<String>,
        subject: impl Into<String>,
        due_date: NaiveDate,
        xp_reward: u64,
        priority: Priority,
    ) -> Vec<Event> {
        let events = self
            .state
            .add_assignment(title, subject, due_date, xp_reward, priority, Utc::now());
        self.persist_state();
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist_state(&self) {
        let json = match serde_json::to_string(&self.state) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not serialize state; keeping in-memory copy only");
                return;
            }
        };
        if let Err(e) = self.db.kv_set(STATE_KEY, &json) {
            warn!(error = %e, "could not persist state; keeping in-memory copy only");
        }
    }

    fn persist_pending(&self) {
        if let Err(e) = self
            .db
            .kv_set(PENDING_TOPICS_KEY, &self.pending_topics.to_string())
        {
            warn!(error = %e, "could not persist pending topic counter");
        }
    }
}
