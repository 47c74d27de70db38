//! # StudyQuest Core Library
//!
//! This library provides the core business logic for StudyQuest, a
//! gamified student-productivity dashboard. It implements a CLI-first
//! philosophy where all operations are available via a standalone CLI
//! binary, with any GUI being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Bell Timer**: A wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` over the day's timetable
//! - **State Store**: The single mutable aggregate (stats, timetable,
//!   assignments, school mode), persisted as one blob after every change
//! - **Progression**: Pure XP-to-level arithmetic
//! - **Triage**: Deadline urgency classification
//! - **Advisor**: Best-effort AI collaborator for motivational text and
//!   the daily-boss recommendation; failures degrade to static defaults
//!
//! ## Key Components
//!
//! - [`BellTimer`]: Session countdown and bell state machine
//! - [`StateStore`]: Durable application state
//! - [`Config`]: Application configuration management
//! - [`Advisor`]: Trait for external text-generation collaborators

pub mod advisor;
pub mod assignments;
pub mod error;
pub mod events;
pub mod progression;
pub mod state;
pub mod storage;
pub mod timer;
pub mod timetable;

pub use advisor::{Advisor, BossSuggestion, GeminiAdvisor};
pub use assignments::{days_remaining, urgent_assignments, Assignment, DueLabel, Priority};
pub use error::{AdvisorError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use progression::{level_for, progress_fraction, Badge, XP_PER_LEVEL};
pub use state::{AppState, StateStore, TopicRecord, UserStats};
pub use storage::{Config, Database};
pub use timer::{BellTimer, TimerState};
pub use timetable::{ClassSession, DayOfWeek, Timetable};
