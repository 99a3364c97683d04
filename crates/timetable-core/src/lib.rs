//! # Timetable Core Library
//!
//! Core business logic for Timetable, a personal scheduling and progress
//! tracker. The library follows a CLI-first philosophy: every operation is
//! available through the `timetable` binary, and any richer front end is a
//! thin layer over the same engine.
//!
//! ## Architecture
//!
//! - **Work registry**: owns the recurring work items and validates them at
//!   the boundary
//! - **Progress ledger**: one completion log per (work item, day), upsert
//!   semantics with a first-log experience reward
//! - **Gamification**: lifetime experience and the level derived from it
//! - **Day projection**: read-only "what is due today / what is parked"
//!   views over the registry
//! - **Back-casting**: expands a deadline goal into one ramped plan step
//!   per remaining day
//! - **Storage**: JSON snapshot blobs behind a small store trait, plus
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimetableEngine`]: the constructible facade owning all domain state
//! - [`AuthStore`]: the signed-in user and app settings
//! - [`StateStore`]: the persistence seam (file-backed or in-memory)
//! - [`Config`]: application configuration management

pub mod auth;
pub mod backcast;
pub mod engine;
pub mod error;
pub mod gamification;
pub mod ids;
pub mod progress;
pub mod projector;
pub mod report;
pub mod storage;
pub mod work;

pub use auth::{AppSettings, AuthState, AuthStore, SettingsPatch, User, ViewMode};
pub use engine::TimetableEngine;
pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use gamification::{FitnessGoal, FitnessProfile, GamificationEngine, ProfilePatch};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use progress::{LogOutcome, Mood, ProgressLedger, ProgressLog};
pub use projector::{weekday_index, DayProjector};
pub use report::{daily_report, DailyReport, ReportRow};
pub use storage::{Config, JsonFileStore, MemoryStore, StateStore};
pub use work::registry::WorkRegistry;
pub use work::{Category, Equipment, WorkDraft, WorkItem, WorkPatch};
