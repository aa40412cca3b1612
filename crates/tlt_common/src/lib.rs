//! Typing Level Tracker - shared engine
//!
//! Turns an editor's keystroke stream into XP, levels and per-language
//! statistics.
//!
//! - `leveling`: XP curve and progress bars
//! - `guard`: repeat guard that filters pastes and held keys
//! - `progress`: the persisted progress record and level rollover
//! - `tracker`: event entry points wiring everything together
//! - `display`: status line, level-up notices, detail report
//! - `store`: JSON file and in-memory state stores
//! - `config`: TOML configuration

pub mod config;
pub mod display;
pub mod error;
pub mod guard;
pub mod leveling;
pub mod progress;
pub mod store;
pub mod tracker;

pub use config::{ColorMode, TrackerConfig};
pub use display::{NullPresenter, Presenter, RecordingPresenter};
pub use error::TrackerError;
pub use guard::{Classification, Fragment, GuardConfig, RejectReason, RepeatGuard};
pub use leveling::{progress_bar, required_xp_for_level};
pub use progress::{LevelUp, ProgressState};
pub use store::{JsonFileStore, MemoryStore, StateStore};
pub use tracker::{BarWidths, BatchOutcome, Tracker};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
