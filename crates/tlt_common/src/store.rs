//! State store - durable home for the progress record.
//!
//! Reads never fail: a missing file gives a fresh record and a corrupt one
//! falls back to defaults with a warning. Writes go to a temp file first and
//! are renamed into place.

use crate::error::{Result, TrackerError};
use crate::progress::ProgressState;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name under the XDG data/config dirs
pub const APP_DIR: &str = "typing-level-tracker";

/// State file name
pub const STATE_FILE: &str = "state.json";

/// Environment override for the state file
pub const STATE_FILE_ENV: &str = "TLT_STATE_FILE";

/// Load/store for the single progress record
pub trait StateStore {
    /// Load the record, falling back to defaults on any problem
    fn load(&self) -> ProgressState;

    /// Persist the record
    fn save(&mut self, state: &ProgressState) -> Result<()>;
}

/// Resolve the state file path
///
/// Priority:
/// 1. $TLT_STATE_FILE
/// 2. $XDG_DATA_HOME/typing-level-tracker/state.json (or platform equivalent)
pub fn default_state_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(STATE_FILE_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let data_dir = dirs::data_dir().ok_or(TrackerError::NoDirectory("data"))?;
    Ok(data_dir.join(APP_DIR).join(STATE_FILE))
}

/// Progress record stored as pretty JSON
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(default_state_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| STATE_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> ProgressState {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file yet, starting fresh");
                return ProgressState::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cannot read state, using defaults");
                return ProgressState::new();
            }
        };

        let mut state: ProgressState = match serde_json::from_str(&data) {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt state, using defaults");
                return ProgressState::new();
            }
        };

        let repaired = state.normalize();
        if repaired > 0 {
            warn!(levels = repaired, "Loaded state had surplus XP, rolled over");
        }
        state
    }

    fn save(&mut self, state: &ProgressState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_string_pretty(state)?;
        let tmp = self.temp_path();
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), total_xp = state.total_xp, "State saved");
        Ok(())
    }
}

/// In-process store for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Option<ProgressState>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a record
    pub fn with_state(state: ProgressState) -> Self {
        Self {
            state: Some(state),
            saves: 0,
        }
    }

    /// Number of successful saves so far
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Last saved record
    pub fn stored(&self) -> Option<&ProgressState> {
        self.state.as_ref()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> ProgressState {
        self.state.clone().unwrap_or_default()
    }

    fn save(&mut self, state: &ProgressState) -> Result<()> {
        self.state = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}
