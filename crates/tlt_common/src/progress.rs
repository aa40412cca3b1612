//! Progress state - levels, XP and typing counters.
//!
//! Single persisted record per user. XP only increases, levels only go up,
//! counters never decrease.

use crate::guard::Classification;
use crate::leveling::{clamped_percentage, level_percentage, required_xp_for_level};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// A single level reached during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    /// Level just reached
    pub level: u64,
}

/// Persisted typing progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Current level (starts at 1)
    #[serde(default = "default_level")]
    pub level: u64,
    /// XP gathered toward the next level
    #[serde(default)]
    pub current_xp: u64,
    /// Lifetime XP
    #[serde(default)]
    pub total_xp: u64,
    /// Characters accepted as typing
    #[serde(default)]
    pub input_count: u64,
    #[serde(default)]
    pub space_count: u64,
    #[serde(default)]
    pub delete_count: u64,
    #[serde(default)]
    pub enter_count: u64,
    #[serde(default)]
    pub save_count: u64,
    /// Lifetime XP per language id
    #[serde(default)]
    pub lang_xp: BTreeMap<String, u64>,
    /// Last time anything changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
}

fn default_level() -> u64 {
    1
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressState {
    pub fn new() -> Self {
        Self {
            level: 1,
            current_xp: 0,
            total_xp: 0,
            input_count: 0,
            space_count: 0,
            delete_count: 0,
            enter_count: 0,
            save_count: 0,
            lang_xp: BTreeMap::new(),
            last_update: None,
        }
    }

    /// XP needed to finish the current level
    pub fn required_xp(&self) -> u64 {
        required_xp_for_level(self.level)
    }

    /// Raw progress through the current level, in percent
    pub fn percentage(&self) -> f64 {
        level_percentage(self.current_xp, self.level)
    }

    /// Progress clamped to 0-100 for the status line
    pub fn clamped_percentage(&self) -> f64 {
        clamped_percentage(self.current_xp, self.level)
    }

    /// Languages ordered by XP (highest first), ties by name
    pub fn languages_by_xp(&self) -> Vec<(&str, u64)> {
        let mut langs: Vec<(&str, u64)> =
            self.lang_xp.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        langs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        langs
    }

    /// Apply one classified fragment typed in `language_id`
    ///
    /// Returns every level reached, in order.
    pub fn apply(&mut self, classification: &Classification, language_id: &str) -> Vec<LevelUp> {
        match classification {
            Classification::Delete => {
                self.delete_count = self.delete_count.saturating_add(1);
                self.touch();
                Vec::new()
            }
            Classification::Rejected(_) => Vec::new(),
            Classification::Accepted(text) => self.record_input(text, language_id),
        }
    }

    /// Record a document save
    pub fn record_save(&mut self) {
        self.save_count = self.save_count.saturating_add(1);
        self.touch();
    }

    fn record_input(&mut self, text: &str, language_id: &str) -> Vec<LevelUp> {
        let xp_gain = text.chars().count() as u64;

        self.input_count = self.input_count.saturating_add(xp_gain);
        let lang = self.lang_xp.entry(language_id.to_string()).or_insert(0);
        *lang = lang.saturating_add(xp_gain);

        let spaces = text.chars().filter(|c| *c == ' ').count() as u64;
        let enters = text.chars().filter(|c| *c == '\n').count() as u64;
        self.space_count = self.space_count.saturating_add(spaces);
        self.enter_count = self.enter_count.saturating_add(enters);

        self.current_xp = self.current_xp.saturating_add(xp_gain);
        self.total_xp = self.total_xp.saturating_add(xp_gain);
        self.touch();

        self.roll_over()
    }

    /// Convert surplus XP into levels
    fn roll_over(&mut self) -> Vec<LevelUp> {
        let mut level_ups = Vec::new();
        loop {
            let required = self.required_xp();
            if self.current_xp < required {
                break;
            }
            self.current_xp -= required;
            self.level += 1;
            info!(level = self.level, "Level up");
            level_ups.push(LevelUp { level: self.level });
        }
        level_ups
    }

    /// Repair a loaded record so the invariants hold again
    ///
    /// Level 0 becomes 1 and surplus XP is rolled over without notices.
    pub fn normalize(&mut self) -> usize {
        if self.level == 0 {
            self.level = 1;
        }
        self.roll_over().len()
    }

    fn touch(&mut self) {
        self.last_update = Some(Utc::now());
    }
}
