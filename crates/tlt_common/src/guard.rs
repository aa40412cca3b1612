//! Repeat guard - decides which edit fragments count as typing.
//!
//! Every fragment of an edit batch is classified as a delete, a rejected
//! fragment (paste or held-key spam), or accepted typing input. Only the
//! most recent short fragment is remembered; the window is global, not
//! bucketed per character.

use serde::{Deserialize, Serialize};

/// Longest fragment (in characters) still treated as typing
pub const DEFAULT_MAX_FRAGMENT_LEN: usize = 3;

/// Identical fragments accepted in a row before the rest are dropped
pub const DEFAULT_REPEAT_LIMIT: u32 = 3;

/// One contiguous change inside an edit event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Text inserted by the change
    #[serde(default)]
    pub text: String,
    /// Length of the range the change replaced
    #[serde(default)]
    pub range_length: u64,
}

impl Fragment {
    pub fn new(text: &str, range_length: u64) -> Self {
        Self {
            text: text.to_string(),
            range_length,
        }
    }

    /// Plain insertion with nothing replaced
    pub fn insert(text: &str) -> Self {
        Self::new(text, 0)
    }

    /// Pure deletion of `range_length` characters
    pub fn delete(range_length: u64) -> Self {
        Self::new("", range_length)
    }
}

/// Why a fragment earned nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Longer than a keystroke can produce
    Paste,
    /// Same fragment repeated past the limit
    HeldKey,
    /// Nothing inserted and nothing replaced
    Empty,
}

/// Classification of a single fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Delete,
    Rejected(RejectReason),
    Accepted(String),
}

impl Classification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted(_))
    }
}

/// Repeat guard thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Longest fragment (in characters) still treated as typing
    #[serde(default = "default_max_fragment_len")]
    pub max_fragment_len: usize,

    /// Identical fragments accepted in a row
    #[serde(default = "default_repeat_limit")]
    pub repeat_limit: u32,
}

fn default_max_fragment_len() -> usize {
    DEFAULT_MAX_FRAGMENT_LEN
}

fn default_repeat_limit() -> u32 {
    DEFAULT_REPEAT_LIMIT
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_fragment_len: DEFAULT_MAX_FRAGMENT_LEN,
            repeat_limit: DEFAULT_REPEAT_LIMIT,
        }
    }
}

/// Rolling repeat state, lives for the process only
#[derive(Debug, Clone, Default)]
pub struct RepeatGuard {
    config: GuardConfig,
    last_fragment: String,
    consecutive_repeats: u32,
}

impl RepeatGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self {
            config,
            last_fragment: String::new(),
            consecutive_repeats: 0,
        }
    }

    pub fn config(&self) -> GuardConfig {
        self.config
    }

    /// Text of the most recent short fragment
    pub fn last_fragment(&self) -> &str {
        &self.last_fragment
    }

    /// How many times in a row `last_fragment` has been seen (0 before any)
    pub fn consecutive_repeats(&self) -> u32 {
        self.consecutive_repeats
    }

    /// Classify one fragment, updating the rolling state
    pub fn classify(&mut self, fragment: &Fragment) -> Classification {
        if fragment.text.is_empty() {
            if fragment.range_length > 0 {
                return Classification::Delete;
            }
            return Classification::Rejected(RejectReason::Empty);
        }

        if fragment.text.chars().count() > self.config.max_fragment_len {
            return Classification::Rejected(RejectReason::Paste);
        }

        // Repeats keep counting while rejected: a long hold stays rejected
        // until a different fragment breaks the streak.
        if fragment.text == self.last_fragment {
            self.consecutive_repeats = self.consecutive_repeats.saturating_add(1);
        } else {
            self.last_fragment.clone_from(&fragment.text);
            self.consecutive_repeats = 1;
        }

        if self.consecutive_repeats > self.config.repeat_limit {
            Classification::Rejected(RejectReason::HeldKey)
        } else {
            Classification::Accepted(fragment.text.clone())
        }
    }

    /// Classify a whole batch in order
    pub fn classify_batch(&mut self, fragments: &[Fragment]) -> Vec<Classification> {
        fragments.iter().map(|f| self.classify(f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_does_not_touch_repeat_state() {
        let mut guard = RepeatGuard::default();
        assert!(guard.classify(&Fragment::insert("a")).is_accepted());
        assert_eq!(guard.classify(&Fragment::delete(1)), Classification::Delete);
        assert_eq!(guard.last_fragment(), "a");
        assert_eq!(guard.consecutive_repeats(), 1);
    }

    #[test]
    fn test_replacement_with_text_is_not_delete() {
        let mut guard = RepeatGuard::new(GuardConfig::default());
        assert_eq!(
            guard.classify(&Fragment::new("x", 4)),
            Classification::Accepted("x".to_string())
        );
    }

    #[test]
    fn test_paste_rejected_without_state_change() {
        let mut guard = RepeatGuard::new(GuardConfig::default());
        guard.classify(&Fragment::insert("ab"));
        assert_eq!(
            guard.classify(&Fragment::insert("abcd")),
            Classification::Rejected(RejectReason::Paste)
        );
        assert_eq!(guard.last_fragment(), "ab");
        assert_eq!(guard.consecutive_repeats(), 1);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut guard = RepeatGuard::new(GuardConfig::default());
        // Three characters, nine bytes
        assert!(guard.classify(&Fragment::insert("日本語")).is_accepted());
    }

    #[test]
    fn test_held_key_rejected_after_limit() {
        let mut guard = RepeatGuard::new(GuardConfig::default());
        let a = Fragment::insert("a");
        assert!(guard.classify(&a).is_accepted());
        assert!(guard.classify(&a).is_accepted());
        assert!(guard.classify(&a).is_accepted());
        assert_eq!(
            guard.classify(&a),
            Classification::Rejected(RejectReason::HeldKey)
        );
        assert_eq!(guard.consecutive_repeats(), 4);

        // Still rejected, still counting
        assert!(!guard.classify(&a).is_accepted());
        assert_eq!(guard.consecutive_repeats(), 5);

        assert!(guard.classify(&Fragment::insert("b")).is_accepted());
        assert_eq!(guard.consecutive_repeats(), 1);
        assert_eq!(guard.last_fragment(), "b");
    }

    #[test]
    fn test_empty_change_rejected() {
        let mut guard = RepeatGuard::new(GuardConfig::default());
        assert_eq!(
            guard.classify(&Fragment::insert("")),
            Classification::Rejected(RejectReason::Empty)
        );
        assert_eq!(guard.consecutive_repeats(), 0);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut guard = RepeatGuard::new(GuardConfig {
            max_fragment_len: 1,
            repeat_limit: 1,
        });
        assert_eq!(
            guard.classify(&Fragment::insert("ab")),
            Classification::Rejected(RejectReason::Paste)
        );
        assert!(guard.classify(&Fragment::insert("a")).is_accepted());
        assert!(!guard.classify(&Fragment::insert("a")).is_accepted());
    }

    #[test]
    fn test_classify_batch_preserves_order() {
        let mut guard = RepeatGuard::new(GuardConfig::default());
        let batch = vec![
            Fragment::insert("x"),
            Fragment::delete(2),
            Fragment::insert("hello"),
        ];
        let result = guard.classify_batch(&batch);
        assert_eq!(
            result,
            vec![
                Classification::Accepted("x".to_string()),
                Classification::Delete,
                Classification::Rejected(RejectReason::Paste),
            ]
        );
    }
}
