//! Tracker - drives the guard, the progress state, the store and the presenter.
//!
//! One edit batch is processed fragment by fragment to completion, then the
//! state is persisted once and the status line re-rendered. Callers hold the
//! tracker by `&mut`, so batches can never interleave.

use crate::config::TrackerConfig;
use crate::display::{detail_report, status_line, Presenter};
use crate::error::Result;
use crate::guard::{Classification, Fragment, GuardConfig, RepeatGuard};
use crate::progress::{LevelUp, ProgressState};
use crate::store::StateStore;
use tracing::debug;

/// What one edit batch did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub accepted: usize,
    pub rejected: usize,
    pub deleted: usize,
    pub xp_gained: u64,
    pub level_ups: Vec<LevelUp>,
}

impl BatchOutcome {
    /// Whether the batch changed the persisted record
    pub fn changed_state(&self) -> bool {
        self.accepted > 0 || self.deleted > 0
    }
}

/// Bar widths used when rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarWidths {
    pub status: usize,
    pub detail: usize,
}

impl Default for BarWidths {
    fn default() -> Self {
        Self {
            status: 5,
            detail: 10,
        }
    }
}

/// Typing tracker bound to a store and a presenter
pub struct Tracker<S: StateStore, P: Presenter> {
    state: ProgressState,
    guard: RepeatGuard,
    store: S,
    presenter: P,
    widths: BarWidths,
}

impl<S: StateStore, P: Presenter> Tracker<S, P> {
    /// Load state from `store` and render the initial status line
    pub fn new(store: S, presenter: P, guard: GuardConfig, widths: BarWidths) -> Self {
        let state = store.load();
        debug!(
            level = state.level,
            current_xp = state.current_xp,
            total_xp = state.total_xp,
            "Tracker state loaded"
        );
        let mut tracker = Self {
            state,
            guard: RepeatGuard::new(guard),
            store,
            presenter,
            widths,
        };
        tracker.refresh_status();
        tracker
    }

    /// Build from a loaded configuration
    pub fn from_config(store: S, presenter: P, config: &TrackerConfig) -> Self {
        let widths = BarWidths {
            status: config.display.status_bar_width,
            detail: config.display.detail_bar_width,
        };
        Self::new(store, presenter, config.guard, widths)
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn guard(&self) -> &RepeatGuard {
        &self.guard
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Process one edit event from a document in `language_id`
    ///
    /// Level-up notices are pushed in order before the status line. The
    /// in-memory state is updated even when persisting fails.
    pub fn on_edit_batch(&mut self, fragments: &[Fragment], language_id: &str) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::default();

        for fragment in fragments {
            let classification = self.guard.classify(fragment);
            match &classification {
                Classification::Delete => outcome.deleted += 1,
                Classification::Rejected(reason) => {
                    debug!(?reason, len = fragment.text.chars().count(), "Fragment rejected");
                    outcome.rejected += 1;
                }
                Classification::Accepted(text) => {
                    outcome.accepted += 1;
                    outcome.xp_gained += text.chars().count() as u64;
                }
            }

            let level_ups = self.state.apply(&classification, language_id);
            for level_up in &level_ups {
                self.presenter.show_level_up_notice(level_up.level);
            }
            outcome.level_ups.extend(level_ups);
        }

        debug!(
            language = language_id,
            accepted = outcome.accepted,
            rejected = outcome.rejected,
            deleted = outcome.deleted,
            xp = outcome.xp_gained,
            "Edit batch processed"
        );

        if outcome.changed_state() {
            self.refresh_status();
            self.store.save(&self.state)?;
        }
        Ok(outcome)
    }

    /// Process a document save
    pub fn on_save(&mut self) -> Result<()> {
        self.state.record_save();
        debug!(saves = self.state.save_count, "Save recorded");
        self.refresh_status();
        self.store.save(&self.state)
    }

    /// The "show details" command
    pub fn show_details(&mut self) {
        let report = detail_report(&self.state, self.widths.detail);
        self.presenter.show_detail_report(&report);
    }

    /// Current status line text
    pub fn status_text(&self) -> String {
        status_line(&self.state, self.widths.status)
    }

    fn refresh_status(&mut self) {
        let text = self.status_text();
        self.presenter.render_status_line(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RecordingPresenter;
    use crate::store::MemoryStore;

    fn tracker() -> Tracker<MemoryStore, RecordingPresenter> {
        Tracker::new(
            MemoryStore::new(),
            RecordingPresenter::default(),
            GuardConfig::default(),
            BarWidths::default(),
        )
    }

    #[test]
    fn test_initial_status_rendered() {
        let t = tracker();
        assert_eq!(t.presenter().status_lines, vec!["Lv 1 [□□□□□] (0.0%)"]);
        assert_eq!(t.store().saves(), 0);
    }

    #[test]
    fn test_mixed_batch() {
        let mut t = tracker();
        let batch = vec![
            Fragment::insert("a"),
            Fragment::delete(1),
            Fragment::insert("pasted text"),
            Fragment::insert(" "),
        ];
        let outcome = t.on_edit_batch(&batch, "rust").unwrap();
        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.deleted, 1);
        assert_eq!(outcome.rejected, 1);
        assert_eq!(outcome.xp_gained, 2);
        assert_eq!(t.state().delete_count, 1);
        assert_eq!(t.state().space_count, 1);
        assert_eq!(t.store().saves(), 1);
        assert_eq!(t.store().stored().unwrap().total_xp, 2);
    }

    #[test]
    fn test_rejected_only_batch_skips_save() {
        let mut t = tracker();
        let outcome = t
            .on_edit_batch(&[Fragment::insert("whole line pasted")], "rust")
            .unwrap();
        assert!(!outcome.changed_state());
        assert_eq!(t.store().saves(), 0);
        assert_eq!(t.presenter().status_lines.len(), 1);
    }

    #[test]
    fn test_level_up_notice_before_status() {
        let mut t = tracker();
        let mut state = ProgressState::new();
        state.current_xp = 99;
        t.state = state;

        let outcome = t.on_edit_batch(&[Fragment::insert("z")], "go").unwrap();
        assert_eq!(outcome.level_ups, vec![LevelUp { level: 2 }]);
        assert_eq!(t.presenter().level_ups, vec![2]);
        assert_eq!(
            t.presenter().status_lines.last().map(String::as_str),
            Some("Lv 2 [□□□□□] (0.0%)")
        );
    }

    #[test]
    fn test_save_event() {
        let mut t = tracker();
        t.on_save().unwrap();
        assert_eq!(t.state().save_count, 1);
        assert_eq!(t.store().stored().unwrap().save_count, 1);
        assert_eq!(t.presenter().status_lines.len(), 2);
    }

    #[test]
    fn test_show_details_uses_detail_width() {
        let mut t = Tracker::new(
            MemoryStore::new(),
            RecordingPresenter::default(),
            GuardConfig::default(),
            BarWidths { status: 5, detail: 3 },
        );
        t.show_details();
        assert_eq!(t.presenter().reports.len(), 1);
        assert!(t.presenter().reports[0].contains("[□□□]"));
    }

    #[test]
    fn test_loads_existing_state() {
        let mut state = ProgressState::new();
        state.level = 6;
        state.total_xp = 600;
        let t = Tracker::new(
            MemoryStore::with_state(state),
            RecordingPresenter::default(),
            GuardConfig::default(),
            BarWidths::default(),
        );
        assert_eq!(t.state().level, 6);
        assert!(t.presenter().status_lines[0].starts_with("Lv 6 "));
    }
}
