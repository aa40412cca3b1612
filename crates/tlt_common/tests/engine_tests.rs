//! End-to-end tests for the typing engine: guard, rollover, store, presenter.

use tlt_common::{
    progress_bar, required_xp_for_level, BarWidths, Classification, Fragment, GuardConfig,
    JsonFileStore, MemoryStore, ProgressState, RecordingPresenter, RejectReason, RepeatGuard,
    StateStore, Tracker,
};

fn fresh_tracker() -> Tracker<MemoryStore, RecordingPresenter> {
    Tracker::new(
        MemoryStore::new(),
        RecordingPresenter::default(),
        GuardConfig::default(),
        BarWidths::default(),
    )
}

/// Cycle through letters so the repeat guard never fires
fn distinct_char(i: usize) -> String {
    let c = (b'a' + (i % 26) as u8) as char;
    c.to_string()
}

#[test]
fn test_required_xp_examples() {
    assert_eq!(required_xp_for_level(1), 100);
    assert_eq!(required_xp_for_level(5), 101);
    assert_eq!(required_xp_for_level(10), 108);
}

#[test]
fn test_progress_bar_examples() {
    assert_eq!(progress_bar(0.0, 5), "[□□□□□]");
    assert_eq!(progress_bar(100.0, 5), "[■■■■■]");
    assert_eq!(progress_bar(50.0, 4), "[■■□□]");
}

#[test]
fn test_hundred_characters_reach_level_two() {
    let mut tracker = fresh_tracker();
    for i in 0..100 {
        tracker
            .on_edit_batch(&[Fragment::insert(&distinct_char(i))], "rust")
            .unwrap();
    }

    let state = tracker.state();
    assert_eq!(state.level, 2);
    assert_eq!(state.current_xp, 0);
    assert_eq!(state.total_xp, 100);
    assert_eq!(state.input_count, 100);
    assert_eq!(state.lang_xp.get("rust"), Some(&100));
    assert_eq!(tracker.presenter().level_ups, vec![2]);
}

#[test]
fn test_fourth_repeat_rejected_then_reset() {
    let mut guard = RepeatGuard::new(GuardConfig::default());
    let a = Fragment::insert("a");

    let results: Vec<Classification> = (0..4).map(|_| guard.classify(&a)).collect();
    assert!(results[0].is_accepted());
    assert!(results[1].is_accepted());
    assert!(results[2].is_accepted());
    assert_eq!(results[3], Classification::Rejected(RejectReason::HeldKey));

    assert_eq!(
        guard.classify(&Fragment::insert("b")),
        Classification::Accepted("b".to_string())
    );
    assert_eq!(guard.consecutive_repeats(), 1);
}

#[test]
fn test_long_fragments_never_grant_xp() {
    let mut tracker = fresh_tracker();
    for text in ["abcd", "fn main() {}", "    ", "日本語です"] {
        tracker.on_edit_batch(&[Fragment::insert(text)], "rust").unwrap();
    }
    let state = tracker.state();
    assert_eq!(state.input_count, 0);
    assert_eq!(state.current_xp, 0);
    assert!(state.lang_xp.is_empty());
}

#[test]
fn test_paste_between_repeats_keeps_streak() {
    let mut tracker = fresh_tracker();
    let x = Fragment::insert("x");
    let paste = Fragment::insert("clipboard contents");
    let batch = vec![x.clone(), paste.clone(), x.clone(), paste, x.clone(), x];
    let outcome = tracker.on_edit_batch(&batch, "text").unwrap();
    // Pastes do not break the streak, so the fourth "x" is held-key spam
    assert_eq!(outcome.accepted, 3);
    assert_eq!(outcome.rejected, 3);
    assert_eq!(tracker.state().total_xp, 3);
}

#[test]
fn test_deletes_only_touch_delete_count() {
    let mut tracker = fresh_tracker();
    tracker
        .on_edit_batch(&[Fragment::insert("ab"), Fragment::insert("c")], "go")
        .unwrap();
    let before = tracker.state().clone();

    tracker
        .on_edit_batch(&[Fragment::delete(3), Fragment::delete(1)], "go")
        .unwrap();

    let after = tracker.state();
    assert_eq!(after.delete_count, before.delete_count + 2);
    assert_eq!(after.current_xp, before.current_xp);
    assert_eq!(after.total_xp, before.total_xp);
    assert_eq!(after.input_count, before.input_count);
}

#[test]
fn test_invariants_hold_over_long_session() {
    let mut tracker = fresh_tracker();
    let mut expected_total = 0u64;
    let mut last_level = 1;

    for i in 0..5_000usize {
        let fragment = match i % 7 {
            0 => Fragment::delete(1),
            1 => Fragment::insert("word and more"),
            2 => Fragment::insert(" \n"),
            _ => Fragment::insert(&format!("{}{}", distinct_char(i), distinct_char(i / 26))),
        };
        let outcome = tracker.on_edit_batch(&[fragment], "rust").unwrap();
        expected_total += outcome.xp_gained;

        let state = tracker.state();
        assert!(state.current_xp < required_xp_for_level(state.level));
        assert!(state.level >= last_level);
        assert_eq!(state.total_xp, expected_total);
        last_level = state.level;
    }
    assert!(last_level > 10);
}

#[test]
fn test_saves_separate_from_xp() {
    let mut tracker = fresh_tracker();
    tracker.on_save().unwrap();
    tracker.on_save().unwrap();
    assert_eq!(tracker.state().save_count, 2);
    assert_eq!(tracker.state().total_xp, 0);
}

#[test]
fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    {
        let mut tracker = Tracker::new(
            JsonFileStore::new(&path),
            RecordingPresenter::default(),
            GuardConfig::default(),
            BarWidths::default(),
        );
        tracker
            .on_edit_batch(&[Fragment::insert("h"), Fragment::insert("i")], "markdown")
            .unwrap();
        tracker.on_save().unwrap();
    }

    let restarted = Tracker::new(
        JsonFileStore::new(&path),
        RecordingPresenter::default(),
        GuardConfig::default(),
        BarWidths::default(),
    );
    let state = restarted.state();
    assert_eq!(state.total_xp, 2);
    assert_eq!(state.save_count, 1);
    assert_eq!(state.lang_xp.get("markdown"), Some(&2));
    assert_eq!(
        restarted.presenter().status_lines,
        vec!["Lv 1 [□□□□□] (2.0%)"]
    );
}

#[test]
fn test_corrupt_store_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "garbage").unwrap();

    let store = JsonFileStore::new(&path);
    assert_eq!(store.load(), ProgressState::new());
}
