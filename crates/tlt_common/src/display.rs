//! Display Module
//!
//! Formats progress for the status line, level-up notices and the detail
//! report, and defines the output port the engine pushes them through.
//!
//! Formatting is pure: every function takes the state and returns text.

use crate::leveling::progress_bar;
use crate::progress::ProgressState;

/// Tooltip shown next to the status line
pub const STATUS_TOOLTIP: &str = "Click to see details";

/// Output port for presentation
pub trait Presenter {
    /// Replace the status line text
    fn render_status_line(&mut self, text: &str);

    /// Announce a level just reached
    fn show_level_up_notice(&mut self, level: u64);

    /// Show the full detail report
    fn show_detail_report(&mut self, text: &str);
}

/// Presenter that drops everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render_status_line(&mut self, _text: &str) {}
    fn show_level_up_notice(&mut self, _level: u64) {}
    fn show_detail_report(&mut self, _text: &str) {}
}

/// Presenter that keeps every output, in order
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub status_lines: Vec<String>,
    pub level_ups: Vec<u64>,
    pub reports: Vec<String>,
}

impl Presenter for RecordingPresenter {
    fn render_status_line(&mut self, text: &str) {
        self.status_lines.push(text.to_string());
    }

    fn show_level_up_notice(&mut self, level: u64) {
        self.level_ups.push(level);
    }

    fn show_detail_report(&mut self, text: &str) {
        self.reports.push(text.to_string());
    }
}

/// Status line: `Lv 3 [■■□□□] (42.0%)`
pub fn status_line(state: &ProgressState, bar_width: usize) -> String {
    let pct = state.clamped_percentage();
    format!("Lv {} {} ({:.1}%)", state.level, progress_bar(pct, bar_width), pct)
}

/// Level-up notice text
pub fn level_up_message(level: u64) -> String {
    format!("Level Up! You reached Lv {}!", level)
}

/// Title of the detail report
pub fn detail_title(state: &ProgressState) -> String {
    format!("Level {}", state.level)
}

/// Multi-line detail report
///
/// The percentage here is the raw ratio, not clamped.
pub fn detail_report(state: &ProgressState, bar_width: usize) -> String {
    let pct = state.percentage();
    let mut lines = Vec::new();

    lines.push(detail_title(state));
    lines.push(format!(
        "XP: {} / {} ({:.2}%)",
        state.current_xp,
        state.required_xp(),
        pct
    ));
    lines.push(progress_bar(pct, bar_width));
    lines.push(format!("Total XP: {}", state.total_xp));
    lines.push(format!(
        "Typed: {}  Spaces: {}  Enters: {}",
        state.input_count, state.space_count, state.enter_count
    ));
    lines.push(format!(
        "Deletes: {}  Saves: {}",
        state.delete_count, state.save_count
    ));

    let langs = state.languages_by_xp();
    if langs.is_empty() {
        lines.push("Languages: none yet".to_string());
    } else {
        lines.push("Languages:".to_string());
        for (lang, xp) in langs {
            lines.push(format!("  {}: {}", lang, xp));
        }
    }

    lines.join("\n")
}
