//! Editor bridge - line-oriented JSON events on stdin.
//!
//! An editor plugin spawns `tltctl feed` and writes one event per line:
//!
//! ```text
//! {"event":"edit","language_id":"rust","changes":[{"text":"a","range_length":0}]}
//! {"event":"save"}
//! {"event":"details"}
//! ```
//!
//! Lines that do not parse, or are not UTF-8, are logged and skipped. Events are handled one at
//! a time, so edit batches never interleave.

use crate::terminal::BridgeOutput;
use serde::Deserialize;
use std::io::BufRead;
use tlt_common::{Fragment, StateStore, Tracker};
use tracing::{debug, warn};

/// Language used when an edit event names none
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// One event from the editor
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum BridgeEvent {
    /// Content changes in one document
    Edit {
        #[serde(default = "default_language")]
        language_id: String,
        #[serde(default)]
        changes: Vec<Fragment>,
    },
    /// Document saved
    Save,
    /// The "show details" command
    Details,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl BridgeEvent {
    /// Parse a single line; `None` for blank lines
    pub fn parse(line: &str) -> Option<Result<Self, serde_json::Error>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(serde_json::from_str(trimmed))
    }
}

/// Totals for one bridge session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSummary {
    pub events: usize,
    pub skipped_lines: usize,
    pub store_errors: usize,
    pub xp_gained: u64,
    pub level_ups: usize,
}

/// Run the bridge until end of input
pub fn run_feed<R, S, P>(mut reader: R, tracker: &mut Tracker<S, P>) -> anyhow::Result<FeedSummary>
where
    R: BufRead,
    S: StateStore,
    P: BridgeOutput,
{
    let mut summary = FeedSummary::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping line that is not UTF-8");
                summary.skipped_lines += 1;
                continue;
            }
        };

        let event = match BridgeEvent::parse(line) {
            None => continue,
            Some(Ok(event)) => event,
            Some(Err(e)) => {
                warn!(line = line_no, error = %e, "Skipping malformed event");
                summary.skipped_lines += 1;
                continue;
            }
        };

        summary.events += 1;
        debug!(line = line_no, ?event, "Event received");

        let result = match event {
            BridgeEvent::Edit {
                language_id,
                changes,
            } => tracker.on_edit_batch(&changes, &language_id).map(|outcome| {
                summary.xp_gained += outcome.xp_gained;
                summary.level_ups += outcome.level_ups.len();
            }),
            BridgeEvent::Save => tracker.on_save(),
            BridgeEvent::Details => {
                tracker.show_details();
                Ok(())
            }
        };

        if let Err(e) = result {
            warn!(line = line_no, error = %e, "Cannot persist state");
            summary.store_errors += 1;
            tracker.presenter_mut().report_error(e.code(), &e.to_string());
        }
    }

    Ok(summary)
}
