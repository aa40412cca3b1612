//! Command implementations for tltctl.

use crate::bridge::run_feed;
use crate::cli::ConfigCommands;
use crate::terminal::{use_color, HumanPresenter, MachinePresenter};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tlt_common::store::default_state_path;
use tlt_common::{JsonFileStore, NullPresenter, StateStore, Tracker, TrackerConfig};
use tracing::info;

/// Resolved paths and configuration for one invocation
#[derive(Debug, Clone)]
pub struct Invocation {
    pub config: TrackerConfig,
    pub config_path: PathBuf,
    pub state_path: PathBuf,
}

impl Invocation {
    /// Resolve config and state locations
    ///
    /// State priority: --state, config storage.state_file, $TLT_STATE_FILE, default.
    pub fn resolve(config_arg: Option<&Path>, state_arg: Option<&Path>) -> Result<Self> {
        let config_path = match config_arg {
            Some(path) => path.to_path_buf(),
            None => TrackerConfig::user_config_path()?,
        };
        let config = TrackerConfig::load_from(&config_path)?;

        let state_path = match (state_arg, &config.storage.state_file) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) => path.clone(),
            (None, None) => default_state_path().context("Cannot locate state file")?,
        };

        Ok(Self {
            config,
            config_path,
            state_path,
        })
    }

    fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.state_path)
    }

    fn color(&self) -> bool {
        use_color(self.config.display.color)
    }
}

/// Run the editor bridge on stdin
pub fn feed(ctx: &Invocation, machine: bool) -> Result<()> {
    let stdin = io::stdin();
    let reader = stdin.lock();

    let summary = if machine {
        let presenter = MachinePresenter::new(io::stdout());
        let mut tracker = Tracker::from_config(ctx.store(), presenter, &ctx.config);
        run_feed(reader, &mut tracker)?
    } else {
        let presenter = HumanPresenter::new(io::stdout(), ctx.color());
        let mut tracker = Tracker::from_config(ctx.store(), presenter, &ctx.config);
        run_feed(reader, &mut tracker)?
    };

    info!(
        events = summary.events,
        skipped = summary.skipped_lines,
        store_errors = summary.store_errors,
        xp = summary.xp_gained,
        level_ups = summary.level_ups,
        "Feed finished"
    );
    Ok(())
}

/// Print the status line or the raw record
pub fn status(ctx: &Invocation, json: bool) -> Result<()> {
    if json {
        let state = ctx.store().load();
        let text = serde_json::to_string_pretty(&state).context("Failed to serialize state")?;
        println!("{}", text);
        return Ok(());
    }

    let tracker = Tracker::from_config(ctx.store(), NullPresenter, &ctx.config);
    println!("{}", tracker.status_text());
    Ok(())
}

/// The "show details" command
pub fn details(ctx: &Invocation) -> Result<()> {
    let presenter = HumanPresenter::new(io::stdout(), ctx.color()).without_status();
    let mut tracker = Tracker::from_config(ctx.store(), presenter, &ctx.config);
    tracker.show_details();
    Ok(())
}

/// Per-language XP table
pub fn langs(ctx: &Invocation) -> Result<()> {
    let state = ctx.store().load();
    let mut out = io::stdout().lock();
    write_langs(&mut out, &state, ctx.color())?;
    Ok(())
}

/// Write the language table
pub fn write_langs<W: Write>(
    out: &mut W,
    state: &tlt_common::ProgressState,
    color: bool,
) -> io::Result<()> {
    let langs = state.languages_by_xp();
    if langs.is_empty() {
        writeln!(out, "No languages yet. Start typing!")?;
        return Ok(());
    }

    let width = langs
        .iter()
        .map(|(l, _)| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);
    let header = format!("{:width$} {:>10} {:>7}", "Language", "XP", "Share", width = width);
    if color {
        writeln!(out, "{}", header.bold())?;
    } else {
        writeln!(out, "{}", header)?;
    }
    writeln!(out, "{}", "-".repeat(width + 19))?;

    let total: u64 = langs.iter().map(|(_, xp)| *xp).sum();
    for (lang, xp) in langs {
        let share = if total == 0 {
            0.0
        } else {
            xp as f64 / total as f64 * 100.0
        };
        writeln!(
            out,
            "{:width$} {:>10} {:>6.1}%",
            lang,
            xp,
            share,
            width = width
        )?;
    }
    Ok(())
}

/// Config show/set
pub fn config(ctx: &Invocation, action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let text =
                toml::to_string_pretty(&ctx.config).context("Failed to serialize configuration")?;
            println!("# {}", ctx.config_path.display());
            println!("# state file: {}", ctx.state_path.display());
            print!("{}", text);
            Ok(())
        }
        ConfigCommands::Set { assignment } => {
            let (key, value) = assignment
                .split_once('=')
                .with_context(|| format!("Expected key=value, got '{}'", assignment))?;
            let mut config = ctx.config.clone();
            config.set(key, value)?;
            config.save_to(&ctx.config_path)?;
            println!("[OK] {} = {}", key.trim(), value.trim());
            Ok(())
        }
    }
}
