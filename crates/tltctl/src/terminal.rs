//! Terminal presenters
//!
//! `HumanPresenter` prints coloured text for people, `MachinePresenter`
//! prints tab-separated records for editor plugins:
//!
//! ```text
//! status\tLv 2 [■□□□□] (12.0%)
//! levelup\t2
//! details\tLevel 2\nXP: 12 / 100 (12.00%)...
//! error\t10\tIO error: ...
//! ```

use owo_colors::OwoColorize;
use std::io::{IsTerminal, Write};
use tlt_common::display::{level_up_message, STATUS_TOOLTIP};
use tlt_common::{ColorMode, Presenter};
use tracing::warn;

/// Presenter that can also surface bridge errors
pub trait BridgeOutput: Presenter {
    fn report_error(&mut self, code: i32, message: &str);
}

/// Resolve a color mode against stdout
pub fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Basic => true,
        ColorMode::None => false,
        ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

fn write_line<W: Write>(out: &mut W, line: &str) {
    if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
        warn!(error = %e, "Cannot write output");
    }
}

/// Escape a multi-line value into one record field
pub fn escape_field(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\t', "\\t")
        .replace('\n', "\\n")
}

/// Human-readable presenter
pub struct HumanPresenter<W: Write> {
    out: W,
    color: bool,
    show_status: bool,
}

impl<W: Write> HumanPresenter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            show_status: true,
        }
    }

    /// Suppress status lines (one-shot commands print only their report)
    pub fn without_status(mut self) -> Self {
        self.show_status = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for HumanPresenter<W> {
    fn render_status_line(&mut self, text: &str) {
        if !self.show_status {
            return;
        }
        let line = if self.color {
            format!("{}  {}", text.cyan(), STATUS_TOOLTIP.dimmed())
        } else {
            format!("{}  ({})", text, STATUS_TOOLTIP)
        };
        write_line(&mut self.out, &line);
    }

    fn show_level_up_notice(&mut self, level: u64) {
        let message = level_up_message(level);
        let line = if self.color {
            format!("{}", message.bright_yellow().bold())
        } else {
            format!("[LEVEL UP] {}", message)
        };
        write_line(&mut self.out, &line);
    }

    fn show_detail_report(&mut self, text: &str) {
        let mut lines = text.lines();
        if let Some(title) = lines.next() {
            let title = if self.color {
                title.bold().to_string()
            } else {
                title.to_string()
            };
            write_line(&mut self.out, &title);
        }
        for line in lines {
            write_line(&mut self.out, line);
        }
    }
}

impl<W: Write> BridgeOutput for HumanPresenter<W> {
    fn report_error(&mut self, code: i32, message: &str) {
        let line = if self.color {
            format!("[ERROR {}] {}", code, message.red())
        } else {
            format!("[ERROR {}] {}", code, message)
        };
        write_line(&mut self.out, &line);
    }
}

/// Tab-separated presenter for editor plugins
pub struct MachinePresenter<W: Write> {
    out: W,
}

impl<W: Write> MachinePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for MachinePresenter<W> {
    fn render_status_line(&mut self, text: &str) {
        write_line(&mut self.out, &format!("status\t{}", escape_field(text)));
    }

    fn show_level_up_notice(&mut self, level: u64) {
        write_line(&mut self.out, &format!("levelup\t{}", level));
    }

    fn show_detail_report(&mut self, text: &str) {
        write_line(&mut self.out, &format!("details\t{}", escape_field(text)));
    }
}

impl<W: Write> BridgeOutput for MachinePresenter<W> {
    fn report_error(&mut self, code: i32, message: &str) {
        write_line(
            &mut self.out,
            &format!("error\t{}\t{}", code, escape_field(message)),
        );
    }
}
