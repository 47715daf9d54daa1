use std::io::Write;
use std::sync::OnceLock;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub struct SpinnerHandle {
    pub spinner: ProgressBar,
}

impl SpinnerHandle {
    pub fn set_message(&self, msg: String) {
        self.spinner.set_message(msg);
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }

    /// Writes above the spinner, or straight through when it is hidden.
    pub fn write_above(&self, buf: &[u8]) -> std::io::Result<()> {
        self.spinner.suspend(|| {
            let mut out = std::io::stdout().lock();
            out.write_all(buf)?;
            out.flush()
        })
    }
}

static SPINNER: OnceLock<SpinnerHandle> = OnceLock::new();

/// Creates the spinner. Must run before anything is logged; later calls are no-ops.
pub fn init(visible: bool) {
    SPINNER.get_or_init(|| build_spinner(visible));
}

pub fn get_spinner() -> &'static SpinnerHandle {
    SPINNER.get_or_init(|| build_spinner(false))
}

fn build_spinner(visible: bool) -> SpinnerHandle {
    if !visible {
        return SpinnerHandle {
            spinner: ProgressBar::hidden(),
        };
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS);

    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));

    SpinnerHandle { spinner: pb }
}

pub fn report_progress(done: usize, total: usize) {
    get_spinner().set_message(format!(
        "Inventoried {} of {} hosts...",
        done.to_string().green().bold(),
        total
    ));
}

pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        get_spinner().write_above(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
