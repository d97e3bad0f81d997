use frameline_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// CLI progress reporter using an indicatif progress bar.
///
/// Position is the completion percentage; the message is the last file done.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = match self.bar.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(pb) = guard.as_ref() {
            f(pb);
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self, total_files: usize) {
        let pb = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::with_template(
            "  {spinner:.cyan} Reading metadata [{bar:30.cyan/dim}] {pos:>3}% {msg}",
        ) {
            pb.set_style(style.progress_chars("━╸─").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(format!("0/{} files", total_files));
        pb.enable_steady_tick(std::time::Duration::from_millis(80));

        let mut guard = match self.bar.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(old) = guard.replace(pb) {
            old.finish_and_clear();
        }
    }

    fn on_status(&self, file_name: &str) {
        self.with_bar(|pb| pb.set_message(format!("Analyzing file: {}", file_name)));
    }

    fn on_progress(&self, percent: u8) {
        self.with_bar(|pb| pb.set_position(u64::from(percent)));
    }

    fn on_scan_complete(&self, total_files: usize, duration_secs: f64) {
        let mut guard = match self.bar.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
        eprintln!(
            "  \x1b[32m✓\x1b[0m Metadata read: {} files in {:.2}s",
            total_files, duration_secs
        );
    }
}
