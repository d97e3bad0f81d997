/// Trait for reporting scan progress.
///
/// CLI implements with indicatif, embedders can wrap closures with [`CallbackReporter`].
/// All methods have default no-op implementations. The scanner never calls
/// `on_status`/`on_progress` concurrently.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self, _total_files: usize) {}
    fn on_status(&self, _file_name: &str) {}
    fn on_progress(&self, _percent: u8) {}
    fn on_scan_complete(&self, _total_files: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

/// Forwards status and progress to a pair of closures.
pub struct CallbackReporter<P, S> {
    on_progress: P,
    on_status: S,
}

impl<P, S> CallbackReporter<P, S>
where
    P: Fn(u8) + Send + Sync,
    S: Fn(&str) + Send + Sync,
{
    pub fn new(on_progress: P, on_status: S) -> Self {
        Self {
            on_progress,
            on_status,
        }
    }
}

impl<P, S> ProgressReporter for CallbackReporter<P, S>
where
    P: Fn(u8) + Send + Sync,
    S: Fn(&str) + Send + Sync,
{
    fn on_status(&self, file_name: &str) {
        (self.on_status)(file_name);
    }

    fn on_progress(&self, percent: u8) {
        (self.on_progress)(percent);
    }
}

/// `round(100 * completed / total)`, clamped to 100.
pub fn percent_complete(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = (completed as f64 * 100.0 / total as f64).round();
    percent.min(100.0) as u8
}
