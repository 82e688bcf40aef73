//! Progress notification for batch runs.
//!
//! The runner calls these hooks; how (or whether) progress is drawn is up to
//! the caller, so the library never writes to a terminal itself.

/// Callback for progress updates during a batch run.
pub trait ProgressReporter: Send {
    /// Called once before the first lookup
    fn on_start(&mut self, total: usize);

    /// Called after each domain has a verdict
    fn on_item(&mut self, completed: usize, total: usize, domain: &str);

    /// Called once after the last verdict
    fn on_finish(&mut self) {}
}

/// No-op reporter for when progress is not needed
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn on_start(&mut self, _total: usize) {}
    fn on_item(&mut self, _completed: usize, _total: usize, _domain: &str) {}
}
