//! Core logging types: outcome entries, status, and the [`Log`] trait.

/// One reported step of a run, kept for the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeEntry {
    /// Human-readable step name (e.g. `"Commit /home/me/dots"`).
    pub name: String,
    /// Final status of the step.
    pub status: OutcomeStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Step completed successfully.
    Ok,
    /// Step was declined or had nothing to do.
    Skipped,
    /// Step completed with a non-fatal problem.
    Warned,
    /// Step failed.
    Failed,
}

/// Abstraction over logging backends.
///
/// The engine logs through this trait so tests can substitute a logger
/// without a global subscriber.
pub trait Log {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a step result for the summary.
    fn record(&self, name: &str, status: OutcomeStatus, message: Option<&str>);
}
