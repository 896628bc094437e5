//! Reporting of progress from a running algorithm back to its caller.

/// Receives progress from an executing algorithm, and tells it whether the caller has asked for
/// it to stop. All methods have no-op defaults.
pub trait Progress {
    fn set_percentage(&self, _percentage: u8) {}

    fn set_info(&self, _text: &str) {}

    /// Receives a single line of console output from an external process.
    fn set_console_info(&self, _line: &str) {}

    fn is_canceled(&self) -> bool {
        false
    }
}

/// [Progress] that discards everything and never cancels.
pub struct NoProgress;

impl Progress for NoProgress {}
