//! The execution log, which records commands run and their console output.

/// Receives multi-line entries for the execution log.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ExecutionLog {
    fn add_entry(&self, level: log::Level, lines: &[String]);
}

/// [ExecutionLog] that forwards each entry as a single record to the [log] facade.
pub struct LogCrateSink;

impl LogCrateSink {
    pub const TARGET: &str = "taudem::execution";
}

impl ExecutionLog for LogCrateSink {
    fn add_entry(&self, level: log::Level, lines: &[String]) {
        log::log!(target: Self::TARGET, level, "{}", lines.join("\n"));
    }
}
