/// Errors raised by TauDEM algorithms before any external process is started.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TauDemError {
    /// The configured MPI process count is missing, not an integer, or not positive.
    #[error(
        "Wrong number of MPI processes used.\nPlease set correct number before running TauDEM algorithms."
    )]
    Configuration { process_count: Option<i64> },
}
