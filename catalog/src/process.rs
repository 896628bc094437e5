//! Running of external processes on behalf of an algorithm.

use crate::progress::Progress;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("no command to run")]
    Empty,
    #[error("starting {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("reading output of {program:?}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program:?} {}", describe_exit(*.code))]
    ExitStatus { program: String, code: Option<i32> },
    #[error("{program:?} was canceled")]
    Canceled { program: String },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Runs a command line to completion, reporting console output to `progress`.
///
/// The first element of `command` is the program, the remainder its arguments.
pub trait ProcessRunner {
    fn run(&self, command: &[String], progress: &dyn Progress) -> Result<(), ProcessError>;
}
