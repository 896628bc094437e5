//! Runs TauDEM command lines as child processes.


use std::{
    io::{BufRead, BufReader, PipeReader},
    process::{Child, Command, Stdio},
    rc::Rc,
};

use catalog::{
    execlog::ExecutionLog,
    process::{ProcessError, ProcessRunner},
    progress::Progress,
};

const CONSOLE_OUTPUT_HEADER: &str = "TauDEM command console output";

/// [ProcessRunner] that starts the command as a child process, with its standard output and
/// error merged. Each line of output is passed on to the [Progress] as console info, and all of
/// it is written to the [ExecutionLog] once the process ends.
///
/// Cancellation is checked between lines of output, so a process that is silent for long periods
/// is only stopped once it next writes a line.
pub struct TauDemRunner {
    log: Rc<dyn ExecutionLog>,
}

impl TauDemRunner {
    pub fn new(log: Rc<dyn ExecutionLog>) -> Self {
        Self { log }
    }

    fn spawn(
        program: &str,
        args: &[String],
    ) -> Result<(Child, BufReader<PipeReader>), ProcessError> {
        let spawn_err = |source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        };

        let (reader, writer) = std::io::pipe().map_err(spawn_err)?;
        let writer_for_stderr = writer.try_clone().map_err(spawn_err)?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(writer_for_stderr);
        let child = command.spawn().map_err(spawn_err)?;
        // The command holds the write ends of the pipe, which must be closed for the output to
        // reach end of file when the child exits.
        drop(command);

        Ok((child, BufReader::new(reader)))
    }

    fn log_console_output(&self, console: Vec<String>) {
        let mut lines = Vec::with_capacity(console.len() + 1);
        lines.push(CONSOLE_OUTPUT_HEADER.to_string());
        lines.extend(console);
        self.log.add_entry(log::Level::Info, &lines);
    }
}

impl ProcessRunner for TauDemRunner {
    fn run(&self, command: &[String], progress: &dyn Progress) -> Result<(), ProcessError> {
        let (program, args) = command.split_first().ok_or(ProcessError::Empty)?;
        if progress.is_canceled() {
            return Err(ProcessError::Canceled {
                program: program.clone(),
            });
        }

        log::debug!("Starting {program:?} with {} argument(s).", args.len());
        let (mut child, mut output) = Self::spawn(program, args)?;

        let mut console = Vec::new();
        let mut buf = Vec::new();
        let mut canceled = false;
        loop {
            buf.clear();
            let n = match output.read_until(b'\n', &mut buf) {
                Ok(n) => n,
                Err(source) => {
                    kill(&mut child, program);
                    self.log_console_output(console);
                    return Err(ProcessError::Io {
                        program: program.clone(),
                        source,
                    });
                }
            };
            if n == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf)
                .trim_end_matches(['\r', '\n'])
                .to_string();
            progress.set_console_info(&line);
            console.push(line);

            if progress.is_canceled() {
                canceled = true;
                break;
            }
        }

        if canceled {
            log::info!("Canceling {program:?}.");
            kill(&mut child, program);
            self.log_console_output(console);
            return Err(ProcessError::Canceled {
                program: program.clone(),
            });
        }

        let status = child.wait().map_err(|source| ProcessError::Io {
            program: program.clone(),
            source,
        })?;
        self.log_console_output(console);

        if status.success() {
            log::debug!("{program:?} completed.");
            Ok(())
        } else {
            Err(ProcessError::ExitStatus {
                program: program.clone(),
                code: status.code(),
            })
        }
    }
}

fn kill(child: &mut Child, program: &str) {
    if let Err(err) = child.kill() {
        log::warn!("Failed to kill {program:?}: {err}");
    }
    if let Err(err) = child.wait() {
        log::warn!("Failed to wait for {program:?}: {err}");
    }
}
