use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::{Context, Result, anyhow};
use catalog::{
    plargs::{ArgSet, OutputPaths},
    plparams::{Schema, ValueKind},
    progress::Progress,
    settings::SettingsFile,
};
use clap::Args;

/// Runs an algorithm.
#[derive(Args, Debug)]
pub struct Command {
    /// Command name of the algorithm, as shown by `list`.
    cmd_name: String,

    /// Sets a parameter, as `KEY=VALUE`. Parameters that are not given take their defaults.
    #[arg(long = "arg", value_parser = parse_assignment)]
    args: Vec<Assignment>,

    /// Sets the path of an output, as `KEY=PATH`.
    #[arg(long = "output", value_parser = parse_assignment)]
    outputs: Vec<Assignment>,

    /// Number of MPI processes, overriding the settings file.
    #[arg(long)]
    mpi_processes: Option<i64>,

    /// Print the command that would be run, without running it.
    #[arg(long)]
    dry_run: bool,
}

/// Runs the subcommand.
pub fn run(cmd: &Command, mut settings: SettingsFile) -> Result<()> {
    if let Some(mpi_processes) = cmd.mpi_processes {
        settings.set(taudem::settings::MPI_PROCESSES, mpi_processes);
    }

    let catalog = super::build_catalog(settings)?;
    let entry = catalog.require(&cmd.cmd_name)?;
    let args = build_args(&entry.schema, &cmd.args)?;
    let outputs = build_outputs(&entry.schema, &cmd.outputs)?;

    if cmd.dry_run {
        let bound = catalog.bind(&cmd.cmd_name, &args, &outputs)?;
        match entry.algorithm.command_line(&bound)? {
            Some(command) => println!("{}", quote_command(&command)),
            None => println!(
                "{} does not run an external command.",
                entry.description.name
            ),
        }
        return Ok(());
    }

    let continue_intent = Arc::new(AtomicBool::new(true));
    let progress = ConsoleProgress {
        continue_intent: continue_intent.clone(),
    };
    ctrlc::set_handler(move || continue_intent.store(false, Ordering::SeqCst))?;

    catalog.execute(&cmd.cmd_name, &args, &outputs, &progress)?;
    eprintln!("{} complete.", entry.description.name);
    Ok(())
}

/// Joins a command line with spaces, single-quoting arguments that are empty or contain whitespace
/// or quotes, so that the printed form can be pasted into a POSIX shell.
fn quote_command(command: &[String]) -> String {
    command
        .iter()
        .map(|arg| quote_arg(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '"');
    if needs_quotes {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_string()
    }
}

/// A `KEY=VALUE` pair from the command line.
#[derive(Clone, Debug, PartialEq)]
struct Assignment {
    key: String,
    value: String,
}

fn parse_assignment(s: &str) -> Result<Assignment, String> {
    let (_, key, value) = lazy_regex::regex_captures!(r#"^([A-Za-z_][A-Za-z0-9_]*)=(.*)$"#, s)
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))?;
    Ok(Assignment {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Converts each assignment to the kind of value its parameter accepts.
fn build_args(schema: &Schema, assignments: &[Assignment]) -> Result<ArgSet> {
    let mut args = ArgSet::new();
    for assignment in assignments {
        let param = schema
            .param(&assignment.key)
            .ok_or_else(|| anyhow!("unknown parameter {:?}", assignment.key))?;
        match param.param_type.kind() {
            ValueKind::Raster => args.set(param.param_id, PathBuf::from(&assignment.value)),
            ValueKind::Number => {
                let value: f64 = assignment.value.parse().with_context(|| {
                    format!(
                        "parsing {:?} as a number for parameter {}",
                        assignment.value, param.param_id
                    )
                })?;
                args.set(param.param_id, value);
            }
        }
    }
    Ok(args)
}

fn build_outputs(schema: &Schema, assignments: &[Assignment]) -> Result<OutputPaths> {
    let mut outputs = OutputPaths::new();
    for assignment in assignments {
        let output = schema
            .output(&assignment.key)
            .ok_or_else(|| anyhow!("unknown output {:?}", assignment.key))?;
        outputs.set(output.output_id, PathBuf::from(&assignment.value));
    }
    Ok(outputs)
}

/// [Progress] that prints console output of the running tool, and reports cancellation once
/// Ctrl-C has been pressed.
struct ConsoleProgress {
    continue_intent: Arc<AtomicBool>,
}

impl Progress for ConsoleProgress {
    fn set_percentage(&self, percentage: u8) {
        log::debug!("{percentage}% complete.");
    }

    fn set_info(&self, info: &str) {
        eprintln!("{info}");
    }

    fn set_console_info(&self, line: &str) {
        println!("{line}");
    }

    fn is_canceled(&self) -> bool {
        !self.continue_intent.load(Ordering::Relaxed)
    }
}
