use std::{
    cell::{Cell, RefCell},
    path::PathBuf,
    rc::Rc,
};

use catalog::{
    execlog::MockExecutionLog,
    process::{ProcessError, ProcessRunner},
    progress::Progress,
    settings::{Settings, SettingsFile},
};

use crate::{
    provider::{Resources, TauDemContext},
    settings,
};

/// [ProcessRunner] that records each command and returns a preset result.
pub struct FakeRunner {
    pub commands: RefCell<Vec<Vec<String>>>,
    pub result: fn(&[String]) -> Result<(), ProcessError>,
}

impl FakeRunner {
    pub fn succeeding() -> Self {
        Self {
            commands: RefCell::new(Vec::new()),
            result: |_| Ok(()),
        }
    }

    pub fn failing() -> Self {
        Self {
            commands: RefCell::new(Vec::new()),
            result: |command| {
                Err(ProcessError::ExitStatus {
                    program: command[0].clone(),
                    code: Some(1),
                })
            },
        }
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, command: &[String], _progress: &dyn Progress) -> Result<(), ProcessError> {
        self.commands.borrow_mut().push(command.to_vec());
        (self.result)(command)
    }
}

/// [Progress] that records console lines, and reports cancellation once a number of lines have
/// been seen.
#[derive(Default)]
pub struct FakeProgress {
    pub console: RefCell<Vec<String>>,
    pub cancel_after_lines: Option<usize>,
    pub cancel_checks: Cell<usize>,
}

impl Progress for FakeProgress {
    fn set_console_info(&self, line: &str) {
        self.console.borrow_mut().push(line.to_string());
    }

    fn is_canceled(&self) -> bool {
        self.cancel_checks.set(self.cancel_checks.get() + 1);
        self.cancel_after_lines
            .is_some_and(|lines| self.console.borrow().len() >= lines)
    }
}

pub fn test_resources() -> Resources {
    Resources {
        help_dir: PathBuf::from("/usr/share/taudem/help"),
        icons_dir: PathBuf::from("/usr/share/taudem/icons"),
    }
}

/// Settings with the given process count and TauDEM folders set.
pub fn test_settings(mpi_processes: i64) -> SettingsFile {
    let mut settings = SettingsFile::default();
    settings.set(settings::MPIEXEC_FOLDER, "/usr/bin");
    settings.set(settings::TAUDEM_FOLDER, "/opt/taudem");
    settings.set(settings::MPI_PROCESSES, mpi_processes);
    settings
}

pub fn test_context(
    settings: Rc<dyn Settings>,
    runner: Rc<FakeRunner>,
    log: MockExecutionLog,
) -> TauDemContext {
    TauDemContext {
        settings,
        runner,
        log: Rc::new(log),
        resources: Rc::new(test_resources()),
    }
}
