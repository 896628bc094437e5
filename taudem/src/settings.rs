//! Settings used by the TauDEM algorithms.

use std::path::Path;

use catalog::settings::{SettingValue, Settings};

/// Directory containing the TauDEM executables. Empty to find them on `PATH`.
pub const TAUDEM_FOLDER: &str = "TAUDEM_FOLDER";
/// Directory containing `mpiexec`. Empty to find it on `PATH`.
pub const MPIEXEC_FOLDER: &str = "MPIEXEC_FOLDER";
/// Number of MPI processes to run each tool with.
pub const MPI_PROCESSES: &str = "MPI_PROCESSES";

pub const DEFAULT_MPI_PROCESSES: i64 = 2;

const MPIEXEC: &str = "mpiexec";

/// Default values for all TauDEM settings.
pub fn defaults() -> [(&'static str, SettingValue); 3] {
    [
        (TAUDEM_FOLDER, SettingValue::Text(String::new())),
        (MPIEXEC_FOLDER, SettingValue::Text(String::new())),
        (MPI_PROCESSES, SettingValue::Integer(DEFAULT_MPI_PROCESSES)),
    ]
}

/// Typed access to the TauDEM settings. Values are read from the underlying [Settings] on every
/// call.
pub struct TauDemSettings<'a> {
    settings: &'a dyn Settings,
}

impl<'a> TauDemSettings<'a> {
    pub fn new(settings: &'a dyn Settings) -> Self {
        Self { settings }
    }

    /// Returns the configured process count, if it is set to an integer.
    pub fn mpi_processes(&self) -> Option<i64> {
        self.settings
            .get(MPI_PROCESSES)
            .and_then(|value| value.as_integer())
    }

    /// Returns the path to the `mpiexec` launcher.
    pub fn mpiexec(&self) -> String {
        self.in_folder(MPIEXEC_FOLDER, MPIEXEC)
    }

    /// Returns the path to the named TauDEM tool.
    pub fn tool(&self, cmd_name: &str) -> String {
        self.in_folder(TAUDEM_FOLDER, cmd_name)
    }

    fn in_folder(&self, folder_key: &str, file_name: &str) -> String {
        let folder = self.settings.get(folder_key);
        let folder = folder
            .as_ref()
            .and_then(SettingValue::as_text)
            .unwrap_or_default();
        Path::new(folder)
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }
}
