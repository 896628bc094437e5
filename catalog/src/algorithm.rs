//! The interface through which the catalog lists and runs algorithms.

use std::path::PathBuf;

use crate::{plargs, plparams, progress::Progress};

/// Identifies an algorithm and places it within the catalog.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Description {
    /// Human-readable name.
    pub name: &'static str,
    /// Name of the command line tool, which is also the key of the algorithm in the catalog.
    pub cmd_name: &'static str,
    /// Group under which the algorithm is listed.
    pub group: &'static str,
}

/// Required trait for algorithms in the catalog. Implementations are expected to be stateless
/// with regards to their arguments and outputs.
pub trait Algorithm {
    fn describe(&self) -> Description;

    /// Declares the parameters and outputs of the algorithm. The catalog calls this once, when the
    /// algorithm is registered.
    fn declare(&self, reg: &mut plparams::SchemaRegistrator) -> Result<(), plparams::SchemaError>;

    /// Runs the algorithm with arguments that have been bound against its declared schema.
    fn execute(&self, args: &plargs::BoundArgs, progress: &dyn Progress) -> anyhow::Result<()>;

    /// Returns the command line that [Algorithm::execute] would run for the given arguments,
    /// where the algorithm runs an external command.
    fn command_line(&self, _args: &plargs::BoundArgs) -> anyhow::Result<Option<Vec<String>>> {
        Ok(None)
    }

    /// Path to the help document for the algorithm.
    fn help_resource(&self) -> PathBuf;

    /// Path to the icon for the algorithm.
    fn icon(&self) -> PathBuf;
}
