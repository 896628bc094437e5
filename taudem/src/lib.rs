//! TauDEM (Terrain Analysis Using Digital Elevation Models) algorithms for the catalog.
//!
//! The algorithms here do no terrain analysis themselves. Each builds the command line of a
//! TauDEM tool, run under `mpiexec`, and hands it to a [catalog::process::ProcessRunner].

pub mod error;
pub mod peukerdouglas;
pub mod provider;
pub mod runner;
pub mod settings;
#[cfg(test)]
mod testutil;

pub use error::TauDemError;
pub use provider::{Resources, TauDemContext, TauDemProvider};
