pub mod algorithm;
pub mod execlog;
pub mod plargs;
pub mod plparams;
pub mod process;
pub mod progress;
pub mod registry;
pub mod settings;
#[cfg(test)]
mod testutil;
