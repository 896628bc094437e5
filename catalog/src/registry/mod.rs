//! The catalog of registered algorithms.

#[cfg(test)]
mod tests;

use std::rc::Rc;

use anyhow::Context;
use hashbrown::HashMap;

use crate::{
    algorithm::{Algorithm, Description},
    plargs, plparams,
    progress::Progress,
};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("an algorithm named {0:?} is already registered")]
    Duplicate(&'static str),
    #[error("{0:?} is not a valid algorithm name")]
    InvalidName(&'static str),
    #[error("no algorithm named {0:?} is registered")]
    Unknown(String),
    #[error("declaring parameters of {cmd_name:?}: {source}")]
    Schema {
        cmd_name: &'static str,
        #[source]
        source: plparams::SchemaError,
    },
}

/// A registered algorithm, with the schema it declared at registration.
pub struct Entry {
    pub description: Description,
    pub schema: plparams::Schema,
    pub algorithm: Rc<dyn Algorithm>,
}

/// Holds algorithms by their [Description::cmd_name].
#[derive(Default)]
pub struct Catalog {
    entries: HashMap<&'static str, Entry>,
}

impl Catalog {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds an algorithm, declaring its schema. Each algorithm's schema is declared exactly once,
    /// here, and kept for the lifetime of the catalog.
    pub fn register(&mut self, algorithm: Rc<dyn Algorithm>) -> Result<(), RegistryError> {
        let description = algorithm.describe();
        let cmd_name = description.cmd_name;
        if !valid_cmd_name(cmd_name) {
            return Err(RegistryError::InvalidName(cmd_name));
        }
        if self.entries.contains_key(cmd_name) {
            return Err(RegistryError::Duplicate(cmd_name));
        }

        let mut reg = plparams::SchemaRegistrator::new();
        algorithm
            .declare(&mut reg)
            .map_err(|source| RegistryError::Schema { cmd_name, source })?;
        let schema = reg.build();

        log::debug!(
            "Registered {:?} with {} parameter(s) and {} output(s).",
            cmd_name,
            schema.params.len(),
            schema.outputs.len()
        );
        self.entries.insert(
            cmd_name,
            Entry {
                description,
                schema,
                algorithm,
            },
        );
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, cmd_name: &str) -> Option<&Entry> {
        self.entries.get(cmd_name)
    }

    /// Returns the [Entry] for `cmd_name`, or an error if there is none.
    pub fn require(&self, cmd_name: &str) -> Result<&Entry, RegistryError> {
        self.get(cmd_name)
            .ok_or_else(|| RegistryError::Unknown(cmd_name.to_string()))
    }

    /// Returns all entries, ordered by group and then by name.
    pub fn entries(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by_key(|entry| (entry.description.group, entry.description.name));
        entries
    }

    /// Returns the distinct groups of all entries, in order.
    pub fn groups(&self) -> Vec<&'static str> {
        let mut groups: Vec<&'static str> = self
            .entries
            .values()
            .map(|entry| entry.description.group)
            .collect();
        groups.sort_unstable();
        groups.dedup();
        groups
    }

    /// Binds arguments against the schema of the named algorithm.
    pub fn bind(
        &self,
        cmd_name: &str,
        args: &plargs::ArgSet,
        outputs: &plargs::OutputPaths,
    ) -> anyhow::Result<plargs::BoundArgs> {
        let entry = self.require(cmd_name)?;
        plargs::BoundArgs::bind(&entry.schema, args, outputs)
            .with_context(|| format!("binding arguments for {cmd_name:?}"))
    }

    /// Binds arguments and executes the named algorithm. Errors from the algorithm itself are
    /// returned as they are.
    pub fn execute(
        &self,
        cmd_name: &str,
        args: &plargs::ArgSet,
        outputs: &plargs::OutputPaths,
        progress: &dyn Progress,
    ) -> anyhow::Result<()> {
        let bound = self.bind(cmd_name, args, outputs)?;
        let entry = self.require(cmd_name)?;

        log::debug!("Executing {:?}.", cmd_name);
        entry.algorithm.execute(&bound, progress)
    }
}

fn valid_cmd_name(cmd_name: &str) -> bool {
    lazy_regex::regex_is_match!(r#"^[a-z0-9]([a-z0-9_-]*[a-z0-9])?$"#, cmd_name)
}
