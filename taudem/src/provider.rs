//! Builds the TauDEM algorithms and adds them to a [Catalog].

use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use catalog::{
    algorithm::Algorithm,
    execlog::ExecutionLog,
    process::ProcessRunner,
    registry::{Catalog, RegistryError},
    settings::Settings,
};

use crate::peukerdouglas::PeukerDouglas;

/// Locations of the help documents and icons distributed with the algorithms.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resources {
    pub help_dir: PathBuf,
    pub icons_dir: PathBuf,
}

impl Resources {
    /// Resources in `help` and `icons` directories under `base`.
    pub fn under(base: &Path) -> Self {
        Self {
            help_dir: base.join("help"),
            icons_dir: base.join("icons"),
        }
    }

    pub fn help_file(&self, cmd_name: &str) -> PathBuf {
        self.help_dir.join(format!("{cmd_name}.html"))
    }

    pub fn icon(&self) -> PathBuf {
        self.icons_dir.join("taudem.png")
    }
}

/// Collaborators shared by all TauDEM algorithms.
#[derive(Clone)]
pub struct TauDemContext {
    pub settings: Rc<dyn Settings>,
    pub runner: Rc<dyn ProcessRunner>,
    pub log: Rc<dyn ExecutionLog>,
    pub resources: Rc<Resources>,
}

/// Provides the TauDEM algorithms to a [Catalog].
pub struct TauDemProvider {
    ctx: TauDemContext,
}

impl TauDemProvider {
    pub const NAME: &str = "TauDEM";

    pub fn new(ctx: TauDemContext) -> Self {
        Self { ctx }
    }

    pub fn algorithms(&self) -> Vec<Rc<dyn Algorithm>> {
        vec![Rc::new(PeukerDouglas::new(self.ctx.clone()))]
    }

    /// Registers every TauDEM algorithm into `catalog`.
    pub fn register_all(&self, catalog: &mut Catalog) -> Result<(), RegistryError> {
        for algorithm in self.algorithms() {
            catalog.register(algorithm)?;
        }
        log::debug!("Registered {} algorithms.", Self::NAME);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use catalog::execlog::MockExecutionLog;
    use googletest::prelude::*;

    use super::*;
    use crate::testutil::{FakeRunner, test_context, test_settings};

    #[gtest]
    fn test_register_all() -> anyhow::Result<()> {
        let provider = TauDemProvider::new(test_context(
            Rc::new(test_settings(2)),
            Rc::new(FakeRunner::succeeding()),
            MockExecutionLog::new(),
        ));
        let mut catalog = Catalog::new();

        provider.register_all(&mut catalog)?;

        expect_that!(catalog.len(), eq(1));
        expect_that!(
            catalog.groups(),
            elements_are![eq(&"Stream Network Analysis tools")]
        );
        expect_true!(catalog.get("peukerdouglas").is_some());

        // A second registration of the same algorithms is refused.
        expect_true!(matches!(
            provider.register_all(&mut catalog),
            Err(RegistryError::Duplicate("peukerdouglas"))
        ));

        Ok(())
    }

    #[cfg(unix)]
    #[gtest]
    fn test_resources_under() {
        let resources = Resources::under(Path::new("/usr/share/taudem"));

        expect_that!(
            resources.help_file("peukerdouglas"),
            eq(Path::new("/usr/share/taudem/help/peukerdouglas.html"))
        );
        expect_that!(
            resources.icon(),
            eq(Path::new("/usr/share/taudem/icons/taudem.png"))
        );
    }
}
