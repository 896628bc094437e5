use std::{path::PathBuf, rc::Rc};

use anyhow::{Context, Result};
use catalog::{execlog::LogCrateSink, registry::Catalog, settings::SettingsFile};
use clap::{Parser, Subcommand};
use simplelog::LevelFilter;
use taudem::{TauDemContext, TauDemProvider, runner::TauDemRunner};

use crate::distpaths;

mod describe;
mod list;
mod run;

const XDG_PREFIX: &str = "taudem";
const SETTINGS_FILE_NAME: &str = "settings.yaml";

/// Lists, describes and runs TauDEM terrain analysis tools.
#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Logging level.
    #[arg(long, default_value = "Warn")]
    log_level: LevelFilter,

    /// Path to a YAML settings file. Defaults to `taudem/settings.yaml` in the XDG configuration
    /// directories, if present.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    List,
    Describe(describe::Command),
    Run(run::Command),
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default())
        .with_context(|| "configuring logging")?;

    let settings = load_settings(args.settings)?;

    use Command::*;
    match &args.command {
        List => list::run(&build_catalog(settings)?),
        Describe(cmd) => describe::run(cmd, &build_catalog(settings)?),
        Run(cmd) => run::run(cmd, settings),
    }
}

fn load_settings(explicit: Option<PathBuf>) -> Result<SettingsFile> {
    let path = explicit.or_else(|| {
        xdg::BaseDirectories::with_prefix(XDG_PREFIX)
            .find_config_file(SETTINGS_FILE_NAME)
    });
    let settings = SettingsFile::load_or_default(path.as_deref())
        .with_context(|| "loading settings")?;
    Ok(settings.with_defaults(taudem::settings::defaults()))
}

fn build_catalog(settings: SettingsFile) -> Result<Catalog> {
    let exec_log = Rc::new(LogCrateSink);
    let ctx = TauDemContext {
        settings: Rc::new(settings),
        runner: Rc::new(TauDemRunner::new(exec_log.clone())),
        log: exec_log,
        resources: Rc::new(distpaths::resources()),
    };

    let mut catalog = Catalog::new();
    TauDemProvider::new(ctx)
        .register_all(&mut catalog)
        .with_context(|| "registering algorithms")?;
    Ok(catalog)
}
