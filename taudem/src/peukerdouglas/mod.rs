//! Peuker Douglas stream source extraction.
//!
//! Runs the TauDEM `peukerdouglas` tool, which marks upward curved cells of a smoothed elevation
//! grid as candidate channel heads and writes them to a stream source grid.


use std::path::{Path, PathBuf};

use catalog::{
    algorithm::{Algorithm, Description},
    plargs::BoundArgs,
    plparams::{OutputType, ParamId, ParamType, SchemaError, SchemaRegistrator},
    progress::Progress,
};

use crate::{TauDemError, provider::TauDemContext, settings::TauDemSettings};

pub const ELEVATION_GRID: ParamId = ParamId::from_static("ELEVATION_GRID");
pub const CENTER_WEIGHT: ParamId = ParamId::from_static("CENTER_WEIGHT");
pub const SIDE_WEIGHT: ParamId = ParamId::from_static("SIDE_WEIGHT");
pub const DIAGONAL_WEIGHT: ParamId = ParamId::from_static("DIAGONAL_WEIGHT");

pub const STREAM_SOURCE_GRID: ParamId = ParamId::from_static("STREAM_SOURCE_GRID");

pub const DEFAULT_CENTER_WEIGHT: f64 = 0.4;
pub const DEFAULT_SIDE_WEIGHT: f64 = 0.1;
pub const DEFAULT_DIAGONAL_WEIGHT: f64 = 0.05;

const DESCRIPTION: Description = Description {
    name: "Peuker Douglas",
    cmd_name: "peukerdouglas",
    group: "Stream Network Analysis tools",
};

const EXECUTION_COMMAND_HEADER: &str = "TauDEM execution command";

pub struct PeukerDouglas {
    ctx: TauDemContext,
}

impl PeukerDouglas {
    pub fn new(ctx: TauDemContext) -> Self {
        Self { ctx }
    }

    /// Builds the `mpiexec` command line that runs the tool for `args`.
    ///
    /// Fails with [TauDemError::Configuration] if the MPI process count setting is not a positive
    /// integer.
    pub fn command(&self, args: &BoundArgs) -> anyhow::Result<Vec<String>> {
        let settings = TauDemSettings::new(self.ctx.settings.as_ref());
        let process_count = settings.mpi_processes();
        let process_count = match process_count {
            Some(n) if n > 0 => n,
            _ => return Err(TauDemError::Configuration { process_count }.into()),
        };

        Ok(vec![
            settings.mpiexec(),
            "-n".to_string(),
            process_count.to_string(),
            settings.tool(DESCRIPTION.cmd_name),
            "-fel".to_string(),
            path_arg(args.raster(&ELEVATION_GRID)?),
            "-par".to_string(),
            // Shortest decimal form that parses back to the same value, never in exponent form.
            args.number(&CENTER_WEIGHT)?.to_string(),
            args.number(&SIDE_WEIGHT)?.to_string(),
            args.number(&DIAGONAL_WEIGHT)?.to_string(),
            "-ss".to_string(),
            path_arg(args.output(&STREAM_SOURCE_GRID)?),
        ])
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn smoothing_weight(default: f64) -> ParamType {
    ParamType::Number {
        default: Some(default),
        min: Some(0.0),
        max: None,
    }
}

impl Algorithm for PeukerDouglas {
    fn describe(&self) -> Description {
        DESCRIPTION
    }

    fn declare(&self, reg: &mut SchemaRegistrator) -> Result<(), SchemaError> {
        reg.add_param(
            ELEVATION_GRID,
            ParamType::Raster { optional: false },
            "Elevation Grid",
        )?;
        reg.add_param(
            CENTER_WEIGHT,
            smoothing_weight(DEFAULT_CENTER_WEIGHT),
            "Center Smoothing Weight",
        )?;
        reg.add_param(
            SIDE_WEIGHT,
            smoothing_weight(DEFAULT_SIDE_WEIGHT),
            "Side Smoothing Weight",
        )?;
        reg.add_param(
            DIAGONAL_WEIGHT,
            smoothing_weight(DEFAULT_DIAGONAL_WEIGHT),
            "Diagonal Smoothing Weight",
        )?;

        reg.add_output(STREAM_SOURCE_GRID, OutputType::Raster, "Stream Source Grid")
    }

    fn execute(&self, args: &BoundArgs, progress: &dyn Progress) -> anyhow::Result<()> {
        let command = self.command(args)?;

        let mut lines = Vec::with_capacity(command.len() + 1);
        lines.push(EXECUTION_COMMAND_HEADER.to_string());
        lines.extend(command.iter().cloned());
        self.ctx.log.add_entry(log::Level::Info, &lines);

        self.ctx.runner.run(&command, progress)?;
        Ok(())
    }

    fn command_line(&self, args: &BoundArgs) -> anyhow::Result<Option<Vec<String>>> {
        self.command(args).map(Some)
    }

    fn help_resource(&self) -> PathBuf {
        self.ctx.resources.help_file(DESCRIPTION.cmd_name)
    }

    fn icon(&self) -> PathBuf {
        self.ctx.resources.icon()
    }
}
