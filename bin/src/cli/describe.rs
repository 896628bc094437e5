use anyhow::Result;
use catalog::{
    plparams::{Param, ParamType},
    registry::Catalog,
};
use clap::Args;

/// Describes the parameters and outputs of an algorithm.
#[derive(Args, Debug)]
pub struct Command {
    /// Command name of the algorithm, as shown by `list`.
    cmd_name: String,
}

/// Runs the subcommand.
pub fn run(cmd: &Command, catalog: &Catalog) -> Result<()> {
    let entry = catalog.require(&cmd.cmd_name)?;
    let description = entry.description;

    println!("{} ({})", description.name, description.cmd_name);
    println!("Group: {}", description.group);
    println!("Help: {}", entry.algorithm.help_resource().display());
    println!("Icon: {}", entry.algorithm.icon().display());

    println!("Parameters:");
    for param in &entry.schema.params {
        println!(
            "  {:<20} {:<8} {}{}",
            param.param_id.as_str(),
            param.param_type.kind().to_string(),
            param.description,
            constraints(param)
        );
    }

    println!("Outputs:");
    for output in &entry.schema.outputs {
        println!(
            "  {:<20} {:<8} {}",
            output.output_id.as_str(),
            output.output_type.to_string(),
            output.description
        );
    }
    Ok(())
}

fn constraints(param: &Param) -> String {
    let mut parts = Vec::new();
    match &param.param_type {
        ParamType::Raster { optional } => {
            if *optional {
                parts.push("optional".to_string());
            }
        }
        ParamType::Number { default, min, max } => {
            if let Some(default) = default {
                parts.push(format!("default {default}"));
            }
            if let Some(min) = min {
                parts.push(format!("min {min}"));
            }
            if let Some(max) = max {
                parts.push(format!("max {max}"));
            }
        }
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}
