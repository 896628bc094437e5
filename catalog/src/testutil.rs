use std::{
    cell::{Cell, RefCell},
    path::PathBuf,
};

use crate::{
    algorithm::{Algorithm, Description},
    plargs::BoundArgs,
    plparams::{OutputType, ParamId, ParamType, SchemaError, SchemaRegistrator},
    progress::Progress,
};

pub const FAKE_INPUT: ParamId = ParamId::from_static("INPUT");
pub const FAKE_FACTOR: ParamId = ParamId::from_static("FACTOR");
pub const FAKE_OUTPUT: ParamId = ParamId::from_static("OUTPUT");

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("fake algorithm failed")]
pub struct FakeError;

/// Algorithm that records how it is called.
pub struct FakeAlgorithm {
    pub description: Description,
    pub fail: bool,
    pub declare_calls: Cell<usize>,
    pub executed: RefCell<Vec<BoundArgs>>,
}

impl FakeAlgorithm {
    pub fn new(name: &'static str, cmd_name: &'static str, group: &'static str) -> Self {
        Self {
            description: Description {
                name,
                cmd_name,
                group,
            },
            fail: false,
            declare_calls: Cell::new(0),
            executed: RefCell::new(Vec::new()),
        }
    }
}

impl Algorithm for FakeAlgorithm {
    fn describe(&self) -> Description {
        self.description
    }

    fn declare(&self, reg: &mut SchemaRegistrator) -> Result<(), SchemaError> {
        self.declare_calls.set(self.declare_calls.get() + 1);
        reg.add_param(FAKE_INPUT, ParamType::Raster { optional: false }, "Input")?;
        reg.add_param(
            FAKE_FACTOR,
            ParamType::Number {
                default: Some(2.0),
                min: Some(0.0),
                max: None,
            },
            "Factor",
        )?;
        reg.add_output(FAKE_OUTPUT, OutputType::Raster, "Output")
    }

    fn execute(&self, args: &BoundArgs, _progress: &dyn Progress) -> anyhow::Result<()> {
        self.executed.borrow_mut().push(args.clone());
        if self.fail {
            return Err(FakeError.into());
        }
        Ok(())
    }

    fn help_resource(&self) -> PathBuf {
        PathBuf::from("help").join(format!("{}.html", self.description.cmd_name))
    }

    fn icon(&self) -> PathBuf {
        PathBuf::from("icons/fake.png")
    }
}

/// Algorithm that declares the same parameter twice.
pub struct DuplicatingAlgorithm;

impl Algorithm for DuplicatingAlgorithm {
    fn describe(&self) -> Description {
        Description {
            name: "Duplicating",
            cmd_name: "duplicating",
            group: "Broken",
        }
    }

    fn declare(&self, reg: &mut SchemaRegistrator) -> Result<(), SchemaError> {
        reg.add_param(FAKE_INPUT, ParamType::Raster { optional: false }, "Input")?;
        reg.add_param(FAKE_INPUT, ParamType::Raster { optional: false }, "Input")
    }

    fn execute(&self, _args: &BoundArgs, _progress: &dyn Progress) -> anyhow::Result<()> {
        Ok(())
    }

    fn help_resource(&self) -> PathBuf {
        PathBuf::new()
    }

    fn icon(&self) -> PathBuf {
        PathBuf::new()
    }
}
