//! Arguments for an [crate::algorithm::Algorithm].
//!
//! These provide runtime values for the [crate::plparams] declared by the algorithm.


use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::plparams::{self, ParamId, ParamType, Schema, ValueKind};

/// Typed value of an argument.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    Raster(PathBuf),
    Number(f64),
}

impl ArgValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Raster(_) => ValueKind::Raster,
            Self::Number(_) => ValueKind::Number,
        }
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<PathBuf> for ArgValue {
    fn from(value: PathBuf) -> Self {
        Self::Raster(value)
    }
}

impl From<&Path> for ArgValue {
    fn from(value: &Path) -> Self {
        Self::Raster(value.to_path_buf())
    }
}

/// Argument values supplied by the caller. Unset values may be filled with defaults when bound.
#[derive(Clone, Debug, Default)]
pub struct ArgSet {
    args: HashMap<ParamId, ArgValue>,
}

impl ArgSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set<V>(&mut self, param_id: ParamId, arg: V)
    where
        V: Into<ArgValue>,
    {
        self.args.insert(param_id, arg.into());
    }

    pub fn get(&self, param_id: &ParamId) -> Option<&ArgValue> {
        self.args.get(param_id)
    }
}

/// Paths that the caller has chosen for the outputs of an algorithm.
#[derive(Clone, Debug, Default)]
pub struct OutputPaths {
    paths: HashMap<ParamId, PathBuf>,
}

impl OutputPaths {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set<P>(&mut self, output_id: ParamId, path: P)
    where
        P: Into<PathBuf>,
    {
        self.paths.insert(output_id, path.into());
    }

    pub fn get(&self, output_id: &ParamId) -> Option<&Path> {
        self.paths.get(output_id).map(PathBuf::as_path)
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BindError {
    #[error("missing required argument {0}")]
    MissingArg(ParamId),
    #[error("missing path for output {0}")]
    MissingOutput(ParamId),
    #[error("{0} is not a parameter of this algorithm")]
    UnknownParam(ParamId),
    #[error("{0} is not an output of this algorithm")]
    UnknownOutput(ParamId),
    #[error("argument {param_id} must be a {expected} value")]
    TypeMismatch {
        param_id: ParamId,
        expected: ValueKind,
    },
    #[error("argument {param_id} is {value}, which is outside of the range {}", format_range(*.min, *.max))]
    OutOfRange {
        param_id: ParamId,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
}

fn format_range(min: Option<f64>, max: Option<f64>) -> String {
    let bound = |b: Option<f64>| b.map(|b| b.to_string()).unwrap_or_default();
    format!("[{}, {}]", bound(min), bound(max))
}

/// Arguments and output paths that have been checked against a [Schema], with defaults applied.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundArgs {
    values: HashMap<ParamId, ArgValue>,
    outputs: HashMap<ParamId, PathBuf>,
}

impl BoundArgs {
    /// Validates `args` and `outputs` against `schema`.
    ///
    /// Optional rasters may be left unset. Unset numbers take their declared default, and are
    /// otherwise required.
    pub fn bind(schema: &Schema, args: &ArgSet, outputs: &OutputPaths) -> Result<Self, BindError> {
        if let Some(param_id) = args
            .args
            .keys()
            .find(|id| schema.param(id.as_str()).is_none())
        {
            return Err(BindError::UnknownParam(*param_id));
        }
        if let Some(output_id) = outputs
            .paths
            .keys()
            .find(|id| schema.output(id.as_str()).is_none())
        {
            return Err(BindError::UnknownOutput(*output_id));
        }

        let mut values = HashMap::with_capacity(schema.params.len());
        for param in &schema.params {
            if let Some(value) = bind_param(param, args.get(&param.param_id))? {
                values.insert(param.param_id, value);
            }
        }

        let outputs = schema
            .outputs
            .iter()
            .map(|output| {
                outputs
                    .get(&output.output_id)
                    .map(|path| (output.output_id, path.to_path_buf()))
                    .ok_or(BindError::MissingOutput(output.output_id))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { values, outputs })
    }

    /// Returns the path given for a raster parameter.
    pub fn raster(&self, param_id: &ParamId) -> Result<&Path, BindError> {
        match self.values.get(param_id) {
            Some(ArgValue::Raster(path)) => Ok(path),
            Some(_) => Err(BindError::TypeMismatch {
                param_id: *param_id,
                expected: ValueKind::Raster,
            }),
            None => Err(BindError::MissingArg(*param_id)),
        }
    }

    /// Returns the value, or default, of a number parameter.
    pub fn number(&self, param_id: &ParamId) -> Result<f64, BindError> {
        match self.values.get(param_id) {
            Some(ArgValue::Number(value)) => Ok(*value),
            Some(_) => Err(BindError::TypeMismatch {
                param_id: *param_id,
                expected: ValueKind::Number,
            }),
            None => Err(BindError::MissingArg(*param_id)),
        }
    }

    /// Returns the path chosen for an output.
    pub fn output(&self, output_id: &ParamId) -> Result<&Path, BindError> {
        self.outputs
            .get(output_id)
            .map(PathBuf::as_path)
            .ok_or(BindError::MissingOutput(*output_id))
    }
}

fn bind_param(
    param: &plparams::Param,
    value: Option<&ArgValue>,
) -> Result<Option<ArgValue>, BindError> {
    let param_id = param.param_id;
    if let Some(value) = value {
        if value.kind() != param.param_type.kind() {
            return Err(BindError::TypeMismatch {
                param_id,
                expected: param.param_type.kind(),
            });
        }
    }

    match (&param.param_type, value) {
        (ParamType::Raster { .. }, Some(value)) => Ok(Some(value.clone())),
        (ParamType::Raster { optional: true }, None) => Ok(None),
        (ParamType::Raster { optional: false }, None) => Err(BindError::MissingArg(param_id)),
        (ParamType::Number { default, min, max }, value) => {
            let value = match value {
                Some(ArgValue::Number(value)) => *value,
                _ => default.ok_or(BindError::MissingArg(param_id))?,
            };
            if !plparams::in_bounds(value, *min, *max) {
                return Err(BindError::OutOfRange {
                    param_id,
                    value,
                    min: *min,
                    max: *max,
                });
            }
            Ok(Some(ArgValue::Number(value)))
        }
    }
}
