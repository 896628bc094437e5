//! Parameters and outputs declared by an [crate::algorithm::Algorithm].


use std::fmt;

/// ID of a parameter or output, within the namespace of the
/// [crate::algorithm::Algorithm] that declares it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ParamId(&'static str);

impl ParamId {
    pub const fn from_static(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.0)
    }
}

/// The kind of value that a [Param] accepts, and that a
/// [crate::plargs::ArgValue] holds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum_macros::Display)]
pub enum ValueKind {
    #[strum(to_string = "raster")]
    Raster,
    #[strum(to_string = "number")]
    Number,
}

/// Indicates the required semantic type of an argument.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamType {
    /// Path to a raster layer.
    Raster { optional: bool },
    /// Floating point value. Bounds are inclusive.
    Number {
        default: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl ParamType {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Raster { .. } => ValueKind::Raster,
            Self::Number { .. } => ValueKind::Number,
        }
    }
}

/// Describes an input parameter for processing.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    /// ID of the parameter.
    pub param_id: ParamId,
    /// Human-readable label of the parameter.
    pub description: String,
    /// What semantic type of value the argument takes.
    pub param_type: ParamType,
}

/// Indicates the semantic type of a produced output.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display)]
pub enum OutputType {
    #[strum(to_string = "raster")]
    Raster,
}

/// Describes an output produced by processing, at a path chosen by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    pub output_id: ParamId,
    pub description: String,
    pub output_type: OutputType,
}

/// [Param]s and [Output]s for a single algorithm, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    pub params: Vec<Param>,
    pub outputs: Vec<Output>,
}

impl Schema {
    pub fn param(&self, param_id: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.param_id.as_str() == param_id)
    }

    pub fn output(&self, output_id: &str) -> Option<&Output> {
        self.outputs
            .iter()
            .find(|o| o.output_id.as_str() == output_id)
    }

    fn contains(&self, id: ParamId) -> bool {
        self.params.iter().any(|p| p.param_id == id)
            || self.outputs.iter().any(|o| o.output_id == id)
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("parameter {0} is already declared")]
    DuplicateParam(ParamId),
    #[error("output {0} is already declared")]
    DuplicateOutput(ParamId),
    #[error("default {default} of parameter {param_id} is outside of its bounds")]
    InvalidDefault { param_id: ParamId, default: f64 },
}

/// Registers the parameters and outputs of a single algorithm.
#[derive(Default)]
pub struct SchemaRegistrator {
    schema: Schema,
}

impl SchemaRegistrator {
    /// Creates a new empty [SchemaRegistrator].
    pub fn new() -> Self {
        Default::default()
    }

    /// Declares a parameter. IDs are shared between parameters and outputs, and must be unique.
    pub fn add_param<S>(
        &mut self,
        param_id: ParamId,
        param_type: ParamType,
        description: S,
    ) -> Result<(), SchemaError>
    where
        S: Into<String>,
    {
        if self.schema.contains(param_id) {
            return Err(SchemaError::DuplicateParam(param_id));
        }
        if let ParamType::Number {
            default: Some(default),
            min,
            max,
        } = param_type
        {
            if !in_bounds(default, min, max) {
                return Err(SchemaError::InvalidDefault { param_id, default });
            }
        }

        self.schema.params.push(Param {
            param_id,
            description: description.into(),
            param_type,
        });
        Ok(())
    }

    /// Declares an output.
    pub fn add_output<S>(
        &mut self,
        output_id: ParamId,
        output_type: OutputType,
        description: S,
    ) -> Result<(), SchemaError>
    where
        S: Into<String>,
    {
        if self.schema.contains(output_id) {
            return Err(SchemaError::DuplicateOutput(output_id));
        }

        self.schema.outputs.push(Output {
            output_id,
            description: description.into(),
            output_type,
        });
        Ok(())
    }

    /// Consumes the [SchemaRegistrator] and returns the declared [Schema].
    pub fn build(self) -> Schema {
        self.schema
    }
}

/// Returns true if `value` lies within the inclusive bounds.
pub(crate) fn in_bounds(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    !value.is_nan() && min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}
