use crate::param::ParamId;
use thiserror::Error;

/// A parameter write that did not reach the mixer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SinkError {
    #[error("parameter {id:?} ('{name}') is not exposed by the mixer")]
    UnknownParameter { id: ParamId, name: String },
    #[error("mixer rejected {value} for parameter '{name}'")]
    Rejected { name: String, value: f32 },
}

/// Numeric configuration that would make a control misbehave.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{what}: range {min}..{max} is not finite")]
    NonFiniteRange { what: &'static str, min: f32, max: f32 },
    #[error("{what} must be positive, got {value}")]
    NotPositive { what: &'static str, value: f32 },
    #[error("{what} must lie in {min}..={max}, got {value}")]
    OutOfRange {
        what: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}
