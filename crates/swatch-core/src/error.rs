//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SwatchError {
    #[error("PARAM/{field}: invalid value '{value}'")]
    InvalidParameter { field: String, value: String },

    #[error("COLOR/invalid hex color '{0}'")]
    InvalidColorFormat(String),

    #[error("GEN/{model}: {message}")]
    GenerationUnavailable { model: String, message: String },

    #[error("PARSE/{0}")]
    UnparsableResponse(String),

    #[error("TEMPLATE/{0}")]
    Template(String),

    #[error("CONFIG/{0}")]
    Config(String),
}

impl SwatchError {
    pub fn invalid_parameter(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn unparsable(reason: impl Into<String>) -> Self {
        Self::UnparsableResponse(reason.into())
    }

    /// Errors the caller caused; everything else is recoverable by retrying
    /// or by falling back.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

pub type SwatchResult<T> = Result<T, SwatchError>;
