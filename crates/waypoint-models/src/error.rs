//! Model selection errors.

use crate::registry::list_model_names;
use thiserror::Error;

/// Result type for model construction.
pub type Result<T> = std::result::Result<T, InvalidModelError>;

/// Raised when a model cannot be built from the requested name and
/// parameters. Aborts the run; nothing retries it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidModelError {
    /// Name is not in the model registry
    #[error("Invalid attribution model: {name}. Expected one of {}", list_model_names().join(", "))]
    UnknownModel {
        /// Requested model name
        name: String,
    },

    /// Parameter outside its valid range
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Supplied value
        value: f64,
        /// Constraint that was violated
        reason: &'static str,
    },
}

impl InvalidModelError {
    pub(crate) fn unknown(name: &str) -> Self {
        Self::UnknownModel {
            name: name.to_string(),
        }
    }
}
