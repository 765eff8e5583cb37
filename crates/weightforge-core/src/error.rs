//! Error types for weightforge

use thiserror::Error;

/// Error produced by the weight text codec.
///
/// Invalid weight *values* are not errors: operations on non-member values
/// return the type's `no_weight()` sentinel, detectable via `is_member()`.
/// Only structurally malformed text reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightError {
    /// Malformed weight text.
    #[error("parse error at byte {pos}: {message}")]
    Parse { pos: usize, message: String },
}

impl WeightError {
    pub(crate) fn parse(pos: usize, message: impl Into<String>) -> Self {
        WeightError::Parse {
            pos,
            message: message.into(),
        }
    }
}

/// Result type alias for weightforge operations
pub type Result<T> = std::result::Result<T, WeightError>;
