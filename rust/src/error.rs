//! Error types for deposition runs and parameter scans.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RsaError {
    /// A caller-supplied argument violates a precondition.
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl RsaError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        RsaError::InvalidArgument {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// True for precondition failures, as opposed to persistence failures.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RsaError::InvalidArgument { .. })
    }
}

pub type Result<T> = std::result::Result<T, RsaError>;
