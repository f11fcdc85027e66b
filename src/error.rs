use thiserror::Error;

/// Errors reported by the signal pipeline.
///
/// Both kinds are recoverable: the caller keeps whatever it rendered last and
/// waits for the next parameter change.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// A numeric input is outside the domain of the operation.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Two sequences that must line up sample-for-sample do not.
    #[error("dimension mismatch: expected {expected} samples, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl SignalError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SignalError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SignalError>;
