//! Error types.

use thiserror::Error;

/// Errors raised before an annealing run starts.
///
/// The search itself never fails: degenerate geometry is absorbed by the
/// energy model and rejected moves are ordinary algorithm behavior. Only
/// caller-supplied parameters are checked, and they are checked up front.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnealError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl AnnealError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AnnealError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = AnnealError::invalid("radius", "must be positive, got -1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: radius must be positive, got -1"
        );
    }
}
