//! Error types for scene construction.
//!
//! Simulation steps never fail; only building bodies and wiring the
//! hierarchy can be rejected.

use thiserror::Error;

use super::types::BodyId;

/// Result type for fallible simulation-core operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised while constructing bodies, scenes or configuration.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("unknown body {0:?}")]
    UnknownBody(BodyId),

    #[error("invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::warn!("rejected parameter `{}`: {}", name, reason);
        SimError::InvalidParameter { name, reason }
    }
}

/// Require a finite value strictly greater than zero.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(name, format!("must be finite and > 0, got {value}")))
    }
}

/// Require a finite value of zero or more.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(name, format!("must be finite and >= 0, got {value}")))
    }
}

/// Require a finite value.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid(name, format!("must be finite, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_positive_rejects_zero_and_nan() {
        assert!(ensure_positive("mass", 1.0).is_ok());
        assert!(ensure_positive("mass", 0.0).is_err());
        assert!(ensure_positive("mass", -3.0).is_err());
        assert!(ensure_positive("mass", f64::NAN).is_err());
        assert!(ensure_positive("mass", f64::INFINITY).is_err());
    }

    #[test]
    fn invalid_parameter_message_names_field() {
        let err = SimError::invalid("eccentricity", "must be in [0, 1)");
        assert_eq!(err.to_string(), "invalid parameter `eccentricity`: must be in [0, 1)");
    }

    #[test]
    fn config_error_converts_from_serde() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: SimError = parse.unwrap_err().into();
        assert!(matches!(err, SimError::Config(_)));
    }
}
