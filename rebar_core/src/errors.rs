//! # Error Types
//!
//! Structured error types for rebar_core. Every failure carries enough
//! context to locate the offending input field or beam station without
//! re-running synthesis under a debugger.
//!
//! ## Example
//!
//! ```rust
//! use rebar_core::errors::{RebarError, RebarResult};
//!
//! fn validate_spacing(spacing_mm: f64) -> RebarResult<()> {
//!     if spacing_mm <= 0.0 {
//!         return Err(RebarError::configuration(
//!             "dense_spacing",
//!             spacing_mm.to_string(),
//!             "Stirrup spacing must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rebar_core operations
pub type RebarResult<T> = Result<T, RebarError>;

/// Structured error type for the synthesis pass.
///
/// Configuration errors abort before any geometry is produced; geometry and
/// strict-check errors abort the pass at the offending station so that no
/// partial output survives.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum RebarError {
    /// The parameter model is structurally invalid (overlapping openings,
    /// non-positive spacing, opening outside the beam, ...)
    #[error("Invalid configuration for '{field}': {value} - {reason}")]
    Configuration {
        field: String,
        value: String,
        reason: String,
    },

    /// A derived geometric quantity is infeasible at a specific station
    #[error("Geometry infeasible at x={station_mm} mm: {quantity} - {reason}")]
    Geometry {
        station_mm: f64,
        quantity: String,
        reason: String,
    },

    /// A STRICT verification check failed; the whole pass is aborted
    #[error("Strict check '{name}' failed: expected {expected}, got {actual} (tolerance {tolerance})")]
    StrictCheckFailed {
        name: String,
        expected: f64,
        actual: f64,
        tolerance: f64,
    },

    /// JSON serialization/deserialization error at the input boundary
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl RebarError {
    /// Create a Configuration error
    pub fn configuration(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RebarError::Configuration {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Geometry error
    pub fn geometry(station_mm: f64, quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        RebarError::Geometry {
            station_mm,
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            RebarError::Configuration { .. } => "CONFIGURATION",
            RebarError::Geometry { .. } => "GEOMETRY",
            RebarError::StrictCheckFailed { .. } => "STRICT_CHECK_FAILED",
            RebarError::Serialization { .. } => "SERIALIZATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = RebarError::configuration("length", "-100", "Beam length must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: RebarError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RebarError::geometry(1200.0, "z_flange_top", "cover exceeds flange thickness").error_code(),
            "GEOMETRY"
        );
        assert_eq!(
            RebarError::configuration("cover", "200", "too large").error_code(),
            "CONFIGURATION"
        );
    }

    #[test]
    fn test_display_carries_station() {
        let error = RebarError::geometry(4250.0, "y_outer", "non-positive span");
        let msg = error.to_string();
        assert!(msg.contains("4250"));
        assert!(msg.contains("y_outer"));
    }
}
