//! # Error Types
//!
//! Domain-specific error types for zelopack-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  zelopack-core errors (this file)                                       │
//! │  ├── CalcError        - Calculation failures (zero divisors)            │
//! │  ├── ValidationError  - Input validation failures                       │
//! │  └── Infeasibility    - Preconditions a calculation cannot satisfy      │
//! │                         (NOT an error: carried inside Feasibility<T>)   │
//! │                                                                         │
//! │  Flow: ValidationError → CalcError → caller                             │
//! │        Infeasibility   → Feasibility::Infeasible → caller guidance      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending values)
//! 3. Errors are enum variants, never String
//! 4. A zero divisor is always an explicit error, never a silent Infinity/NaN
//! 5. An unreachable target is a domain outcome, not a fault: it travels as
//!    `Infeasibility` inside a normal result so the caller can display it

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Calculation Error
// =============================================================================

/// Calculation errors.
///
/// These errors represent invocations the formula engine cannot evaluate at
/// all. They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CalcError {
    /// A divisor input is exactly zero.
    ///
    /// ## When This Occurs
    /// - `tolerance_check` with a specified weight of 0
    /// - `ratio` with an acidity of 0
    /// - `acidity_from_ratio` with a ratio of 0
    #[error("Division by zero: {field} is zero")]
    DivisionByZero { field: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a numeric input doesn't meet the documented
/// constraints. Used for early validation before a calculator runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required input is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },
}

// =============================================================================
// Infeasibility
// =============================================================================

/// Reasons a calculation target cannot be reached from the given state.
///
/// Not an error type in the `Result` sense: a calculator whose precondition
/// fails returns `Feasibility::Infeasible { reason }` as a NORMAL value, and
/// the UI renders the message as guidance ("nothing to dilute") rather than
/// as a failure dialog.
///
/// Serializes with a `kind` discriminant so the frontend can branch on the
/// reason without parsing the message text.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Infeasibility {
    /// Dilution lowers Brix; the target must sit below the current value.
    #[error("Target Brix {target_brix} must be below the current Brix {current_brix}")]
    BrixTargetNotBelowCurrent { current_brix: f64, target_brix: f64 },

    /// Concentration and sugar addition raise Brix; the target must sit
    /// above the current value.
    #[error("Target Brix {target_brix} must be above the current Brix {current_brix}")]
    BrixTargetNotAboveCurrent { current_brix: f64, target_brix: f64 },

    /// Adding concentrate can only pull the blend toward the concentrate's
    /// own Brix, so the concentrate must be stronger than the target.
    #[error("Concentrate Brix {concentrate_brix} must be above the target Brix {target_brix}")]
    ConcentrateNotAboveTarget { concentrate_brix: f64, target_brix: f64 },

    /// Soda dosing and dilution lower acidity; the target must sit below
    /// the current value.
    #[error("Target acidity {target_acidity} must be below the current acidity {current_acidity}")]
    AcidityTargetNotBelowCurrent {
        current_acidity: f64,
        target_acidity: f64,
    },

    /// Acid addition raises acidity; the target must sit above the current
    /// value.
    #[error("Target acidity {target_acidity} must be above the current acidity {current_acidity}")]
    AcidityTargetNotAboveCurrent {
        current_acidity: f64,
        target_acidity: f64,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CalcError.
pub type CalcResult<T> = Result<T, CalcError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CalcError::DivisionByZero {
            field: "specified_weight_g".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Division by zero: specified_weight_g is zero"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "density_kg_per_l".to_string(),
        };
        assert_eq!(err.to_string(), "density_kg_per_l must be positive");

        let err = ValidationError::OutOfRange {
            field: "tolerance_percent".to_string(),
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "tolerance_percent must be between 0 and 100"
        );
    }

    #[test]
    fn test_validation_converts_to_calc_error() {
        let validation_err = ValidationError::Required {
            field: "tare_samples".to_string(),
        };
        let calc_err: CalcError = validation_err.into();
        assert!(matches!(calc_err, CalcError::Validation(_)));
        assert_eq!(
            calc_err.to_string(),
            "Validation error: tare_samples is required"
        );
    }

    #[test]
    fn test_infeasibility_messages() {
        let reason = Infeasibility::BrixTargetNotBelowCurrent {
            current_brix: 10.0,
            target_brix: 10.0,
        };
        assert_eq!(
            reason.to_string(),
            "Target Brix 10 must be below the current Brix 10"
        );

        let reason = Infeasibility::ConcentrateNotAboveTarget {
            concentrate_brix: 14.0,
            target_brix: 15.0,
        };
        assert_eq!(
            reason.to_string(),
            "Concentrate Brix 14 must be above the target Brix 15"
        );
    }

    #[test]
    fn test_infeasibility_serializes_with_kind_tag() {
        let reason = Infeasibility::AcidityTargetNotAboveCurrent {
            current_acidity: 0.8,
            target_acidity: 0.5,
        };
        let json = serde_json::to_value(&reason).expect("serializes");
        assert_eq!(json["kind"], "acidity_target_not_above_current");
        assert_eq!(json["current_acidity"], 0.8);
        assert_eq!(json["target_acidity"], 0.5);
    }
}
