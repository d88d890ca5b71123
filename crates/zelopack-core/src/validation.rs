//! # Validation Module
//!
//! Input validation utilities for the formula engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                         │
//! │  ├── Basic format checks (empty, non-numeric)                           │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Caller, before invoking a calculator                          │
//! │  └── THIS MODULE: the per-field constraint table                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: The calculators themselves                                    │
//! │  ├── Re-check ONLY divisor-linked constraints                           │
//! │  └── A zero divisor is never evaluated, never an Infinity/NaN           │
//! │                                                                         │
//! │  Everything else is assumed pre-validated by layer 2.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use zelopack_core::validation::{validate_brix, validate_volume_l};
//!
//! // Validate a refractometer reading before correcting it
//! assert!(validate_brix("measured_brix", 11.2).is_ok());
//!
//! // Validate a tank volume before a dilution
//! assert!(validate_volume_l("current_volume_l", 0.0).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Building Blocks
// =============================================================================

/// Requires a finite number (rejects NaN and ±infinity).
///
/// Every other validator in this module starts here: a NaN input would
/// otherwise slide through sign comparisons unnoticed.
pub fn require_finite(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Requires a finite value strictly greater than zero.
pub fn require_positive(field: &str, value: f64) -> ValidationResult<()> {
    require_finite(field, value)?;

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Requires a finite value of zero or greater.
pub fn require_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    require_finite(field, value)?;

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Weight & Volume Validators
// =============================================================================

/// Validates a weight in grams.
///
/// ## Rules
/// - Must be finite
/// - Must be zero or greater (an empty scale reads 0)
///
/// ## Example
/// ```rust
/// use zelopack_core::validation::validate_weight_g;
///
/// assert!(validate_weight_g("gross_weight_g", 219.0).is_ok());
/// assert!(validate_weight_g("gross_weight_g", 0.0).is_ok());
/// assert!(validate_weight_g("gross_weight_g", -1.0).is_err());
/// ```
pub fn validate_weight_g(field: &str, value: f64) -> ValidationResult<()> {
    require_non_negative(field, value)
}

/// Validates a volume in litres (or millilitres; the rule is the same).
///
/// ## Rules
/// - Must be finite
/// - Must be strictly positive: an empty tank has nothing to dilute,
///   titrate, or dose
pub fn validate_volume_l(field: &str, value: f64) -> ValidationResult<()> {
    require_positive(field, value)
}

/// Validates a density in kg/L (or g/mL).
///
/// ## Rules
/// - Must be finite
/// - Must be strictly positive (it divides weights into volumes)
pub fn validate_density(field: &str, value: f64) -> ValidationResult<()> {
    require_positive(field, value)
}

/// Validates a tolerance band half-width in percent.
///
/// ## Rules
/// - Must be finite
/// - Must be between 0 and 100 (a band wider than the whole value is a
///   data-entry slip, not a spec)
pub fn validate_tolerance_percent(value: f64) -> ValidationResult<()> {
    require_finite("tolerance_percent", value)?;

    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "tolerance_percent".to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

// =============================================================================
// Lab Reading Validators
// =============================================================================

/// Validates a Brix reading.
///
/// ## Rules
/// - Must be finite
/// - Must be zero or greater (pure water reads 0 °Brix)
///
/// ## Example
/// ```rust
/// use zelopack_core::validation::validate_brix;
///
/// assert!(validate_brix("current_brix", 11.2).is_ok());
/// assert!(validate_brix("current_brix", -0.5).is_err());
/// ```
pub fn validate_brix(field: &str, value: f64) -> ValidationResult<()> {
    require_non_negative(field, value)
}

/// Validates a titratable acidity reading in percent.
///
/// ## Rules
/// - Must be finite
/// - Must be zero or greater
pub fn validate_acidity(field: &str, value: f64) -> ValidationResult<()> {
    require_non_negative(field, value)
}

/// Validates a sample temperature in °C.
///
/// ## Rules
/// - Must be finite; any Celsius value a lab thermometer can produce is
///   accepted, the correction formula is linear in the whole range
pub fn validate_temperature_c(value: f64) -> ValidationResult<()> {
    require_finite("temperature_c", value)
}

/// Validates a multiplicative factor (NaOH factor, neutralization factor,
/// reagent factor, custom product factor).
///
/// ## Rules
/// - Must be finite
/// - Must be strictly positive (a zero factor silently zeroes the result)
pub fn validate_factor(field: &str, value: f64) -> ValidationResult<()> {
    require_positive(field, value)
}

// =============================================================================
// Unit Tests
// =============================================================================
