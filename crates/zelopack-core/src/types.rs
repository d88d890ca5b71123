//! # Domain Types
//!
//! Shared vocabulary types used across the formula engine. Result records
//! live next to the calculator that produces them; this module holds the
//! types that more than one module speaks.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ Feasibility<T>  │   │ ToleranceStatus │   │  RatioCategory  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Feasible(T)    │   │  Below          │   │  Acidic  (<12)  │       │
//! │  │  Infeasible {   │   │  Within         │   │  Balanced       │       │
//! │  │    reason }     │   │  Above          │   │  Sweet   (≥16)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductType   │   │    AcidType     │   │  JuiceCategory  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Standard  1.00 │   │  Citric   .064  │   │  Juice          │       │
//! │  │  Citrus    0.98 │   │  Malic    .067  │   │  Nectar         │       │
//! │  │  Nectar    1.02 │   │  Tartaric .075  │   │  SoftDrink      │       │
//! │  │  Concentr. 0.95 │   └─────────────────┘   └─────────────────┘       │
//! │  │  Custom(f64)    │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The numeric values shown are the defaults; every lookup goes through the
//! injected [`EngineConfig`](crate::config::EngineConfig), never a global.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::EngineConfig;
use crate::error::Infeasibility;

// =============================================================================
// Feasibility
// =============================================================================

/// Outcome of a calculator whose target may be unreachable from the given
/// state (e.g. diluting to a HIGHER Brix).
///
/// ## Why Not an Error?
/// An unreachable target is a normal answer to a normal question. The caller
/// shows the reason as guidance next to the input form; only genuinely
/// invalid invocations (zero divisors, malformed input) travel as `CalcError`.
///
/// Serializes externally tagged:
/// `{"feasible": {...}}` or `{"infeasible": {"reason": {...}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility<T> {
    /// The target is reachable; the payload carries the dose/volume answer.
    Feasible(T),
    /// The target cannot be reached; `reason` says which precondition failed.
    Infeasible { reason: Infeasibility },
}

impl<T> Feasibility<T> {
    /// Checks whether this outcome carries a result.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible(_))
    }

    /// Returns the result payload, if feasible.
    #[inline]
    pub fn as_feasible(&self) -> Option<&T> {
        match self {
            Feasibility::Feasible(value) => Some(value),
            Feasibility::Infeasible { .. } => None,
        }
    }

    /// Consumes the outcome, returning the payload if feasible.
    #[inline]
    pub fn into_feasible(self) -> Option<T> {
        match self {
            Feasibility::Feasible(value) => Some(value),
            Feasibility::Infeasible { .. } => None,
        }
    }

    /// Returns the infeasibility reason, if any.
    #[inline]
    pub fn reason(&self) -> Option<&Infeasibility> {
        match self {
            Feasibility::Feasible(_) => None,
            Feasibility::Infeasible { reason } => Some(reason),
        }
    }
}

// =============================================================================
// Tolerance Status
// =============================================================================

/// Where a measured net weight falls relative to the tolerance band.
///
/// The band is inclusive: a net weight exactly on a bound is `Within`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceStatus {
    /// Net weight below the lower bound (under-filled).
    Below,
    /// Net weight inside the band.
    Within,
    /// Net weight above the upper bound (over-filled, product giveaway).
    Above,
}

// =============================================================================
// Ratio Category
// =============================================================================

/// Flavor-balance classification of a Brix/acidity ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RatioCategory {
    /// Ratio below the acidic band edge: acid dominates.
    Acidic,
    /// Ratio inside the balanced band.
    Balanced,
    /// Ratio at or above the sweet band edge: sugar dominates.
    Sweet,
}

impl RatioCategory {
    /// Classifies a ratio against the configured band edges.
    ///
    /// With the default bands: `< 12` is acidic, `12 ≤ r < 16` is balanced,
    /// `≥ 16` is sweet.
    pub fn classify(ratio: f64, config: &EngineConfig) -> Self {
        if ratio < config.ratio.acidic_below {
            RatioCategory::Acidic
        } else if ratio < config.ratio.sweet_from {
            RatioCategory::Balanced
        } else {
            RatioCategory::Sweet
        }
    }
}

// =============================================================================
// Product Type
// =============================================================================

/// Product family for refractometer correction.
///
/// ## Why a Closed Enum?
/// The factor table used to be keyed by free-form strings with a silent 1.0
/// fallback on a typo. A closed enum makes invalid keys unrepresentable;
/// `Custom` keeps the explicit numeric-override path that lab supervisors
/// use for non-catalog products.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Plain juice, factor 1.0 (no correction).
    Standard,
    /// Citrus base, slightly optically denser.
    Citrus,
    /// Nectar base.
    Nectar,
    /// Concentrate.
    Concentrate,
    /// Explicit numeric override for products outside the table.
    Custom(f64),
}

impl ProductType {
    /// Returns the Brix correction factor for this product family.
    pub fn brix_factor(&self, config: &EngineConfig) -> f64 {
        match self {
            ProductType::Standard => config.brix.standard_factor,
            ProductType::Citrus => config.brix.citrus_factor,
            ProductType::Nectar => config.brix.nectar_factor,
            ProductType::Concentrate => config.brix.concentrate_factor,
            ProductType::Custom(factor) => *factor,
        }
    }
}

impl Default for ProductType {
    fn default() -> Self {
        ProductType::Standard
    }
}

// =============================================================================
// Acid Type
// =============================================================================

/// Predominant acid of the product, for titration factor lookup.
///
/// The milliequivalent factor times the titrant normality gives the NaOH
/// factor passed to [`titrated_acidity`](crate::acidity::titrated_acidity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AcidType {
    /// Citrus fruits (orange, lemon, passion fruit).
    Citric,
    /// Pome fruits (apple, grape blends).
    Malic,
    /// Grape.
    Tartaric,
}

impl AcidType {
    /// Returns the milliequivalent factor in g/meq.
    pub fn meq_factor(&self, config: &EngineConfig) -> f64 {
        match self {
            AcidType::Citric => config.acidity.citric_meq_factor,
            AcidType::Malic => config.acidity.malic_meq_factor,
            AcidType::Tartaric => config.acidity.tartaric_meq_factor,
        }
    }
}

impl Default for AcidType {
    fn default() -> Self {
        AcidType::Citric
    }
}

// =============================================================================
// Juice Category
// =============================================================================

/// Finished-product category, for standard Brix targets and typical
/// densities used when the batch sheet doesn't specify one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum JuiceCategory {
    Juice,
    Nectar,
    SoftDrink,
}

impl JuiceCategory {
    /// Returns the standard finished-product Brix target.
    pub fn standard_brix(&self, config: &EngineConfig) -> f64 {
        match self {
            JuiceCategory::Juice => config.standard_brix.juice,
            JuiceCategory::Nectar => config.standard_brix.nectar,
            JuiceCategory::SoftDrink => config.standard_brix.soft_drink,
        }
    }

    /// Returns the typical density in kg/L.
    pub fn typical_density(&self, config: &EngineConfig) -> f64 {
        match self {
            JuiceCategory::Juice => config.density.juice_kg_per_l,
            JuiceCategory::Nectar => config.density.nectar_kg_per_l,
            JuiceCategory::SoftDrink => config.density.soft_drink_kg_per_l,
        }
    }
}

impl Default for JuiceCategory {
    fn default() -> Self {
        JuiceCategory::Juice
    }
}

// =============================================================================
// Units
// =============================================================================

/// Unit of a weight input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    Grams,
    Kilograms,
}

impl WeightUnit {
    /// Normalizes a value in this unit to kilograms.
    #[inline]
    pub fn to_kilograms(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Grams => value / 1000.0,
            WeightUnit::Kilograms => value,
        }
    }
}

impl Default for WeightUnit {
    fn default() -> Self {
        WeightUnit::Grams
    }
}

/// Unit of a colorant dosage rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DosageUnit {
    /// Millilitres of colorant per litre of product.
    MlPerL,
    /// Grams of colorant per litre of product.
    GPerL,
}

impl DosageUnit {
    /// Returns the unit of the computed total dose. A rate in mL/L yields a
    /// dose in mL; the numbers pass through, only the label changes.
    #[inline]
    pub fn dose_unit(&self) -> DoseUnit {
        match self {
            DosageUnit::MlPerL => DoseUnit::Milliliters,
            DosageUnit::GPerL => DoseUnit::Grams,
        }
    }
}

impl fmt::Display for DosageUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DosageUnit::MlPerL => write!(f, "mL/L"),
            DosageUnit::GPerL => write!(f, "g/L"),
        }
    }
}

/// Unit of a computed colorant dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DoseUnit {
    Milliliters,
    Grams,
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoseUnit::Milliliters => write!(f, "mL"),
            DoseUnit::Grams => write!(f, "g"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_factors() {
        let config = EngineConfig::default();
        assert_eq!(ProductType::Standard.brix_factor(&config), 1.0);
        assert!((ProductType::Citrus.brix_factor(&config) - 0.98).abs() < 1e-9);
        assert!((ProductType::Concentrate.brix_factor(&config) - 0.95).abs() < 1e-9);
        assert_eq!(ProductType::Custom(0.97).brix_factor(&config), 0.97);
    }

    #[test]
    fn test_ratio_classification_bands() {
        let config = EngineConfig::default();
        assert_eq!(RatioCategory::classify(11.9, &config), RatioCategory::Acidic);
        assert_eq!(RatioCategory::classify(12.0, &config), RatioCategory::Balanced);
        assert_eq!(RatioCategory::classify(15.9, &config), RatioCategory::Balanced);
        assert_eq!(RatioCategory::classify(16.0, &config), RatioCategory::Sweet);
    }

    #[test]
    fn test_acid_type_factors() {
        let config = EngineConfig::default();
        assert!((AcidType::Citric.meq_factor(&config) - 0.064).abs() < 1e-9);
        assert!((AcidType::Tartaric.meq_factor(&config) - 0.075).abs() < 1e-9);
    }

    #[test]
    fn test_juice_category_lookups() {
        let config = EngineConfig::default();
        assert!((JuiceCategory::Juice.standard_brix(&config) - 11.2).abs() < 1e-9);
        assert!((JuiceCategory::Nectar.typical_density(&config) - 1.050).abs() < 1e-9);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ProductType::default(), ProductType::Standard);
        assert_eq!(AcidType::default(), AcidType::Citric);
        assert_eq!(JuiceCategory::default(), JuiceCategory::Juice);
        assert_eq!(WeightUnit::default(), WeightUnit::Grams);
    }

    #[test]
    fn test_weight_unit_normalization() {
        assert_eq!(WeightUnit::Grams.to_kilograms(500.0), 0.5);
        assert_eq!(WeightUnit::Kilograms.to_kilograms(2.0), 2.0);
    }

    #[test]
    fn test_dosage_unit_labels() {
        assert_eq!(DosageUnit::MlPerL.to_string(), "mL/L");
        assert_eq!(DosageUnit::GPerL.dose_unit(), DoseUnit::Grams);
        assert_eq!(DoseUnit::Milliliters.to_string(), "mL");
    }

    #[test]
    fn test_tolerance_status_serializes_snake_case() {
        let json = serde_json::to_string(&ToleranceStatus::Within).expect("serializes");
        assert_eq!(json, "\"within\"");
    }

    #[test]
    fn test_feasibility_json_shapes() {
        let feasible: Feasibility<f64> = Feasibility::Feasible(42.0);
        let json = serde_json::to_value(&feasible).expect("serializes");
        assert_eq!(json["feasible"], 42.0);

        let infeasible: Feasibility<f64> = Feasibility::Infeasible {
            reason: Infeasibility::BrixTargetNotBelowCurrent {
                current_brix: 10.0,
                target_brix: 10.0,
            },
        };
        let json = serde_json::to_value(&infeasible).expect("serializes");
        assert_eq!(
            json["infeasible"]["reason"]["kind"],
            "brix_target_not_below_current"
        );
        assert!(!infeasible.is_feasible());
        assert!(infeasible.reason().is_some());
    }

    #[test]
    fn test_feasibility_round_trips_through_json() {
        let pair: Vec<Feasibility<f64>> = vec![
            Feasibility::Feasible(42.0),
            Feasibility::Infeasible {
                reason: Infeasibility::ConcentrateNotAboveTarget {
                    concentrate_brix: 14.0,
                    target_brix: 15.0,
                },
            },
        ];
        let json = serde_json::to_string(&pair).expect("serializes");
        let back: Vec<Feasibility<f64>> = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, pair);
    }
}
