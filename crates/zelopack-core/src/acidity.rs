//! # Acidity & Dosing Calculators
//!
//! The titration bench and its follow-ups: measuring acidity, correcting it
//! with soda/acid/water, dosing colorant, and the Brix/acidity ratio that
//! grades the flavor balance.
//!
//! ## Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                         Titration Bench Flow                             │
//! │                                                                          │
//! │  burette reading ──► titrated_acidity ──► acidity %                      │
//! │                            │                                             │
//! │       ┌────────────────────┼─────────────────────┐                       │
//! │       ▼                    ▼                     ▼                        │
//! │  soda_dose_to_lower   acid_to_raise    dilution_to_lower_acidity          │
//! │  (caustic, L)         (citric, L)      (water, L)                         │
//! │                                                                          │
//! │  grading: ratio (Brix ÷ acidity) ──► Acidic / Balanced / Sweet           │
//! │  extras:  blend_acidity, colorant_dose, vitamin_c                        │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::EngineConfig;
use crate::error::{CalcError, CalcResult, Infeasibility};
use crate::types::{DosageUnit, DoseUnit, Feasibility, RatioCategory};
use crate::validation::{require_positive, validate_volume_l};

// =============================================================================
// Titration
// =============================================================================

/// A titratable acidity measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TitrationResult {
    pub acidity_percent: f64,
    pub formula: String,
}

/// Computes titratable acidity from a burette reading:
/// `(naoh_volume × factor × 100) / sample_volume` percent acid.
///
/// The factor folds the titrant normality and the acid's milliequivalent
/// factor together; see [`AcidType::meq_factor`](crate::types::AcidType).
/// Requires `sample_volume_ml > 0`.
///
/// ## Example
/// ```rust
/// use zelopack_core::acidity::titrated_acidity;
///
/// let result = titrated_acidity(10.0, 1.0, 50.0).unwrap();
/// assert_eq!(result.acidity_percent, 20.0);
/// ```
pub fn titrated_acidity(
    naoh_volume_ml: f64,
    naoh_factor: f64,
    sample_volume_ml: f64,
) -> CalcResult<TitrationResult> {
    validate_volume_l("sample_volume_ml", sample_volume_ml)?;

    let acidity_percent = naoh_volume_ml * naoh_factor * 100.0 / sample_volume_ml;

    debug!(
        naoh_ml = naoh_volume_ml,
        factor = naoh_factor,
        sample_ml = sample_volume_ml,
        acidity = acidity_percent,
        "titrated_acidity"
    );

    Ok(TitrationResult {
        acidity_percent,
        formula: format!(
            "({:.2} × {:.2} × 100) ÷ {:.2} = {:.2}%",
            naoh_volume_ml, naoh_factor, sample_volume_ml, acidity_percent
        ),
    })
}

// =============================================================================
// Soda Dose (lower acidity)
// =============================================================================

/// Caustic soda volume that neutralizes a tank down to a target acidity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SodaDoseResult {
    pub soda_to_add_l: f64,

    /// Acidity drop this dose achieves (initial − final).
    pub acidity_reduction: f64,

    pub formula: String,
}

/// Computes the soda dose that lowers a tank's acidity:
/// `(initial − final) × tank_volume × neutralization_factor`.
///
/// The neutralization factor is the plant's measured litres of caustic per
/// acidity point per litre of product; 1.0 when the sheet doesn't say.
/// Feasible only when `final_acidity < initial_acidity`.
pub fn soda_dose_to_lower_acidity(
    initial_acidity: f64,
    final_acidity: f64,
    tank_volume_l: f64,
    neutralization_factor: f64,
) -> Feasibility<SodaDoseResult> {
    if final_acidity >= initial_acidity {
        return Feasibility::Infeasible {
            reason: Infeasibility::AcidityTargetNotBelowCurrent {
                current_acidity: initial_acidity,
                target_acidity: final_acidity,
            },
        };
    }

    let acidity_reduction = initial_acidity - final_acidity;
    let soda_to_add_l = acidity_reduction * tank_volume_l * neutralization_factor;

    debug!(
        initial = initial_acidity,
        target = final_acidity,
        tank_l = tank_volume_l,
        factor = neutralization_factor,
        soda_l = soda_to_add_l,
        "soda_dose_to_lower_acidity"
    );

    Feasibility::Feasible(SodaDoseResult {
        soda_to_add_l,
        acidity_reduction,
        formula: format!(
            "({:.2} - {:.2}) × {:.0} × {:.2} = {:.2} L",
            initial_acidity, final_acidity, tank_volume_l, neutralization_factor, soda_to_add_l
        ),
    })
}

// =============================================================================
// Acid Addition (raise acidity)
// =============================================================================

/// Acid solution volume that brings a tank up to a target acidity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AcidAdditionResult {
    pub acid_to_add_l: f64,

    /// Acidity rise this addition achieves (target − current).
    pub acidity_increase: f64,

    pub formula: String,
}

/// Computes the acid solution needed to raise a tank's acidity:
/// `(target − current) × total_volume`.
///
/// Feasible only when `target_acidity > current_acidity`.
pub fn acid_to_raise_acidity(
    current_acidity: f64,
    target_acidity: f64,
    total_volume_l: f64,
) -> Feasibility<AcidAdditionResult> {
    if target_acidity <= current_acidity {
        return Feasibility::Infeasible {
            reason: Infeasibility::AcidityTargetNotAboveCurrent {
                current_acidity,
                target_acidity,
            },
        };
    }

    let acidity_increase = target_acidity - current_acidity;
    let acid_to_add_l = acidity_increase * total_volume_l;

    Feasibility::Feasible(AcidAdditionResult {
        acid_to_add_l,
        acidity_increase,
        formula: format!(
            "({:.2} - {:.2}) × {:.2} = {:.2} L",
            target_acidity, current_acidity, total_volume_l, acid_to_add_l
        ),
    })
}

// =============================================================================
// Dilution (lower acidity)
// =============================================================================

/// Water addition that brings a tank down to a target acidity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AcidityDilutionResult {
    pub water_to_add_l: f64,
    pub final_volume_l: f64,

    /// Acidity drop this dilution achieves (current − target).
    pub acidity_reduction: f64,

    pub formula: String,
}

/// Computes the water needed to dilute a tank down to a target acidity,
/// conserving acid mass the same way the Brix dilution conserves sugar:
/// `water = volume × (current/target − 1)`.
///
/// Feasible only when `target_acidity < current_acidity`; requires
/// `target_acidity > 0` (it is the divisor).
pub fn dilution_to_lower_acidity(
    current_acidity: f64,
    target_acidity: f64,
    current_volume_l: f64,
) -> CalcResult<Feasibility<AcidityDilutionResult>> {
    require_positive("target_acidity", target_acidity)?;

    if target_acidity >= current_acidity {
        return Ok(Feasibility::Infeasible {
            reason: Infeasibility::AcidityTargetNotBelowCurrent {
                current_acidity,
                target_acidity,
            },
        });
    }

    let water_to_add_l = current_volume_l * (current_acidity / target_acidity - 1.0);
    let final_volume_l = current_volume_l + water_to_add_l;

    Ok(Feasibility::Feasible(AcidityDilutionResult {
        water_to_add_l,
        final_volume_l,
        acidity_reduction: current_acidity - target_acidity,
        formula: format!(
            "V2 = {} × ({} / {} - 1) = {:.2} L",
            current_volume_l, current_acidity, target_acidity, water_to_add_l
        ),
    }))
}

// =============================================================================
// Blending
// =============================================================================

/// Predicted acidity of two tanks pumped together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AcidityBlendResult {
    pub blended_acidity: f64,
    pub total_volume_l: f64,
    pub formula: String,
}

/// Predicts the acidity of a two-tank blend (volume-weighted average).
/// Requires `volume1_l + volume2_l > 0`.
pub fn blend_acidity(
    volume1_l: f64,
    acidity1: f64,
    volume2_l: f64,
    acidity2: f64,
) -> CalcResult<AcidityBlendResult> {
    let total_volume_l = volume1_l + volume2_l;
    require_positive("volume1_l + volume2_l", total_volume_l)?;

    let blended_acidity = (volume1_l * acidity1 + volume2_l * acidity2) / total_volume_l;

    Ok(AcidityBlendResult {
        blended_acidity,
        total_volume_l,
        formula: format!(
            "(({} × {}) + ({} × {})) ÷ {} = {:.2}%",
            volume1_l, acidity1, volume2_l, acidity2, total_volume_l, blended_acidity
        ),
    })
}

// =============================================================================
// Colorant Dose
// =============================================================================

/// Total colorant for a batch at a dosage rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ColorantDoseResult {
    pub quantity: f64,

    /// Unit of `quantity`, derived from the dosage rate's unit.
    pub unit: DoseUnit,

    pub formula: String,
}

/// Computes the total colorant for a batch: `volume × dosage`.
///
/// The output unit follows the rate's unit (mL/L → mL, g/L → g); the number
/// passes through unchanged, only the label is derived.
pub fn colorant_dose(total_volume_l: f64, dosage: f64, unit: DosageUnit) -> ColorantDoseResult {
    let quantity = total_volume_l * dosage;
    let dose_unit = unit.dose_unit();

    ColorantDoseResult {
        quantity,
        unit: dose_unit,
        formula: format!(
            "{:.1} L × {:.2} {} = {:.2} {}",
            total_volume_l, dosage, unit, quantity, dose_unit
        ),
    }
}

// =============================================================================
// Ratio
// =============================================================================

/// The Brix/acidity ratio with its flavor grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RatioResult {
    pub ratio: f64,
    pub category: RatioCategory,
    pub formula: String,
}

/// Computes the Brix/acidity ratio and grades it against the configured
/// flavor bands. Requires `acidity ≠ 0`.
///
/// ## Example
/// ```rust
/// use zelopack_core::acidity::ratio;
/// use zelopack_core::config::EngineConfig;
/// use zelopack_core::types::RatioCategory;
///
/// let config = EngineConfig::default();
/// let result = ratio(11.2, 0.8, &config).unwrap();
/// assert_eq!(result.category, RatioCategory::Balanced);
/// ```
pub fn ratio(brix: f64, acidity: f64, config: &EngineConfig) -> CalcResult<RatioResult> {
    if acidity == 0.0 {
        return Err(CalcError::DivisionByZero {
            field: "acidity".to_string(),
        });
    }

    let value = brix / acidity;

    Ok(RatioResult {
        ratio: value,
        category: RatioCategory::classify(value, config),
        formula: format!("{:.1} ÷ {:.2} = {:.1}", brix, acidity, value),
    })
}

/// A Brix recovered from a known ratio and acidity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BrixFromRatioResult {
    pub brix: f64,
    pub formula: String,
}

/// Inverts the ratio relation for Brix: `brix = ratio × acidity`.
pub fn brix_from_ratio(ratio: f64, acidity: f64) -> BrixFromRatioResult {
    let brix = ratio * acidity;

    BrixFromRatioResult {
        brix,
        formula: format!("{:.1} × {:.2} = {:.1}", ratio, acidity, brix),
    }
}

/// An acidity recovered from a known Brix and ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AcidityFromRatioResult {
    pub acidity: f64,
    pub formula: String,
}

/// Inverts the ratio relation for acidity: `acidity = brix / ratio`.
/// Requires `ratio ≠ 0`.
pub fn acidity_from_ratio(brix: f64, ratio: f64) -> CalcResult<AcidityFromRatioResult> {
    if ratio == 0.0 {
        return Err(CalcError::DivisionByZero {
            field: "ratio".to_string(),
        });
    }

    let acidity = brix / ratio;

    Ok(AcidityFromRatioResult {
        acidity,
        formula: format!("{:.1} ÷ {:.1} = {:.2}%", brix, ratio, acidity),
    })
}

// =============================================================================
// Vitamin C
// =============================================================================

/// A vitamin C content measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VitaminCResult {
    pub vitamin_c_mg_per_100ml: f64,
    pub formula: String,
}

/// Computes vitamin C content from an iodate titration:
/// `(reagent_volume × factor) / sample_volume` in mg/100mL.
/// Requires `sample_volume_ml > 0`.
pub fn vitamin_c(
    reagent_volume_ml: f64,
    reagent_factor: f64,
    sample_volume_ml: f64,
) -> CalcResult<VitaminCResult> {
    validate_volume_l("sample_volume_ml", sample_volume_ml)?;

    let vitamin_c_mg_per_100ml = reagent_volume_ml * reagent_factor / sample_volume_ml;

    Ok(VitaminCResult {
        vitamin_c_mg_per_100ml,
        formula: format!(
            "({:.1} × {:.2}) ÷ {:.1} = {:.2} mg/100mL",
            reagent_volume_ml, reagent_factor, sample_volume_ml, vitamin_c_mg_per_100ml
        ),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titrated_acidity() {
        let result = titrated_acidity(10.0, 1.0, 50.0).unwrap();
        assert_eq!(result.acidity_percent, 20.0);
        assert_eq!(result.formula, "(10.00 × 1.00 × 100) ÷ 50.00 = 20.00%");
    }

    #[test]
    fn test_titrated_acidity_rejects_zero_sample() {
        let err = titrated_acidity(10.0, 1.0, 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: sample_volume_ml must be positive"
        );
    }

    #[test]
    fn test_soda_dose_to_lower_acidity() {
        let outcome = soda_dose_to_lower_acidity(0.8, 0.5, 1000.0, 1.0);
        let dose = outcome.as_feasible().expect("feasible");

        assert!((dose.soda_to_add_l - 300.0).abs() < 1e-9);
        assert!((dose.acidity_reduction - 0.3).abs() < 1e-9);
        assert_eq!(dose.formula, "(0.80 - 0.50) × 1000 × 1.00 = 300.00 L");
    }

    #[test]
    fn test_soda_dose_scales_with_neutralization_factor() {
        let outcome = soda_dose_to_lower_acidity(0.8, 0.5, 1000.0, 1.5);
        let dose = outcome.as_feasible().expect("feasible");
        assert!((dose.soda_to_add_l - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_soda_dose_target_not_below_is_infeasible() {
        let outcome = soda_dose_to_lower_acidity(0.5, 0.8, 1000.0, 1.0);
        assert_eq!(
            outcome.reason().expect("reason").to_string(),
            "Target acidity 0.8 must be below the current acidity 0.5"
        );

        let equal = soda_dose_to_lower_acidity(0.5, 0.5, 1000.0, 1.0);
        assert!(!equal.is_feasible());
    }

    #[test]
    fn test_acid_to_raise_acidity() {
        let outcome = acid_to_raise_acidity(0.5, 0.8, 1000.0);
        let addition = outcome.as_feasible().expect("feasible");

        assert!((addition.acid_to_add_l - 300.0).abs() < 1e-9);
        assert!((addition.acidity_increase - 0.3).abs() < 1e-9);
        assert_eq!(addition.formula, "(0.80 - 0.50) × 1000.00 = 300.00 L");
    }

    #[test]
    fn test_acid_to_raise_target_not_above_is_infeasible() {
        let outcome = acid_to_raise_acidity(0.8, 0.5, 1000.0);
        assert!(matches!(
            outcome.reason(),
            Some(Infeasibility::AcidityTargetNotAboveCurrent { .. })
        ));

        let equal = acid_to_raise_acidity(0.8, 0.8, 1000.0);
        assert!(!equal.is_feasible());
    }

    #[test]
    fn test_dilution_to_lower_acidity() {
        let outcome = dilution_to_lower_acidity(1.2, 0.6, 500.0).unwrap();
        let dilution = outcome.as_feasible().expect("feasible");

        assert_eq!(dilution.water_to_add_l, 500.0);
        assert_eq!(dilution.final_volume_l, 1000.0);
        assert!((dilution.acidity_reduction - 0.6).abs() < 1e-9);
        assert_eq!(dilution.formula, "V2 = 500 × (1.2 / 0.6 - 1) = 500.00 L");
    }

    #[test]
    fn test_acidity_dilution_guards() {
        let infeasible = dilution_to_lower_acidity(0.6, 0.8, 500.0).unwrap();
        assert!(matches!(
            infeasible.reason(),
            Some(Infeasibility::AcidityTargetNotBelowCurrent { .. })
        ));

        let err = dilution_to_lower_acidity(1.2, 0.0, 500.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: target_acidity must be positive"
        );
    }

    #[test]
    fn test_blend_acidity() {
        let blend = blend_acidity(100.0, 0.5, 100.0, 1.0).unwrap();
        assert_eq!(blend.blended_acidity, 0.75);
        assert_eq!(blend.total_volume_l, 200.0);
        assert_eq!(blend.formula, "((100 × 0.5) + (100 × 1)) ÷ 200 = 0.75%");

        assert!(blend_acidity(0.0, 0.5, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_colorant_dose_passes_the_unit_through() {
        let ml = colorant_dose(1500.0, 2.0, DosageUnit::MlPerL);
        assert_eq!(ml.quantity, 3000.0);
        assert_eq!(ml.unit, DoseUnit::Milliliters);
        assert_eq!(ml.formula, "1500.0 L × 2.00 mL/L = 3000.00 mL");

        let g = colorant_dose(500.0, 1.5, DosageUnit::GPerL);
        assert_eq!(g.quantity, 750.0);
        assert_eq!(g.unit, DoseUnit::Grams);
    }

    #[test]
    fn test_ratio_grades_flavor_balance() {
        let config = EngineConfig::default();

        let balanced = ratio(11.2, 0.8, &config).unwrap();
        assert!((balanced.ratio - 14.0).abs() < 1e-9);
        assert_eq!(balanced.category, RatioCategory::Balanced);
        assert_eq!(balanced.formula, "11.2 ÷ 0.80 = 14.0");

        let acidic = ratio(10.0, 1.0, &config).unwrap();
        assert_eq!(acidic.category, RatioCategory::Acidic);

        let sweet = ratio(16.0, 1.0, &config).unwrap();
        assert_eq!(sweet.category, RatioCategory::Sweet);
    }

    #[test]
    fn test_ratio_rejects_zero_acidity() {
        let config = EngineConfig::default();
        let err = ratio(11.2, 0.0, &config).unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero { .. }));
        assert_eq!(err.to_string(), "Division by zero: acidity is zero");
    }

    #[test]
    fn test_ratio_inverse_forms() {
        let brix = brix_from_ratio(14.0, 0.8);
        assert!((brix.brix - 11.2).abs() < 1e-9);

        let acidity = acidity_from_ratio(11.2, 14.0).unwrap();
        assert!((acidity.acidity - 0.8).abs() < 1e-9);
        assert_eq!(acidity.formula, "11.2 ÷ 14.0 = 0.80%");

        let err = acidity_from_ratio(11.2, 0.0).unwrap_err();
        assert_eq!(err.to_string(), "Division by zero: ratio is zero");
    }

    #[test]
    fn test_vitamin_c() {
        let result = vitamin_c(2.0, 5.0, 10.0).unwrap();
        assert_eq!(result.vitamin_c_mg_per_100ml, 1.0);
        assert_eq!(result.formula, "(2.0 × 5.00) ÷ 10.0 = 1.00 mg/100mL");

        assert!(vitamin_c(2.0, 5.0, 0.0).is_err());
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let first = titrated_acidity(9.7, 1.02, 50.0).unwrap();
        let second = titrated_acidity(9.7, 1.02, 50.0).unwrap();
        assert_eq!(first, second);

        let first = soda_dose_to_lower_acidity(0.83, 0.65, 1250.0, 1.1);
        let second = soda_dose_to_lower_acidity(0.83, 0.65, 1250.0, 1.1);
        assert_eq!(first, second);
    }
}
