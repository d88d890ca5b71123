//! # Brix & Concentration Calculators
//!
//! Refractometer correction and tank-adjustment math: everything the lab
//! does between "the reading says X" and "add this much water/concentrate/
//! sugar to hit the target".
//!
//! ## Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                        Tank Adjustment Flow                              │
//! │                                                                          │
//! │  refractometer reading ──► temperature_correction ──► real Brix          │
//! │                                      │                                   │
//! │          ┌───────────────────────────┼───────────────────────────┐       │
//! │          ▼                           ▼                           ▼       │
//! │   dilution_to_lower_brix   concentration_to_raise_brix   sugar_to_raise  │
//! │   (add water)              (add concentrate)             (add crystal)   │
//! │          │                           │                           │       │
//! │          └───────────► Feasibility<…> with dose & final volume ◄─┘       │
//! │                                                                          │
//! │  planning helpers: blend_brix, solution_dilution, finalization_time      │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The adjustment calculators answer with [`Feasibility`]: asking to dilute
//! UP or concentrate DOWN is a normal question with a "not from here" answer,
//! never a panic.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::EngineConfig;
use crate::error::{CalcResult, Infeasibility};
use crate::types::{Feasibility, ProductType};
use crate::validation::{require_positive, validate_density};

// =============================================================================
// Temperature Correction
// =============================================================================

/// A refractometer reading corrected for temperature and product family.
///
/// Every intermediate is observable: QC sheets record the raw reading, the
/// temperature-corrected value, the factor, and the final Brix side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BrixCorrectionResult {
    /// The raw instrument reading.
    pub measured_brix: f64,

    /// Signed Brix adjustment from the temperature term alone.
    pub temperature_adjustment: f64,

    /// Reading after the temperature term, before the product factor.
    pub temperature_corrected_brix: f64,

    /// Product-family factor that was applied.
    pub product_factor: f64,

    /// The corrected Brix.
    pub final_brix: f64,

    pub formula: String,
}

/// Corrects a refractometer reading taken away from the reference
/// temperature, then applies the product-family factor.
///
/// Above the reference the sample reads high, so the drift is subtracted;
/// below it reads low, so the drift is added back; at the reference the
/// reading passes through untouched.
///
/// ## Example
/// ```rust
/// use zelopack_core::brix::temperature_correction;
/// use zelopack_core::config::EngineConfig;
/// use zelopack_core::types::ProductType;
///
/// let config = EngineConfig::default();
/// let result = temperature_correction(11.5, 25.0, ProductType::Standard, &config);
/// assert!((result.final_brix - 11.2).abs() < 1e-9);
/// ```
pub fn temperature_correction(
    measured_brix: f64,
    sample_temp_c: f64,
    product: ProductType,
    config: &EngineConfig,
) -> BrixCorrectionResult {
    let reference = config.brix.reference_temperature_c;
    let slope = config.brix.slope_per_degree_c;
    let delta = sample_temp_c - reference;

    let (temperature_corrected_brix, temperature_adjustment) = if sample_temp_c > reference {
        let drift = delta * slope;
        (measured_brix - drift, -drift)
    } else if sample_temp_c < reference {
        let drift = (delta * slope).abs();
        (measured_brix + drift, drift)
    } else {
        (measured_brix, 0.0)
    };

    let product_factor = product.brix_factor(config);
    let final_brix = temperature_corrected_brix * product_factor;

    let formula = if temperature_adjustment == 0.0 {
        format!("{:.2} × {:.2} = {:.2}", measured_brix, product_factor, final_brix)
    } else {
        let sign = if temperature_adjustment < 0.0 { "-" } else { "+" };
        format!(
            "{:.2} {} {:.2} = {:.2}; {:.2} × {:.2} = {:.2}",
            measured_brix,
            sign,
            temperature_adjustment.abs(),
            temperature_corrected_brix,
            temperature_corrected_brix,
            product_factor,
            final_brix
        )
    };

    debug!(
        measured = measured_brix,
        temp_c = sample_temp_c,
        adjustment = temperature_adjustment,
        factor = product_factor,
        final_brix = final_brix,
        "temperature_correction"
    );

    BrixCorrectionResult {
        measured_brix,
        temperature_adjustment,
        temperature_corrected_brix,
        product_factor,
        final_brix,
        formula,
    }
}

// =============================================================================
// Dilution (lower Brix)
// =============================================================================

/// Water addition that brings a tank down to a target Brix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DilutionResult {
    pub water_to_add_l: f64,
    pub final_volume_l: f64,

    /// Brix drop this dilution achieves (current − target).
    pub brix_reduction: f64,

    pub formula: String,
}

/// Computes the water needed to dilute a tank down to a target Brix.
///
/// Solute is conserved: `current × volume = target × final_volume`, so
/// `water = volume × (current/target − 1)`.
///
/// Feasible only when `current_brix > target_brix`; requires
/// `target_brix > 0` (it is the divisor).
///
/// ## Example
/// ```rust
/// use zelopack_core::brix::dilution_to_lower_brix;
///
/// let outcome = dilution_to_lower_brix(20.0, 10.0, 100.0).unwrap();
/// let dilution = outcome.as_feasible().unwrap();
/// assert_eq!(dilution.water_to_add_l, 100.0);
/// assert_eq!(dilution.final_volume_l, 200.0);
/// ```
pub fn dilution_to_lower_brix(
    current_brix: f64,
    target_brix: f64,
    current_volume_l: f64,
) -> CalcResult<Feasibility<DilutionResult>> {
    require_positive("target_brix", target_brix)?;

    if current_brix <= target_brix {
        return Ok(Feasibility::Infeasible {
            reason: Infeasibility::BrixTargetNotBelowCurrent {
                current_brix,
                target_brix,
            },
        });
    }

    let water_to_add_l = current_volume_l * (current_brix / target_brix - 1.0);
    let final_volume_l = current_volume_l + water_to_add_l;

    debug!(
        current = current_brix,
        target = target_brix,
        volume = current_volume_l,
        water = water_to_add_l,
        "dilution_to_lower_brix"
    );

    Ok(Feasibility::Feasible(DilutionResult {
        water_to_add_l,
        final_volume_l,
        brix_reduction: current_brix - target_brix,
        formula: format!(
            "V2 = {} × ({} / {} - 1) = {:.2} L",
            current_volume_l, current_brix, target_brix, water_to_add_l
        ),
    }))
}

// =============================================================================
// Concentration (raise Brix)
// =============================================================================

/// Concentrate addition that brings a tank up to a target Brix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConcentrationResult {
    pub concentrate_to_add_l: f64,
    pub final_volume_l: f64,

    /// Brix rise this addition achieves (target − current).
    pub brix_increase: f64,

    pub formula: String,
}

/// Computes the concentrate needed to raise a tank to a target Brix.
///
/// Mass balance on the blend gives
/// `add = volume × (target − current) / (concentrate − target)`.
///
/// Feasible only when `current_brix < target_brix` AND
/// `concentrate_brix > target_brix` (checked in that order; each violation
/// reports its own reason). The second condition keeps the divisor positive.
pub fn concentration_to_raise_brix(
    current_brix: f64,
    target_brix: f64,
    current_volume_l: f64,
    concentrate_brix: f64,
) -> Feasibility<ConcentrationResult> {
    if current_brix >= target_brix {
        return Feasibility::Infeasible {
            reason: Infeasibility::BrixTargetNotAboveCurrent {
                current_brix,
                target_brix,
            },
        };
    }

    if concentrate_brix <= target_brix {
        return Feasibility::Infeasible {
            reason: Infeasibility::ConcentrateNotAboveTarget {
                concentrate_brix,
                target_brix,
            },
        };
    }

    let concentrate_to_add_l =
        current_volume_l * (target_brix - current_brix) / (concentrate_brix - target_brix);
    let final_volume_l = current_volume_l + concentrate_to_add_l;

    debug!(
        current = current_brix,
        target = target_brix,
        concentrate = concentrate_brix,
        volume = current_volume_l,
        addition = concentrate_to_add_l,
        "concentration_to_raise_brix"
    );

    Feasibility::Feasible(ConcentrationResult {
        concentrate_to_add_l,
        final_volume_l,
        brix_increase: target_brix - current_brix,
        formula: format!(
            "V2 = {} × ({} - {}) / ({} - {}) = {:.2} L",
            current_volume_l, target_brix, current_brix, concentrate_brix, target_brix,
            concentrate_to_add_l
        ),
    })
}

// =============================================================================
// Blending
// =============================================================================

/// Predicted Brix of two tanks pumped together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BlendResult {
    pub blended_brix: f64,
    pub total_volume_l: f64,
    pub formula: String,
}

/// Predicts the Brix of a two-tank blend (volume-weighted average).
/// Requires `volume1_l + volume2_l > 0`.
pub fn blend_brix(
    volume1_l: f64,
    brix1: f64,
    volume2_l: f64,
    brix2: f64,
) -> CalcResult<BlendResult> {
    let total_volume_l = volume1_l + volume2_l;
    require_positive("volume1_l + volume2_l", total_volume_l)?;

    let blended_brix = (volume1_l * brix1 + volume2_l * brix2) / total_volume_l;

    Ok(BlendResult {
        blended_brix,
        total_volume_l,
        formula: format!(
            "(({} × {}) + ({} × {})) ÷ {} = {:.2}",
            volume1_l, brix1, volume2_l, brix2, total_volume_l, blended_brix
        ),
    })
}

// =============================================================================
// Sugar Addition (raise Brix)
// =============================================================================

/// Crystal sugar that brings a tank up to a target Brix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SugarAdditionResult {
    pub sugar_kg: f64,

    /// Brix rise this addition achieves (target − current).
    pub brix_increase: f64,

    pub formula: String,
}

/// Computes the crystal sugar in kg that raises a tank to a target Brix:
/// `(target − current) × volume × density / 100`.
///
/// Feasible only when `current_brix < target_brix`; requires
/// `density_kg_per_l > 0`.
pub fn sugar_to_raise_brix(
    current_brix: f64,
    target_brix: f64,
    volume_l: f64,
    density_kg_per_l: f64,
) -> CalcResult<Feasibility<SugarAdditionResult>> {
    validate_density("density_kg_per_l", density_kg_per_l)?;

    if current_brix >= target_brix {
        return Ok(Feasibility::Infeasible {
            reason: Infeasibility::BrixTargetNotAboveCurrent {
                current_brix,
                target_brix,
            },
        });
    }

    let sugar_kg = (target_brix - current_brix) * volume_l * density_kg_per_l / 100.0;

    Ok(Feasibility::Feasible(SugarAdditionResult {
        sugar_kg,
        brix_increase: target_brix - current_brix,
        formula: format!(
            "(({} - {}) × {} × {}) ÷ 100 = {:.2} kg",
            target_brix, current_brix, volume_l, density_kg_per_l, sugar_kg
        ),
    }))
}

// =============================================================================
// Solution Preparation (C1·V1 = C2·V2)
// =============================================================================

/// A reagent or syrup dilution computed by solute conservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SolutionDilutionResult {
    pub final_volume_l: f64,

    /// Diluent to add. Negative when the solution is already weaker than
    /// the target; the caller decides whether that means "re-concentrate"
    /// or "wrong bottle".
    pub diluent_to_add_l: f64,

    pub formula: String,
}

/// Solves C1·V1 = C2·V2 for the final volume of a prepared solution.
/// Requires `target_concentration > 0` (it is the divisor).
pub fn solution_dilution(
    initial_concentration: f64,
    initial_volume_l: f64,
    target_concentration: f64,
) -> CalcResult<SolutionDilutionResult> {
    require_positive("target_concentration", target_concentration)?;

    let final_volume_l = initial_concentration * initial_volume_l / target_concentration;
    let diluent_to_add_l = final_volume_l - initial_volume_l;

    Ok(SolutionDilutionResult {
        final_volume_l,
        diluent_to_add_l,
        formula: format!(
            "({} × {}) ÷ {} = {:.2} L",
            initial_concentration, initial_volume_l, target_concentration, final_volume_l
        ),
    })
}

// =============================================================================
// Finalization Time
// =============================================================================

/// How long a transfer will take at a given pump rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FinalizationTimeResult {
    pub minutes: f64,
    pub formula: String,
}

/// Computes the minutes needed to move a batch at a given flow rate.
/// Requires `flow_rate_l_per_min > 0`.
pub fn finalization_time(
    volume_l: f64,
    flow_rate_l_per_min: f64,
) -> CalcResult<FinalizationTimeResult> {
    require_positive("flow_rate_l_per_min", flow_rate_l_per_min)?;

    let minutes = volume_l / flow_rate_l_per_min;

    Ok(FinalizationTimeResult {
        minutes,
        formula: format!(
            "{} ÷ {} = {:.2} min",
            volume_l, flow_rate_l_per_min, minutes
        ),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
