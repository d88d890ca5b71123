//! # Weight & Tolerance Calculators
//!
//! Packaging-line weight checks: net/gross weight, the declared-content
//! tolerance band, weight-to-volume conversion, and the supporting line
//! measurements (density, tare averaging, loss and yield percentages).
//!
//! ## Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                     Packaging-Line Weight Flow                           │
//! │                                                                          │
//! │  scale reading (gross) ──► net_weight ──► tolerance_check ──► status    │
//! │          │                      │                                        │
//! │        tare                     └──► net_volume_from_weight ──► litres  │
//! │                                                                          │
//! │  supporting checks: density, average_tare, base_loss, process_yield     │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every result carries a `formula` string with the inputs substituted in,
//! ready to print on the line-check report.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CalcError, CalcResult, ValidationError};
use crate::types::{ToleranceStatus, WeightUnit};
use crate::validation::{require_positive, validate_density, validate_volume_l};

// =============================================================================
// Net / Gross Weight
// =============================================================================

/// A computed weight in grams, with its printable formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeightResult {
    pub weight_g: f64,
    pub formula: String,
}

/// Computes net product weight from a gross scale reading and the package
/// tare.
///
/// A gross reading below the tare yields a NEGATIVE net weight. That is a
/// real line condition (mislabeled tare, wrong package on the scale) and is
/// returned as-is for the caller to flag; nothing here rejects it.
///
/// ## Example
/// ```rust
/// use zelopack_core::weight::net_weight;
///
/// let result = net_weight(219.0, 19.0);
/// assert_eq!(result.weight_g, 200.0);
/// assert_eq!(result.formula, "219.00 g - 19.00 g = 200.00 g");
/// ```
pub fn net_weight(gross_weight_g: f64, tare_g: f64) -> WeightResult {
    let weight_g = gross_weight_g - tare_g;

    WeightResult {
        weight_g,
        formula: format!(
            "{:.2} g - {:.2} g = {:.2} g",
            gross_weight_g, tare_g, weight_g
        ),
    }
}

/// Computes the expected gross weight from a net content and the package
/// tare. Inverse of [`net_weight`].
pub fn gross_weight(net_weight_g: f64, tare_g: f64) -> WeightResult {
    let weight_g = net_weight_g + tare_g;

    WeightResult {
        weight_g,
        formula: format!(
            "{:.2} g + {:.2} g = {:.2} g",
            net_weight_g, tare_g, weight_g
        ),
    }
}

// =============================================================================
// Tolerance Check
// =============================================================================

/// Outcome of checking a net weight against the declared content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToleranceResult {
    /// The net weight that was checked.
    pub net_weight_g: f64,

    /// The declared content the band is centred on.
    pub specified_weight_g: f64,

    /// Where the net weight falls relative to the band.
    pub status: ToleranceStatus,

    /// Signed deviation from the declared content, in percent.
    pub deviation_percent: f64,

    /// Lower edge of the band (inclusive).
    pub lower_bound_g: f64,

    /// Upper edge of the band (inclusive).
    pub upper_bound_g: f64,

    /// Signed absolute difference `net - specified`, in grams.
    pub difference_g: f64,

    pub formula: String,
}

/// Checks a net weight against a symmetric tolerance band around the
/// declared content.
///
/// The band is `specified × (1 ± tolerance/100)` and both edges are
/// inclusive: a package exactly on a bound passes.
///
/// Requires `specified_weight_g ≠ 0` (it divides the deviation).
///
/// ## Example
/// ```rust
/// use zelopack_core::weight::tolerance_check;
/// use zelopack_core::types::ToleranceStatus;
///
/// let result = tolerance_check(205.0, 200.0, 2.5).unwrap();
/// assert_eq!(result.status, ToleranceStatus::Within);
/// ```
pub fn tolerance_check(
    net_weight_g: f64,
    specified_weight_g: f64,
    tolerance_percent: f64,
) -> CalcResult<ToleranceResult> {
    if specified_weight_g == 0.0 {
        return Err(CalcError::DivisionByZero {
            field: "specified_weight_g".to_string(),
        });
    }

    let margin_g = specified_weight_g * (tolerance_percent / 100.0);
    let lower_bound_g = specified_weight_g - margin_g;
    let upper_bound_g = specified_weight_g + margin_g;
    let difference_g = net_weight_g - specified_weight_g;
    let deviation_percent = difference_g / specified_weight_g * 100.0;

    let status = if net_weight_g < lower_bound_g {
        ToleranceStatus::Below
    } else if net_weight_g > upper_bound_g {
        ToleranceStatus::Above
    } else {
        ToleranceStatus::Within
    };

    debug!(
        net = net_weight_g,
        specified = specified_weight_g,
        deviation = deviation_percent,
        status = ?status,
        "tolerance_check"
    );

    Ok(ToleranceResult {
        net_weight_g,
        specified_weight_g,
        status,
        deviation_percent,
        lower_bound_g,
        upper_bound_g,
        difference_g,
        formula: format!(
            "({:.2} g - {:.2} g) ÷ {:.2} g × 100 = {:.2}%",
            net_weight_g, specified_weight_g, specified_weight_g, deviation_percent
        ),
    })
}

// =============================================================================
// Weight → Volume
// =============================================================================

/// A weight converted to litres through a density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NetVolumeResult {
    pub volume_l: f64,

    /// The input weight normalized to kilograms.
    pub weight_kg: f64,

    pub density_kg_per_l: f64,
    pub formula: String,
}

/// Converts a produced weight into litres of product.
///
/// The weight is normalized to kilograms first (grams ÷ 1000), then divided
/// by the density. Requires `density_kg_per_l > 0`.
pub fn net_volume_from_weight(
    weight: f64,
    unit: WeightUnit,
    density_kg_per_l: f64,
) -> CalcResult<NetVolumeResult> {
    validate_density("density_kg_per_l", density_kg_per_l)?;

    let weight_kg = unit.to_kilograms(weight);
    let volume_l = weight_kg / density_kg_per_l;

    Ok(NetVolumeResult {
        volume_l,
        weight_kg,
        density_kg_per_l,
        formula: format!(
            "{:.2} kg ÷ {} kg/L = {:.2} L",
            weight_kg, density_kg_per_l, volume_l
        ),
    })
}

// =============================================================================
// Density
// =============================================================================

/// A density measured from a mass and a volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DensityResult {
    pub density_g_per_ml: f64,
    pub mass_g: f64,
    pub volume_ml: f64,
    pub formula: String,
}

/// Computes a density in g/mL from a weighed mass and a measured volume.
/// Requires `volume_ml > 0`.
pub fn density(mass_g: f64, volume_ml: f64) -> CalcResult<DensityResult> {
    validate_volume_l("volume_ml", volume_ml)?;

    let density_g_per_ml = mass_g / volume_ml;

    Ok(DensityResult {
        density_g_per_ml,
        mass_g,
        volume_ml,
        formula: format!(
            "{:.2} g ÷ {:.2} mL = {:.3} g/mL",
            mass_g, volume_ml, density_g_per_ml
        ),
    })
}

// =============================================================================
// Average Tare
// =============================================================================

/// The mean empty-package weight over a sample run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AverageTareResult {
    pub average_tare_g: f64,
    pub sample_count: usize,
    pub formula: String,
}

/// Averages a run of empty-package weighings into the tare used by
/// [`net_weight`]. An empty sample run is a `Required` validation error.
pub fn average_tare(samples_g: &[f64]) -> CalcResult<AverageTareResult> {
    if samples_g.is_empty() {
        return Err(CalcError::Validation(ValidationError::Required {
            field: "tare_samples".to_string(),
        }));
    }

    let sum: f64 = samples_g.iter().sum();
    let average_tare_g = sum / samples_g.len() as f64;

    let rendered: Vec<String> = samples_g.iter().map(|s| format!("{:.2}", s)).collect();

    Ok(AverageTareResult {
        average_tare_g,
        sample_count: samples_g.len(),
        formula: format!(
            "({}) ÷ {} = {:.2} g",
            rendered.join(" + "),
            samples_g.len(),
            average_tare_g
        ),
    })
}

// =============================================================================
// Loss & Yield
// =============================================================================

/// Percentage of base lost between two stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BaseLossResult {
    pub loss_percent: f64,
    pub formula: String,
}

/// Computes the base loss between a starting and a finishing quantity (same
/// unit on both sides). Requires `initial_quantity > 0`.
///
/// A finishing quantity above the start yields a negative loss; the line
/// gained volume (water pickup), and the caller decides what to make of it.
pub fn base_loss(initial_quantity: f64, final_quantity: f64) -> CalcResult<BaseLossResult> {
    require_positive("initial_quantity", initial_quantity)?;

    let loss_percent = (initial_quantity - final_quantity) / initial_quantity * 100.0;

    Ok(BaseLossResult {
        loss_percent,
        formula: format!(
            "(({:.2} - {:.2}) ÷ {:.2}) × 100 = {:.2}%",
            initial_quantity, final_quantity, initial_quantity, loss_percent
        ),
    })
}

/// Percentage of input that made it to output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct YieldResult {
    pub yield_percent: f64,
    pub formula: String,
}

/// Computes a process yield percentage (same unit on both sides).
/// Requires `input_quantity > 0`.
pub fn process_yield(input_quantity: f64, output_quantity: f64) -> CalcResult<YieldResult> {
    require_positive("input_quantity", input_quantity)?;

    let yield_percent = output_quantity / input_quantity * 100.0;

    Ok(YieldResult {
        yield_percent,
        formula: format!(
            "({:.2} ÷ {:.2}) × 100 = {:.2}%",
            output_quantity, input_quantity, yield_percent
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
    fn test_net_weight() {
        let result = net_weight(219.0, 19.0);
        assert_eq!(result.weight_g, 200.0);
        assert_eq!(result.formula, "219.00 g - 19.00 g = 200.00 g");
    }

    #[test]
    fn test_net_weight_can_go_negative() {
        let result = net_weight(15.0, 19.0);
        assert_eq!(result.weight_g, -4.0);
    }

    #[test]
    fn test_gross_weight_round_trips_net_weight() {
        let net = net_weight(219.0, 19.0);
        let gross = gross_weight(net.weight_g, 19.0);
        assert_eq!(gross.weight_g, 219.0);

        let net = net_weight(197.4, 18.6);
        let gross = gross_weight(net.weight_g, 18.6);
        assert!((gross.weight_g - 197.4).abs() < 1e-9);
    }

    #[test]
    fn test_tolerance_partition_is_exhaustive_and_exclusive() {
        // 25% of 200 is exact in binary: bounds land on 150 and 250.
        let below = tolerance_check(149.0, 200.0, 25.0).unwrap();
        let on_lower = tolerance_check(150.0, 200.0, 25.0).unwrap();
        let inside = tolerance_check(200.0, 200.0, 25.0).unwrap();
        let on_upper = tolerance_check(250.0, 200.0, 25.0).unwrap();
        let above = tolerance_check(251.0, 200.0, 25.0).unwrap();

        assert_eq!(below.status, ToleranceStatus::Below);
        assert_eq!(on_lower.status, ToleranceStatus::Within);
        assert_eq!(inside.status, ToleranceStatus::Within);
        assert_eq!(on_upper.status, ToleranceStatus::Within);
        assert_eq!(above.status, ToleranceStatus::Above);

        assert_eq!(on_lower.lower_bound_g, 150.0);
        assert_eq!(on_upper.upper_bound_g, 250.0);
    }

    #[test]
    fn test_tolerance_default_band() {
        let result = tolerance_check(205.0, 200.0, 2.5).unwrap();
        assert_eq!(result.status, ToleranceStatus::Within);
        assert!((result.lower_bound_g - 195.0).abs() < 1e-9);
        assert!((result.upper_bound_g - 205.0).abs() < 1e-9);
        assert!((result.deviation_percent - 2.5).abs() < 1e-9);
        assert!((result.difference_g - 5.0).abs() < 1e-9);

        let under = tolerance_check(190.0, 200.0, 2.5).unwrap();
        assert_eq!(under.status, ToleranceStatus::Below);
        assert!((under.deviation_percent + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_tolerance_zero_specified_weight_is_rejected() {
        let err = tolerance_check(200.0, 0.0, 2.5).unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero { .. }));
        assert_eq!(
            err.to_string(),
            "Division by zero: specified_weight_g is zero"
        );
    }

    #[test]
    fn test_net_volume_from_weight() {
        let result = net_volume_from_weight(209.0, WeightUnit::Kilograms, 1.045).unwrap();
        assert!((result.volume_l - 200.0).abs() < 1e-9);
        assert_eq!(result.weight_kg, 209.0);

        let from_grams = net_volume_from_weight(209_000.0, WeightUnit::Grams, 1.045).unwrap();
        assert!((from_grams.volume_l - 200.0).abs() < 1e-9);
        assert_eq!(from_grams.weight_kg, 209.0);
        assert_eq!(from_grams.formula, "209.00 kg ÷ 1.045 kg/L = 200.00 L");
    }

    #[test]
    fn test_net_volume_rejects_zero_density() {
        let err = net_volume_from_weight(209.0, WeightUnit::Kilograms, 0.0).unwrap_err();
        assert!(matches!(err, CalcError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: density_kg_per_l must be positive"
        );
    }

    #[test]
    fn test_density() {
        let result = density(103.0, 100.0).unwrap();
        assert!((result.density_g_per_ml - 1.03).abs() < 1e-9);
        assert_eq!(result.formula, "103.00 g ÷ 100.00 mL = 1.030 g/mL");

        assert!(density(103.0, 0.0).is_err());
    }

    #[test]
    fn test_average_tare() {
        let result = average_tare(&[19.2, 18.8, 19.0]).unwrap();
        assert!((result.average_tare_g - 19.0).abs() < 1e-9);
        assert_eq!(result.sample_count, 3);
        assert_eq!(result.formula, "(19.20 + 18.80 + 19.00) ÷ 3 = 19.00 g");
    }

    #[test]
    fn test_average_tare_rejects_empty_run() {
        let err = average_tare(&[]).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: tare_samples is required");
    }

    #[test]
    fn test_base_loss() {
        let result = base_loss(1000.0, 950.0).unwrap();
        assert!((result.loss_percent - 5.0).abs() < 1e-9);

        // Water pickup: the line ended with more than it started with.
        let gain = base_loss(1000.0, 1020.0).unwrap();
        assert!((gain.loss_percent + 2.0).abs() < 1e-9);

        assert!(base_loss(0.0, 950.0).is_err());
    }

    #[test]
    fn test_process_yield() {
        let result = process_yield(1000.0, 950.0).unwrap();
        assert!((result.yield_percent - 95.0).abs() < 1e-9);
        assert_eq!(result.formula, "(950.00 ÷ 1000.00) × 100 = 95.00%");

        assert!(process_yield(0.0, 950.0).is_err());
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let first = tolerance_check(203.7, 200.0, 2.5).unwrap();
        let second = tolerance_check(203.7, 200.0, 2.5).unwrap();
        assert_eq!(first, second);

        let first = net_volume_from_weight(197.3, WeightUnit::Kilograms, 1.045).unwrap();
        let second = net_volume_from_weight(197.3, WeightUnit::Kilograms, 1.045).unwrap();
        assert_eq!(first, second);
    }
}
