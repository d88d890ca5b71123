//! # Engine Configuration
//!
//! Named constants the calculators consume, grouped by domain.
//!
//! ## Ownership
//! The engine never loads configuration itself (no env, no file, no
//! database). The caller builds one [`EngineConfig`] at startup, possibly
//! overriding fields from its own settings store, and passes it by shared
//! reference into each calculation.
//!
//! ## Thread Safety
//! The value is immutable after construction, so it can be shared freely
//! across threads without a mutex.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Formula engine configuration.
///
/// ## Fields
/// Every group ships factory defaults matching the values validated on the
/// production floor; construct with `EngineConfig::default()` and override
/// only what the plant's own spec sheet changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EngineConfig {
    /// Refractometer correction constants.
    pub brix: BrixSettings,

    /// Packaging-line weight constants.
    pub weight: WeightSettings,

    /// Fluid densities in kg/L.
    pub density: DensitySettings,

    /// Titration constants.
    pub acidity: AciditySettings,

    /// Brix/acidity ratio flavor bands.
    pub ratio: RatioSettings,

    /// Crystal/liquid sugar conversion factors.
    pub sugar: SugarSettings,

    /// Standard finished-product Brix targets.
    pub standard_brix: StandardBrixSettings,
}

/// Refractometer temperature and product-family correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BrixSettings {
    /// Temperature the refractometer scale is calibrated at, in °C.
    pub reference_temperature_c: f64,

    /// Brix drift per °C away from the reference temperature.
    pub slope_per_degree_c: f64,

    /// Correction factor for plain juice (no correction).
    pub standard_factor: f64,

    /// Correction factor for citrus bases.
    pub citrus_factor: f64,

    /// Correction factor for nectar bases.
    pub nectar_factor: f64,

    /// Correction factor for concentrates.
    pub concentrate_factor: f64,

    /// Acceptable instrument spread between repeated readings, in °Brix.
    /// Reference data for QC screens; no calculator consumes it.
    pub reading_tolerance: f64,
}

/// Packaging-line weight defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeightSettings {
    /// Average empty-package weight in grams.
    pub default_tare_g: f64,

    /// Net-weight tolerance band half-width, in percent.
    pub default_tolerance_percent: f64,

    /// Declared net content of the standard package, in grams.
    pub default_specified_weight_g: f64,
}

/// Typical product densities in kg/L.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DensitySettings {
    /// Fallback density when the batch sheet doesn't specify one.
    pub default_kg_per_l: f64,

    pub juice_kg_per_l: f64,
    pub nectar_kg_per_l: f64,
    pub soft_drink_kg_per_l: f64,
}

/// Titration constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AciditySettings {
    /// Citric acid milliequivalent factor, g/meq.
    pub citric_meq_factor: f64,

    /// Malic acid milliequivalent factor, g/meq.
    pub malic_meq_factor: f64,

    /// Tartaric acid milliequivalent factor, g/meq.
    pub tartaric_meq_factor: f64,

    /// Acceptable instrument spread between repeated readings, in % acid.
    /// Reference data for QC screens; no calculator consumes it.
    pub reading_tolerance: f64,
}

/// Band edges for [`RatioCategory`](crate::types::RatioCategory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RatioSettings {
    /// Ratios below this are classified acidic.
    pub acidic_below: f64,

    /// Ratios at or above this are classified sweet.
    pub sweet_from: f64,
}

/// Crystal/liquid sugar conversion factors.
///
/// The two factors are independent plant measurements, NOT reciprocals
/// (0.85 × 1.18 = 1.003). Converting back and forth does not return the
/// starting quantity; both directions are kept as measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SugarSettings {
    /// Litres of liquid sugar per kg of crystal sugar.
    pub crystal_to_liquid: f64,

    /// Kg of crystal sugar per litre of liquid sugar.
    pub liquid_to_crystal: f64,
}

/// Standard finished-product Brix targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StandardBrixSettings {
    pub juice: f64,
    pub nectar: f64,
    pub soft_drink: f64,
}

impl Default for EngineConfig {
    /// Returns the factory constant table.
    ///
    /// ## Default Values
    /// - Brix: reference 20.0 °C, slope 0.06 °Brix/°C, factors
    ///   standard 1.0 / citrus 0.98 / nectar 1.02 / concentrate 0.95
    /// - Weight: tare 19.0 g, tolerance ±2.5%, specified 200.0 g
    /// - Density: default 1.045, juice 1.045 / nectar 1.050 / soft drink 1.030
    /// - Acidity: citric 0.064 / malic 0.067 / tartaric 0.075
    /// - Ratio bands: acidic < 12, sweet ≥ 16
    /// - Sugar: crystal→liquid 0.85, liquid→crystal 1.18
    /// - Standard Brix: juice 11.2 / nectar 13.5 / soft drink 8.5
    fn default() -> Self {
        EngineConfig {
            brix: BrixSettings::default(),
            weight: WeightSettings::default(),
            density: DensitySettings::default(),
            acidity: AciditySettings::default(),
            ratio: RatioSettings::default(),
            sugar: SugarSettings::default(),
            standard_brix: StandardBrixSettings::default(),
        }
    }
}

impl Default for BrixSettings {
    fn default() -> Self {
        BrixSettings {
            reference_temperature_c: 20.0,
            slope_per_degree_c: 0.06,
            standard_factor: 1.0,
            citrus_factor: 0.98,
            nectar_factor: 1.02,
            concentrate_factor: 0.95,
            reading_tolerance: 0.2,
        }
    }
}

impl Default for WeightSettings {
    fn default() -> Self {
        WeightSettings {
            default_tare_g: 19.0,
            default_tolerance_percent: 2.5,
            default_specified_weight_g: 200.0,
        }
    }
}

impl Default for DensitySettings {
    fn default() -> Self {
        DensitySettings {
            default_kg_per_l: 1.045,
            juice_kg_per_l: 1.045,
            nectar_kg_per_l: 1.050,
            soft_drink_kg_per_l: 1.030,
        }
    }
}

impl Default for AciditySettings {
    fn default() -> Self {
        AciditySettings {
            citric_meq_factor: 0.064,
            malic_meq_factor: 0.067,
            tartaric_meq_factor: 0.075,
            reading_tolerance: 0.05,
        }
    }
}

impl Default for RatioSettings {
    fn default() -> Self {
        RatioSettings {
            acidic_below: 12.0,
            sweet_from: 16.0,
        }
    }
}

impl Default for SugarSettings {
    fn default() -> Self {
        SugarSettings {
            crystal_to_liquid: 0.85,
            liquid_to_crystal: 1.18,
        }
    }
}

impl Default for StandardBrixSettings {
    fn default() -> Self {
        StandardBrixSettings {
            juice: 11.2,
            nectar: 13.5,
            soft_drink: 8.5,
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
    fn test_default_constant_table() {
        let config = EngineConfig::default();
        assert_eq!(config.brix.reference_temperature_c, 20.0);
        assert!((config.brix.slope_per_degree_c - 0.06).abs() < 1e-9);
        assert_eq!(config.weight.default_tare_g, 19.0);
        assert!((config.weight.default_tolerance_percent - 2.5).abs() < 1e-9);
        assert!((config.density.default_kg_per_l - 1.045).abs() < 1e-9);
        assert!((config.acidity.citric_meq_factor - 0.064).abs() < 1e-9);
        assert!((config.sugar.crystal_to_liquid - 0.85).abs() < 1e-9);
        assert!((config.sugar.liquid_to_crystal - 1.18).abs() < 1e-9);
        assert!((config.standard_brix.nectar - 13.5).abs() < 1e-9);
    }

    #[test]
    fn test_partial_override_keeps_other_groups() {
        let config = EngineConfig {
            weight: WeightSettings {
                default_tare_g: 21.5,
                ..WeightSettings::default()
            },
            ..EngineConfig::default()
        };
        assert_eq!(config.weight.default_tare_g, 21.5);
        assert!((config.weight.default_tolerance_percent - 2.5).abs() < 1e-9);
        assert_eq!(config.brix, BrixSettings::default());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).expect("serializes");
        let back: EngineConfig = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, config);
    }
}
