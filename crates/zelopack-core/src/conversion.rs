//! # Sugar Conversions
//!
//! Crystal ↔ liquid sugar conversions against the plant's measured factors.
//!
//! The two factors are independent measurements (0.85 L/kg one way, 1.18
//! kg/L the other) and are NOT reciprocals: 0.85 × 1.18 = 1.003, so a
//! round trip gains about 0.3%. Production planning knows this; the engine
//! reproduces the sheet values instead of reconciling them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::EngineConfig;

// =============================================================================
// Crystal → Liquid
// =============================================================================

/// Crystal sugar expressed as liquid sugar volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrystalToLiquidResult {
    pub liquid_l: f64,
    pub formula: String,
}

/// Converts crystal sugar mass to liquid sugar volume:
/// `litres = kg × crystal_to_liquid`.
///
/// ## Example
/// ```rust
/// use zelopack_core::config::EngineConfig;
/// use zelopack_core::conversion::crystal_to_liquid_sugar;
///
/// let config = EngineConfig::default();
/// let result = crystal_to_liquid_sugar(10.0, &config);
/// assert_eq!(result.liquid_l, 8.5);
/// ```
pub fn crystal_to_liquid_sugar(crystal_kg: f64, config: &EngineConfig) -> CrystalToLiquidResult {
    let factor = config.sugar.crystal_to_liquid;
    let liquid_l = crystal_kg * factor;

    CrystalToLiquidResult {
        liquid_l,
        formula: format!("{:.2} kg × {} = {:.2} L", crystal_kg, factor, liquid_l),
    }
}

// =============================================================================
// Liquid → Crystal
// =============================================================================

/// Liquid sugar expressed as crystal sugar mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LiquidToCrystalResult {
    pub crystal_kg: f64,
    pub formula: String,
}

/// Converts liquid sugar volume to crystal sugar mass:
/// `kg = litres × liquid_to_crystal`.
pub fn liquid_to_crystal_sugar(liquid_l: f64, config: &EngineConfig) -> LiquidToCrystalResult {
    let factor = config.sugar.liquid_to_crystal;
    let crystal_kg = liquid_l * factor;

    LiquidToCrystalResult {
        crystal_kg,
        formula: format!("{:.2} L × {} = {:.2} kg", liquid_l, factor, crystal_kg),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SugarSettings;

    #[test]
    fn test_crystal_to_liquid() {
        let config = EngineConfig::default();
        let result = crystal_to_liquid_sugar(10.0, &config);
        assert_eq!(result.liquid_l, 8.5);
        assert_eq!(result.formula, "10.00 kg × 0.85 = 8.50 L");
    }

    #[test]
    fn test_liquid_to_crystal() {
        let config = EngineConfig::default();
        let result = liquid_to_crystal_sugar(8.5, &config);
        assert!((result.crystal_kg - 10.03).abs() < 1e-9);
        assert_eq!(result.formula, "8.50 L × 1.18 = 10.03 kg");
    }

    #[test]
    fn test_round_trip_gain_documented() {
        // 10 kg → 8.5 L → 10.03 kg. The factors are independent plant
        // measurements, so the round trip does NOT return to 10 kg.
        let config = EngineConfig::default();
        let liquid = crystal_to_liquid_sugar(10.0, &config);
        let back = liquid_to_crystal_sugar(liquid.liquid_l, &config);

        assert!((back.crystal_kg - 10.03).abs() < 1e-9);
        assert!((back.crystal_kg - 10.0).abs() > 0.029);
    }

    #[test]
    fn test_factors_come_from_config() {
        let config = EngineConfig {
            sugar: SugarSettings {
                crystal_to_liquid: 0.9,
                liquid_to_crystal: 1.1,
            },
            ..EngineConfig::default()
        };

        let liquid = crystal_to_liquid_sugar(10.0, &config);
        assert!((liquid.liquid_l - 9.0).abs() < 1e-9);

        let crystal = liquid_to_crystal_sugar(10.0, &config);
        assert!((crystal.crystal_kg - 11.0).abs() < 1e-9);
    }
}
