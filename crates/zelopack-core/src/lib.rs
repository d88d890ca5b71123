//! # zelopack-core: Pure Formula Engine for Zelopack
//!
//! This crate is the **heart** of the Zelopack lab/production suite. It
//! contains every shop-floor and bench formula as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Zelopack Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (browser UI)                        │   │
//! │  │   Calculator forms ──► autofill ──► result cards ──► reports   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (ts-rs generated bindings)        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Application Shell                            │   │
//! │  │   gathers inputs, runs validation, invokes ONE calculator       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ zelopack-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  weight   │  │   brix    │  │  acidity  │  │conversion │  │   │
//! │  │   │ net/gross │  │correction │  │ titration │  │  crystal  │  │   │
//! │  │   │ tolerance │  │ dilution  │  │  dosing   │  │ ↔ liquid  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │  config   │  │   types   │  │ validation│                 │   │
//! │  │   │ constants │  │Feasibility│  │   rules   │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`weight`] - Net/gross weight, tolerance band, weight→volume, line checks
//! - [`brix`] - Refractometer correction, dilution/concentration, blending
//! - [`acidity`] - Titration, soda/acid/water dosing, ratio grading
//! - [`conversion`] - Crystal ↔ liquid sugar factors
//! - [`config`] - The injected constant table ([`EngineConfig`])
//! - [`types`] - Shared vocabulary ([`Feasibility`], statuses, units)
//! - [`error`] - Typed errors and infeasibility reasons
//! - [`validation`] - The per-field constraint table
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every calculator is deterministic - same input =
//!    same output, no state between calls
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Injected Configuration**: Constants travel in one immutable
//!    [`EngineConfig`] value, never in globals
//! 4. **Explicit Outcomes**: Zero divisors are typed errors, unreachable
//!    targets are [`Feasibility::Infeasible`] values - never NaN, never a
//!    panic
//!
//! ## Example Usage
//!
//! ```rust
//! use zelopack_core::brix::{dilution_to_lower_brix, temperature_correction};
//! use zelopack_core::config::EngineConfig;
//! use zelopack_core::types::ProductType;
//!
//! let config = EngineConfig::default();
//!
//! // A reading of 11.5 °Bx taken at 25 °C is really 11.2 °Bx
//! let reading = temperature_correction(11.5, 25.0, ProductType::Standard, &config);
//! assert!((reading.final_brix - 11.2).abs() < 1e-9);
//!
//! // Bringing 100 L of 20 °Bx base down to 10 °Bx takes 100 L of water
//! let outcome = dilution_to_lower_brix(20.0, 10.0, 100.0).unwrap();
//! let plan = outcome.as_feasible().unwrap();
//! assert_eq!(plan.water_to_add_l, 100.0);
//! assert_eq!(plan.final_volume_l, 200.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod acidity;
pub mod brix;
pub mod config;
pub mod conversion;
pub mod error;
pub mod types;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use zelopack_core::EngineConfig` instead of
// `use zelopack_core::config::EngineConfig`

pub use config::EngineConfig;
pub use error::{CalcError, CalcResult, Infeasibility, ValidationError};
pub use types::*;
