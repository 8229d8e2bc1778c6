//! Event carbon accounting.
//!
//! Deterministic, side-effect-free computation over static tables:
//! - `catalog`: emission factors for materials, energy, transport, food, waste.
//! - `tables`: per-event-type baselines, benchmarks and the category split.
//! - `calculator`: `EventProfile` → `CalculationResult`.
//! - `benchmark`: performance tier, percentile and influence score.
//! - `advisor`: ranked reduction opportunities.
//! - `organization`: scope 1/2/3 totals for non-event organizations.

pub mod advisor;
pub mod benchmark;
pub mod calculator;
pub mod catalog;
pub mod error;
pub mod organization;
pub mod tables;
pub mod validate;

pub use advisor::{STRATEGY_TABLE_VERSION, build_strategy, generate_recommendations};
pub use calculator::calculate_event_emissions;
pub use catalog::{CATALOG_VERSION, FactorEntry};
pub use error::{AccountingError, AccountingResult};
pub use validate::{profile_from_json, validate_profile};
