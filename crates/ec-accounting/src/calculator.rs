//! Event emissions calculator.
//!
//! `attendance × baseline(event type)` is split across the six categories by
//! `tables::CATEGORY_SPLIT`, then structural adjustments are applied per
//! category. Translated line items attached to the profile are added last.

use ec_protocol::{
    CalculationResult, CategoryTotals, EventProfile, PowerSource, ScopeTotals,
};

use crate::benchmark;
use crate::error::AccountingResult;
use crate::tables;
use crate::validate::validate_profile;

/// Extra footprint per additional event day, as a fraction of day one.
pub const ADDITIONAL_DAY_FACTOR: f64 = 0.3;

/// Catering multiplier when food is locally sourced.
pub const LOCAL_CATERING_FACTOR: f64 = 0.85;

/// Waste multiplier when a recycling program is in place.
pub const RECYCLING_FACTOR: f64 = 0.6;

/// Renewable power relative to the grid formula.
pub const RENEWABLE_FACTOR: f64 = 0.1;

const GRID_ENERGY_FACTOR: f64 = 1.0;
const GENERATOR_ENERGY_FACTOR: f64 = 1.6;
const HYBRID_ENERGY_FACTOR: f64 = 1.3;

/// Validate and calculate. The only fallible step is validation.
pub fn calculate_event_emissions(profile: &EventProfile) -> AccountingResult<CalculationResult> {
    validate_profile(profile)?;
    let result = compute(profile);
    tracing::debug!(
        event_type = %profile.event_type,
        attendance = profile.attendance,
        total = result.total,
        tier = %result.benchmark.performance_tier,
        "event emissions calculated"
    );
    Ok(result)
}

/// Calculate an already validated profile.
fn compute(profile: &EventProfile) -> CalculationResult {
    let per_category = category_totals(profile);
    let total = per_category.sum();
    let attendance = f64::from(profile.attendance);
    let per_attendee = total / attendance;

    let tiered_emissions = benchmark::tiered_emissions(&per_category);
    let influence_score =
        benchmark::influence_score(profile.event_type, tiered_emissions.high / attendance);

    CalculationResult {
        total,
        per_category,
        per_attendee,
        scopes: scope_split(&per_category, profile.power.source),
        benchmark: benchmark::classify(profile.event_type, per_attendee),
        influence_score,
        tiered_emissions,
    }
}

/// `1 + 0.3 × (days − 1)`.
pub fn duration_multiplier(days: u32) -> f64 {
    1.0 + ADDITIONAL_DAY_FACTOR * (f64::from(days) - 1.0)
}

/// Energy multiplier for a power source. Renewable is a discount on the grid formula.
pub fn power_source_factor(source: PowerSource) -> f64 {
    match source {
        PowerSource::Grid => GRID_ENERGY_FACTOR,
        PowerSource::Generator => GENERATOR_ENERGY_FACTOR,
        PowerSource::Hybrid => HYBRID_ENERGY_FACTOR,
        PowerSource::Renewable => RENEWABLE_FACTOR * GRID_ENERGY_FACTOR,
    }
}

/// Category totals for a profile, in tCO2e.
pub fn category_totals(profile: &EventProfile) -> CategoryTotals {
    let base = f64::from(profile.attendance) * tables::baseline_per_attendee(profile.event_type);
    let duration = duration_multiplier(profile.duration.days);

    let mut totals = CategoryTotals::default();
    for (category, share) in tables::CATEGORY_SPLIT {
        *totals.get_mut(category) = base * share * duration;
    }

    totals.energy *= power_source_factor(profile.power.source);
    if profile.catering.locally_sourced {
        totals.catering *= LOCAL_CATERING_FACTOR;
    }
    if profile.waste.recycling_program {
        totals.waste *= RECYCLING_FACTOR;
    }

    // Zero-confidence items mean "no data", not "zero emissions".
    for item in profile.line_items.iter().filter(|i| i.confidence > 0.0) {
        *totals.get_mut(item.category.event_category()) += item.total_emissions;
    }

    totals
}

/// Map categories onto GHG scopes. On-site generation is scope 1,
/// purchased power and venue operations scope 2, everything else scope 3.
pub fn scope_split(totals: &CategoryTotals, source: PowerSource) -> ScopeTotals {
    let (energy_scope1, energy_scope2) = match source {
        PowerSource::Generator => (totals.energy, 0.0),
        PowerSource::Hybrid => (totals.energy / 2.0, totals.energy / 2.0),
        PowerSource::Grid | PowerSource::Renewable => (0.0, totals.energy),
    };

    ScopeTotals {
        scope1: energy_scope1,
        scope2: energy_scope2 + totals.venue,
        scope3: totals.transportation + totals.catering + totals.waste + totals.production,
    }
}
