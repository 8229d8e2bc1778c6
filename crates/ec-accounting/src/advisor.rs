//! Reduction advisor.
//!
//! Every strategy lives in `STRATEGY_TABLE` with a hand-authored savings
//! fraction and the configuration condition under which it applies.
//! Recalibrating a percentage is a table edit plus a version bump.

use std::collections::BTreeMap;

use ec_protocol::{
    CalculationResult, Category, Cost, Difficulty, EventProfile, PowerSource,
    ReductionOpportunity, ReductionStrategy, Timeframe, TravelMode,
};

/// Version of the savings table below.
pub const STRATEGY_TABLE_VERSION: &str = "2025.1";

/// Minimum savings percentage for an easy strategy to count as a quick win.
const QUICK_WIN_MIN_PERCENTAGE: f64 = 10.0;

/// How many quick wins and biggest-impact items to surface.
const HIGHLIGHT_COUNT: usize = 3;

/// When a strategy applies to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    PowerIs(PowerSource),
    PowerIsNot(PowerSource),
    CateringNotLocal,
    NoRecyclingProgram,
    MissingMeasure(&'static str),
    HasCrew,
    HasTrucks,
    CrewFlies,
    HasProduction,
    IndoorVenue,
    OutdoorWithoutPower,
}

impl Condition {
    pub fn holds(&self, profile: &EventProfile) -> bool {
        match self {
            Self::Always => true,
            Self::PowerIs(source) => profile.power.source == *source,
            Self::PowerIsNot(source) => profile.power.source != *source,
            Self::CateringNotLocal => !profile.catering.locally_sourced,
            Self::NoRecyclingProgram => !profile.waste.recycling_program,
            Self::MissingMeasure(measure) => !profile.waste.has_measure(measure),
            Self::HasCrew => profile.staffing.crew > 0,
            Self::HasTrucks => profile.transportation.equipment.trucks > 0,
            Self::CrewFlies => profile.transportation.crew.method == Some(TravelMode::Flight),
            Self::HasProduction => {
                profile.production.stages > 0 || profile.production.av_scale.is_some()
            }
            Self::IndoorVenue => !profile.venue.is_outdoor,
            Self::OutdoorWithoutPower => {
                profile.venue.is_outdoor && !profile.venue.has_existing_power
            }
        }
    }
}

/// One row of the strategy table.
#[derive(Debug, Clone, Copy)]
pub struct StrategySpec {
    pub id: &'static str,
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    /// Fraction of the category's emissions this strategy avoids.
    pub savings_fraction: f64,
    pub difficulty: Difficulty,
    pub cost: Cost,
    pub timeframe: Timeframe,
    pub steps: &'static [&'static str],
    pub condition: Condition,
}

pub const STRATEGY_TABLE: &[StrategySpec] = &[
    // ===== Energy =====
    StrategySpec {
        id: "switch_to_grid",
        category: Category::Energy,
        title: "Switch from generators to grid power",
        description: "Connect to venue or temporary grid supply instead of running diesel generators.",
        savings_fraction: 0.40,
        difficulty: Difficulty::Moderate,
        cost: Cost::Medium,
        timeframe: Timeframe::ShortTerm,
        steps: &[
            "Ask the venue about available grid capacity",
            "Book a temporary grid connection with the local utility",
            "Size generator backup for critical loads only",
        ],
        condition: Condition::PowerIs(PowerSource::Generator),
    },
    StrategySpec {
        id: "renewable_energy",
        category: Category::Energy,
        title: "Use renewable power",
        description: "Source solar, battery or certified renewable electricity for the event.",
        savings_fraction: 0.80,
        difficulty: Difficulty::Challenging,
        cost: Cost::High,
        timeframe: Timeframe::LongTerm,
        steps: &[
            "Request a renewable tariff or certificates from the venue supplier",
            "Get quotes for solar and battery hire",
            "Plan load schedules around battery capacity",
        ],
        condition: Condition::PowerIsNot(PowerSource::Renewable),
    },
    StrategySpec {
        id: "led_lighting",
        category: Category::Energy,
        title: "Switch stage and site lighting to LED",
        description: "LED fixtures draw a fraction of the power of conventional stage lighting.",
        savings_fraction: 0.10,
        difficulty: Difficulty::Easy,
        cost: Cost::Low,
        timeframe: Timeframe::Immediate,
        steps: &[
            "Specify LED fixtures in the lighting rider",
            "Replace remaining tungsten and discharge lamps",
        ],
        condition: Condition::HasProduction,
    },
    // ===== Transportation =====
    StrategySpec {
        id: "public_transit",
        category: Category::Transportation,
        title: "Partner with public transit",
        description: "Bundle transit passes with tickets and run shuttles from transit hubs.",
        savings_fraction: 0.125,
        difficulty: Difficulty::Moderate,
        cost: Cost::Medium,
        timeframe: Timeframe::ShortTerm,
        steps: &[
            "Negotiate combined ticket and transit pass pricing",
            "Run shuttles from the nearest rail or bus hub",
            "Publish transit directions before parking information",
        ],
        condition: Condition::Always,
    },
    StrategySpec {
        id: "crew_carpooling",
        category: Category::Transportation,
        title: "Share crew transport",
        description: "Move crew in shared vans instead of individual cars.",
        savings_fraction: 0.06,
        difficulty: Difficulty::Easy,
        cost: Cost::Free,
        timeframe: Timeframe::Immediate,
        steps: &[
            "Publish a crew ride-share board",
            "Book crew accommodation close to the venue",
        ],
        condition: Condition::HasCrew,
    },
    StrategySpec {
        id: "freight_consolidation",
        category: Category::Transportation,
        title: "Consolidate equipment freight",
        description: "Fill trucks fully and source heavy equipment closer to the venue.",
        savings_fraction: 0.06,
        difficulty: Difficulty::Moderate,
        cost: Cost::Low,
        timeframe: Timeframe::ShortTerm,
        steps: &[
            "Share trucks between vendors",
            "Hire staging and power locally where possible",
        ],
        condition: Condition::HasTrucks,
    },
    StrategySpec {
        id: "rail_over_flights",
        category: Category::Transportation,
        title: "Move crew by rail instead of air",
        description: "Rail produces a small fraction of flight emissions per passenger kilometre.",
        savings_fraction: 0.175,
        difficulty: Difficulty::Moderate,
        cost: Cost::Low,
        timeframe: Timeframe::ShortTerm,
        steps: &[
            "Set a travel policy preferring rail under six hours",
            "Book rail tickets early for group fares",
        ],
        condition: Condition::CrewFlies,
    },
    // ===== Catering =====
    StrategySpec {
        id: "local_sourcing",
        category: Category::Catering,
        title: "Source food locally",
        description: "Buy from producers within a short distance of the venue.",
        savings_fraction: 0.15,
        difficulty: Difficulty::Easy,
        cost: Cost::Free,
        timeframe: Timeframe::Immediate,
        steps: &[
            "Ask caterers for a local sourcing menu",
            "Feature seasonal produce",
        ],
        condition: Condition::CateringNotLocal,
    },
    StrategySpec {
        id: "plant_forward_menu",
        category: Category::Catering,
        title: "Make the menu plant-forward",
        description: "Default to vegetarian and vegan dishes, with meat as an option.",
        savings_fraction: 0.40,
        difficulty: Difficulty::Easy,
        cost: Cost::Free,
        timeframe: Timeframe::Immediate,
        steps: &[
            "Make plant-based dishes the default choice",
            "Drop beef from the menu",
        ],
        condition: Condition::Always,
    },
    StrategySpec {
        id: "reusable_serviceware",
        category: Category::Catering,
        title: "Use reusable serviceware",
        description: "Replace single-use plates, cups and cutlery.",
        savings_fraction: 0.08,
        difficulty: Difficulty::Easy,
        cost: Cost::Low,
        timeframe: Timeframe::Immediate,
        steps: &[
            "Hire washable serviceware",
            "Run a deposit scheme for cups",
        ],
        condition: Condition::MissingMeasure("reusable_serviceware"),
    },
    // ===== Waste =====
    StrategySpec {
        id: "recycling_program",
        category: Category::Waste,
        title: "Run a recycling program",
        description: "Provide sorted recycling stations across the site.",
        savings_fraction: 0.40,
        difficulty: Difficulty::Easy,
        cost: Cost::Low,
        timeframe: Timeframe::Immediate,
        steps: &[
            "Place paired recycling and landfill bins",
            "Brief volunteers to staff the stations",
        ],
        condition: Condition::NoRecyclingProgram,
    },
    StrategySpec {
        id: "composting",
        category: Category::Waste,
        title: "Compost food waste",
        description: "Divert food scraps and compostable packaging from landfill.",
        savings_fraction: 0.50,
        difficulty: Difficulty::Moderate,
        cost: Cost::Medium,
        timeframe: Timeframe::ShortTerm,
        steps: &[
            "Contract a commercial composting hauler",
            "Require compostable packaging from vendors",
        ],
        condition: Condition::MissingMeasure("composting"),
    },
    StrategySpec {
        id: "reusable_materials",
        category: Category::Waste,
        title: "Design signage and decor for reuse",
        description: "Use undated, modular materials that can be stored and reused.",
        savings_fraction: 0.18,
        difficulty: Difficulty::Moderate,
        cost: Cost::Medium,
        timeframe: Timeframe::LongTerm,
        steps: &[
            "Remove dates from signage",
            "Set up storage for reusable decor",
        ],
        condition: Condition::MissingMeasure("reusable_materials"),
    },
    // ===== Production =====
    StrategySpec {
        id: "rent_staging",
        category: Category::Production,
        title: "Rent staging instead of building it",
        description: "Hired modular staging avoids one-off construction materials.",
        savings_fraction: 0.60,
        difficulty: Difficulty::Easy,
        cost: Cost::Free,
        timeframe: Timeframe::Immediate,
        steps: &[
            "Get quotes from staging hire companies",
            "Design sets around modular components",
        ],
        condition: Condition::Always,
    },
    StrategySpec {
        id: "lower_carbon_materials",
        category: Category::Production,
        title: "Choose lower-carbon materials",
        description: "Prefer fabric over vinyl and steel over aluminium where practical.",
        savings_fraction: 0.30,
        difficulty: Difficulty::Moderate,
        cost: Cost::Low,
        timeframe: Timeframe::ShortTerm,
        steps: &[
            "Specify fabric banners in print orders",
            "Ask suppliers for material EPDs",
        ],
        condition: Condition::Always,
    },
    // ===== Venue =====
    StrategySpec {
        id: "hvac_optimization",
        category: Category::Venue,
        title: "Tune venue heating and cooling",
        description: "Widen temperature set points and schedule HVAC to occupancy.",
        savings_fraction: 0.10,
        difficulty: Difficulty::Easy,
        cost: Cost::Free,
        timeframe: Timeframe::Immediate,
        steps: &[
            "Agree set points with venue facilities",
            "Switch off HVAC in unused halls",
        ],
        condition: Condition::IndoorVenue,
    },
    StrategySpec {
        id: "green_certified_venue",
        category: Category::Venue,
        title: "Book a certified green venue",
        description: "LEED or equivalent certified venues typically run 30-50% lower.",
        savings_fraction: 0.30,
        difficulty: Difficulty::Challenging,
        cost: Cost::Medium,
        timeframe: Timeframe::LongTerm,
        steps: &[
            "Add certification to venue selection criteria",
            "Request venue energy data during selection",
        ],
        condition: Condition::Always,
    },
    StrategySpec {
        id: "existing_power_infrastructure",
        category: Category::Venue,
        title: "Pick an outdoor site with existing power",
        description: "Sites with permanent hookups avoid temporary infrastructure.",
        savings_fraction: 0.20,
        difficulty: Difficulty::Moderate,
        cost: Cost::Medium,
        timeframe: Timeframe::ShortTerm,
        steps: &[
            "Shortlist sites with permanent power distribution",
            "Survey existing hookups before site design",
        ],
        condition: Condition::OutdoorWithoutPower,
    },
];

/// Ranked opportunities for a calculation. Never fails; an empty result
/// yields an empty list.
pub fn generate_recommendations(
    result: &CalculationResult,
    profile: &EventProfile,
) -> Vec<ReductionOpportunity> {
    let mut opportunities: Vec<ReductionOpportunity> = STRATEGY_TABLE
        .iter()
        .filter_map(|spec| {
            let current = result.per_category.get(spec.category);
            if current <= 0.0 || !spec.condition.holds(profile) {
                return None;
            }
            let potential_savings = current * spec.savings_fraction;
            Some(ReductionOpportunity {
                category: spec.category,
                title: spec.title.to_string(),
                description: spec.description.to_string(),
                current_emissions: current,
                potential_savings,
                savings_percentage: spec.savings_fraction * 100.0,
                difficulty: spec.difficulty,
                cost: spec.cost,
                timeframe: spec.timeframe,
                implementation_steps: spec.steps.iter().map(|s| s.to_string()).collect(),
                priority: potential_savings * spec.difficulty.weight(),
            })
        })
        .collect();

    opportunities.sort_by(|a, b| {
        b.priority
            .total_cmp(&a.priority)
            .then_with(|| a.title.cmp(&b.title))
    });
    opportunities
}

/// Opportunities plus quick wins, biggest impact and the total.
pub fn build_strategy(result: &CalculationResult, profile: &EventProfile) -> ReductionStrategy {
    let opportunities = generate_recommendations(result, profile);

    let quick_wins = opportunities
        .iter()
        .filter(|o| {
            o.difficulty == Difficulty::Easy && o.savings_percentage >= QUICK_WIN_MIN_PERCENTAGE
        })
        .take(HIGHLIGHT_COUNT)
        .cloned()
        .collect();

    let mut by_impact = opportunities.clone();
    by_impact.sort_by(|a, b| {
        b.potential_savings
            .total_cmp(&a.potential_savings)
            .then_with(|| a.title.cmp(&b.title))
    });
    by_impact.truncate(HIGHLIGHT_COUNT);

    // Strategies in one category overlap; savings can't exceed the category.
    let mut per_category: BTreeMap<Category, f64> = BTreeMap::new();
    for o in &opportunities {
        *per_category.entry(o.category).or_default() += o.potential_savings;
    }
    let total_potential_savings = per_category
        .into_iter()
        .map(|(category, savings)| savings.min(result.per_category.get(category)))
        .sum();

    ReductionStrategy {
        opportunities,
        total_potential_savings,
        quick_wins,
        biggest_impact: by_impact,
        table_version: STRATEGY_TABLE_VERSION.to_string(),
    }
}
