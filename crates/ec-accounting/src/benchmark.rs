//! Benchmark and influence classification.

use ec_protocol::{
    Benchmark, Category, CategoryTotals, EventType, InfluenceTier, PerformanceTier,
    TieredEmissions,
};
use serde::Serialize;

use crate::tables;

/// Compare a per-attendee footprint with the industry pair for its type.
pub fn classify(event_type: EventType, per_attendee: f64) -> Benchmark {
    let pair = tables::benchmark_pair(event_type);
    let performance_tier = if per_attendee <= pair.top_performers {
        PerformanceTier::Excellent
    } else if per_attendee <= 0.85 * pair.average {
        PerformanceTier::Good
    } else if per_attendee <= 1.15 * pair.average {
        PerformanceTier::Average
    } else if per_attendee <= 1.5 * pair.average {
        PerformanceTier::NeedsImprovement
    } else {
        PerformanceTier::Poor
    };

    Benchmark {
        industry_average: pair.average,
        top_performers: pair.top_performers,
        percentile: percentile(performance_tier),
        performance_tier,
        message: performance_tier.message().to_string(),
    }
}

/// Fixed percentile per tier; lower is better.
pub fn percentile(tier: PerformanceTier) -> u8 {
    match tier {
        PerformanceTier::Excellent => 15,
        PerformanceTier::Good => 35,
        PerformanceTier::Average => 50,
        PerformanceTier::NeedsImprovement => 75,
        PerformanceTier::Poor => 90,
    }
}

/// Controllability tier of each category.
pub fn influence_tier(category: Category) -> InfluenceTier {
    match category {
        Category::Energy | Category::Catering | Category::Waste | Category::Production => {
            InfluenceTier::High
        }
        Category::Venue => InfluenceTier::Medium,
        // Dominated by audience travel, which organizers can only nudge.
        Category::Transportation => InfluenceTier::Low,
    }
}

pub fn tiered_emissions(totals: &CategoryTotals) -> TieredEmissions {
    let mut tiered = TieredEmissions::default();
    for (category, value) in totals.iter() {
        match influence_tier(category) {
            InfluenceTier::High => tiered.high += value,
            InfluenceTier::Medium => tiered.medium += value,
            InfluenceTier::Low => tiered.low += value,
        }
    }
    tiered
}

/// `100 × (1 − deviation)` where deviation is how far the high-influence
/// footprint per attendee sits above best practice, relative to it.
pub fn influence_score(event_type: EventType, high_per_attendee: f64) -> f64 {
    let best = tables::high_influence_best_practice(event_type);
    let deviation = ((high_per_attendee - best) / best).max(0.0);
    (100.0 * (1.0 - deviation)).clamp(0.0, 100.0)
}

/// A short note about where the organizer can act.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluenceInsight {
    pub tier: InfluenceTier,
    pub message: String,
    pub actionable: bool,
}

/// Insights keyed on which tier dominates the footprint.
pub fn influence_insights(tiered: &TieredEmissions, score: f64) -> Vec<InfluenceInsight> {
    let total = tiered.high + tiered.medium + tiered.low;
    if total <= 0.0 {
        return Vec::new();
    }
    let mut insights = Vec::new();

    let high_share = tiered.high / total;
    if high_share >= 0.4 {
        insights.push(InfluenceInsight {
            tier: InfluenceTier::High,
            message: format!(
                "{:.0}% of emissions sit in energy, catering, waste and production, which you control directly.",
                high_share * 100.0
            ),
            actionable: true,
        });
    }
    if score < 50.0 {
        insights.push(InfluenceInsight {
            tier: InfluenceTier::High,
            message: "Controllable emissions are well above best practice. Start with the quick wins."
                .into(),
            actionable: true,
        });
    }
    if tiered.medium / total >= 0.15 {
        insights.push(InfluenceInsight {
            tier: InfluenceTier::Medium,
            message: "Venue choice matters: certified green venues run 30-50% lower.".into(),
            actionable: true,
        });
    }
    let low_share = tiered.low / total;
    if low_share >= 0.3 {
        insights.push(InfluenceInsight {
            tier: InfluenceTier::Low,
            message: format!(
                "Audience travel is {:.0}% of the footprint. Transit partnerships and shuttles can shift it.",
                low_share * 100.0
            ),
            actionable: false,
        });
    }
    insights
}
