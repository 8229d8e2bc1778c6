//! Per-event-type reference tables.
//!
//! All values are tCO2e per attendee for a single-day event.

use ec_protocol::{Category, EventType};

/// Share of the baseline footprint assigned to each category. Sums to 1.
pub const CATEGORY_SPLIT: [(Category, f64); 6] = [
    (Category::Venue, 0.20),
    (Category::Transportation, 0.35),
    (Category::Energy, 0.20),
    (Category::Catering, 0.15),
    (Category::Waste, 0.05),
    (Category::Production, 0.05),
];

/// Baseline footprint per attendee before any adjustment.
pub fn baseline_per_attendee(event_type: EventType) -> f64 {
    match event_type {
        EventType::Concert => 0.012,
        EventType::Festival => 0.025,
        EventType::Conference => 0.008,
        EventType::SportsEvent => 0.015,
        EventType::Theater => 0.006,
        EventType::Wedding => 0.005,
        EventType::CorporateEvent => 0.007,
        EventType::TradeShow => 0.010,
        EventType::CommunityEvent => 0.004,
        EventType::OutdoorEvent => 0.014,
        EventType::Other => 0.010,
    }
}

/// Industry reference point for one event type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkPair {
    pub average: f64,
    pub top_performers: f64,
}

pub fn benchmark_pair(event_type: EventType) -> BenchmarkPair {
    let (average, top_performers) = match event_type {
        EventType::Concert => (0.012, 0.008),
        EventType::Festival => (0.025, 0.015),
        EventType::Conference => (0.008, 0.005),
        EventType::SportsEvent => (0.015, 0.010),
        EventType::Theater => (0.006, 0.004),
        EventType::Wedding => (0.005, 0.003),
        EventType::CorporateEvent => (0.007, 0.004),
        EventType::TradeShow => (0.010, 0.006),
        EventType::CommunityEvent => (0.004, 0.0025),
        EventType::OutdoorEvent => (0.014, 0.009),
        EventType::Other => (0.010, 0.006),
    };
    BenchmarkPair {
        average,
        top_performers,
    }
}

/// Best-practice footprint of the organizer-controlled (high influence)
/// categories, per attendee.
pub fn high_influence_best_practice(event_type: EventType) -> f64 {
    match event_type {
        EventType::Concert => 0.005,
        EventType::Festival => 0.008,
        EventType::Conference => 0.004,
        EventType::SportsEvent => 0.006,
        EventType::Theater => 0.003,
        EventType::Wedding => 0.002,
        EventType::CorporateEvent => 0.003,
        EventType::TradeShow => 0.005,
        EventType::CommunityEvent => 0.002,
        EventType::OutdoorEvent => 0.007,
        EventType::Other => 0.005,
    }
}
