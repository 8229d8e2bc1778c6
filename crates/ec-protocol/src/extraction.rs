//! Records exchanged with natural-language extraction providers.
//!
//! Providers (rule-based, local model, cloud model) all return the same
//! `ExtractionRecord` shape so the translator and dialogue engine never
//! depend on which one answered.

use serde::{Deserialize, Serialize};

use crate::event::{AvScale, EventType, PowerSource, TravelMode};

/// One quantity/unit/item tuple pulled out of free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// The item as described ("backdrop", "diesel generators", "meals").
    pub item: String,
    /// Primary quantity (length, area, mass, volume, count, ...).
    #[serde(default)]
    pub quantity: f64,
    /// Unit of `quantity` as written ("ft", "sqm", "lbs", "gallons", "").
    #[serde(default)]
    pub unit: String,
    /// Material or fuel qualifier ("vinyl", "steel", "diesel", "chicken").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Number of units, when the quantity describes one unit ("3 trucks").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    /// Run time in hours (generators, screens).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    /// Travel distance (vehicles, flights).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_unit: Option<String>,
}

/// Partial event facts asserted by an utterance. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_per_day: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_outdoor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_source: Option<PowerSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub av_scale: Option<AvScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meals_served: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locally_sourced: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_method: Option<TravelMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trucks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_mode: Option<TravelMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recycling_program: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waste_measures: Vec<String>,
}

impl EventFacts {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Structured record returned by an extraction provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    #[serde(default)]
    pub facts: EventFacts,
    #[serde(default)]
    pub items: Vec<ExtractedItem>,
    /// Sustainable-choice phrases noticed in the text ("solar power").
    #[serde(default)]
    pub sustainable_choices: Vec<String>,
    /// Provider confidence in [0, 1].
    #[serde(default)]
    pub confidence: f64,
}

impl ExtractionRecord {
    /// True when the record asserts nothing usable.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty() && self.items.is_empty()
    }
}

/// What is already known about the event, passed to providers for
/// disambiguation ("200 people" means attendance when attendance is the
/// open question).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<u32>,
    /// Topic the last question asked about, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_topic: Option<String>,
}
