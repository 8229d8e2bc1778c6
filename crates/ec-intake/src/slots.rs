//! Partial event profile built up across a conversation.
//!
//! Each field is an optional `Slot` carrying the value, the confidence it
//! was extracted with, and whether the user stated it or it was filled in
//! as a default. Merges never downgrade: a new value replaces an existing
//! one only when its confidence is at least as high.

use std::str::FromStr;

use ec_protocol::{
    AvScale, EventFacts, EventType, ExtractionContext, LineItemEmission, PowerSource, TravelMode,
};
use serde::{Deserialize, Serialize};

use crate::error::IntakeError;

/// Confidence attached to values filled in by `with_defaults`.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    UserStated,
    InferredDefault,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot<T> {
    pub value: T,
    pub confidence: f64,
    pub provenance: Provenance,
}

impl<T> Slot<T> {
    fn inferred(value: T) -> Self {
        Self {
            value,
            confidence: DEFAULT_CONFIDENCE,
            provenance: Provenance::InferredDefault,
        }
    }
}

// ── Topics ──────────────────────────────────────────────────────

/// A dialogue topic. Each one groups the slots a single question fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    EventType,
    Attendance,
    Venue,
    Duration,
    Power,
    Staging,
    AudioVisual,
    Catering,
    CrewTravel,
    EquipmentShipping,
    AudienceTravel,
    Waste,
}

impl Topic {
    /// Fixed question order.
    pub const ORDER: [Topic; 12] = [
        Topic::EventType,
        Topic::Attendance,
        Topic::Venue,
        Topic::Duration,
        Topic::Power,
        Topic::Staging,
        Topic::AudioVisual,
        Topic::Catering,
        Topic::CrewTravel,
        Topic::EquipmentShipping,
        Topic::AudienceTravel,
        Topic::Waste,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventType => "event_type",
            Self::Attendance => "attendance",
            Self::Venue => "venue",
            Self::Duration => "duration",
            Self::Power => "power",
            Self::Staging => "staging",
            Self::AudioVisual => "audio_visual",
            Self::Catering => "catering",
            Self::CrewTravel => "crew_travel",
            Self::EquipmentShipping => "equipment_shipping",
            Self::AudienceTravel => "audience_travel",
            Self::Waste => "waste",
        }
    }

    /// Whether this topic is asked about for the given event type. Before
    /// the type is known only the unconditional topics apply.
    pub fn applies_to(&self, event_type: Option<EventType>) -> bool {
        use EventType::*;
        match self {
            Self::Staging => matches!(event_type, Some(Concert | Festival | Theater)),
            Self::AudioVisual => matches!(event_type, Some(Concert | Festival)),
            Self::Catering => matches!(event_type, Some(Festival | Conference | CorporateEvent)),
            _ => true,
        }
    }

    /// Profile field a missing answer to this topic is reported against.
    pub fn field_path(&self) -> &'static str {
        match self {
            Self::EventType => "event_type",
            Self::Attendance => "attendance",
            Self::Venue => "venue.venue_type",
            Self::Duration => "duration.days",
            Self::Power => "power.source",
            Self::Staging => "production.stages",
            Self::AudioVisual => "production.av_scale",
            Self::Catering => "catering.meals_served",
            Self::CrewTravel => "transportation.crew",
            Self::EquipmentShipping => "transportation.equipment",
            Self::AudienceTravel => "transportation.audience",
            Self::Waste => "waste.recycling_program",
        }
    }

    /// Weight of this topic in the overall confidence score.
    fn weight(&self) -> u32 {
        match self {
            Self::EventType | Self::Attendance => 15,
            Self::Duration | Self::Venue | Self::Power | Self::Catering => 10,
            Self::Staging | Self::AudioVisual | Self::Waste => 5,
            // The three travel topics share one weight.
            Self::CrewTravel | Self::EquipmentShipping | Self::AudienceTravel => 0,
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Topic::ORDER
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| IntakeError::UnknownTopic(s.to_string()))
    }
}

/// Weight shared by the travel topics.
const TRANSPORTATION_WEIGHT: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    VeryLow,
}

impl ConfidenceLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => Self::High,
            50..=79 => Self::Medium,
            30..=49 => Self::Low,
            _ => Self::VeryLow,
        }
    }
}

// ── Slot set ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSlotSet {
    pub event_type: Option<Slot<EventType>>,
    pub attendance: Option<Slot<u32>>,
    pub days: Option<Slot<u32>>,
    pub hours_per_day: Option<Slot<f64>>,
    pub venue_type: Option<Slot<String>>,
    pub is_outdoor: Option<Slot<bool>>,
    pub power_source: Option<Slot<PowerSource>>,
    pub stages: Option<Slot<u32>>,
    pub av_scale: Option<Slot<AvScale>>,
    pub meals_served: Option<Slot<u32>>,
    pub locally_sourced: Option<Slot<bool>>,
    pub crew_size: Option<Slot<u32>>,
    pub crew_method: Option<Slot<TravelMode>>,
    pub crew_distance_km: Option<Slot<f64>>,
    pub trucks: Option<Slot<u32>>,
    pub equipment_distance_km: Option<Slot<f64>>,
    pub audience_distance_km: Option<Slot<f64>>,
    pub audience_mode: Option<Slot<TravelMode>>,
    pub recycling_program: Option<Slot<bool>>,
    #[serde(default)]
    pub waste_measures: Vec<String>,
    #[serde(default)]
    pub line_items: Vec<LineItemEmission>,
}

/// Store `value` unless the slot already holds a more confident one.
fn merge_slot<T>(
    slot: &mut Option<Slot<T>>,
    value: Option<T>,
    confidence: f64,
    provenance: Provenance,
) -> bool {
    let Some(value) = value else {
        return false;
    };
    if confidence <= 0.0 {
        return false;
    }
    if slot.as_ref().is_some_and(|s| s.confidence > confidence) {
        return false;
    }
    *slot = Some(Slot {
        value,
        confidence: confidence.min(1.0),
        provenance,
    });
    true
}

fn non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

fn fill<T>(slot: &mut Option<Slot<T>>, value: T) {
    if slot.is_none() {
        *slot = Some(Slot::inferred(value));
    }
}

impl ExtractedSlotSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge extracted facts. Returns the number of slots that changed.
    pub fn merge(&mut self, facts: &EventFacts, confidence: f64, provenance: Provenance) -> usize {
        let c = confidence;
        let p = provenance;
        let changed = [
            merge_slot(&mut self.event_type, facts.event_type, c, p),
            merge_slot(&mut self.attendance, facts.attendance.filter(|a| *a > 0), c, p),
            merge_slot(&mut self.days, facts.days.filter(|d| *d > 0), c, p),
            merge_slot(
                &mut self.hours_per_day,
                facts.hours_per_day.filter(|h| *h > 0.0 && *h <= 24.0),
                c,
                p,
            ),
            merge_slot(&mut self.venue_type, facts.venue_type.clone(), c, p),
            merge_slot(&mut self.is_outdoor, facts.is_outdoor, c, p),
            merge_slot(&mut self.power_source, facts.power_source, c, p),
            merge_slot(&mut self.stages, facts.stages, c, p),
            merge_slot(&mut self.av_scale, facts.av_scale, c, p),
            merge_slot(&mut self.meals_served, facts.meals_served, c, p),
            merge_slot(&mut self.locally_sourced, facts.locally_sourced, c, p),
            merge_slot(&mut self.crew_size, facts.crew_size, c, p),
            merge_slot(&mut self.crew_method, facts.crew_method, c, p),
            merge_slot(&mut self.crew_distance_km, non_negative(facts.crew_distance_km), c, p),
            merge_slot(&mut self.trucks, facts.trucks, c, p),
            merge_slot(&mut self.equipment_distance_km, non_negative(facts.equipment_distance_km), c, p),
            merge_slot(&mut self.audience_distance_km, non_negative(facts.audience_distance_km), c, p),
            merge_slot(&mut self.audience_mode, facts.audience_mode, c, p),
            merge_slot(&mut self.recycling_program, facts.recycling_program, c, p),
        ];
        let mut count = changed.iter().filter(|c| **c).count();

        if confidence > 0.0 {
            for measure in &facts.waste_measures {
                if !self.waste_measures.iter().any(|m| m.eq_ignore_ascii_case(measure)) {
                    self.waste_measures.push(measure.clone());
                    count += 1;
                }
            }
        }
        count
    }

    /// Attach translated free-text items. Zero-confidence items are dropped.
    pub fn attach_line_items(&mut self, items: impl IntoIterator<Item = LineItemEmission>) {
        self.line_items
            .extend(items.into_iter().filter(|i| i.confidence > 0.0));
    }

    pub fn event_type(&self) -> Option<EventType> {
        self.event_type.as_ref().map(|s| s.value)
    }

    pub fn is_populated(&self, topic: Topic) -> bool {
        match topic {
            Topic::EventType => self.event_type.is_some(),
            Topic::Attendance => self.attendance.is_some(),
            Topic::Venue => self.venue_type.is_some() || self.is_outdoor.is_some(),
            Topic::Duration => self.days.is_some(),
            Topic::Power => self.power_source.is_some(),
            Topic::Staging => self.stages.is_some(),
            Topic::AudioVisual => self.av_scale.is_some(),
            Topic::Catering => self.meals_served.is_some() || self.locally_sourced.is_some(),
            Topic::CrewTravel => {
                self.crew_size.is_some()
                    || self.crew_method.is_some()
                    || self.crew_distance_km.is_some()
            }
            Topic::EquipmentShipping => {
                self.trucks.is_some() || self.equipment_distance_km.is_some()
            }
            Topic::AudienceTravel => {
                self.audience_distance_km.is_some() || self.audience_mode.is_some()
            }
            Topic::Waste => self.recycling_program.is_some() || !self.waste_measures.is_empty(),
        }
    }

    /// Topics that apply to the current event type, in question order.
    pub fn applicable_topics(&self) -> Vec<Topic> {
        let event_type = self.event_type();
        Topic::ORDER
            .into_iter()
            .filter(|t| t.applies_to(event_type))
            .collect()
    }

    /// Share of applicable topics that are populated, 0–100.
    pub fn completion_percentage(&self) -> u8 {
        let topics = self.applicable_topics();
        let populated = topics.iter().filter(|t| self.is_populated(**t)).count();
        ((populated as f64 / topics.len() as f64) * 100.0).round() as u8
    }

    /// Weighted score of populated topics, 0–100.
    pub fn confidence_score(&self) -> u32 {
        let travel = [Topic::CrewTravel, Topic::EquipmentShipping, Topic::AudienceTravel]
            .into_iter()
            .any(|t| self.is_populated(t));
        let weighted: u32 = Topic::ORDER
            .into_iter()
            .filter(|t| self.is_populated(*t))
            .map(|t| t.weight())
            .sum();
        weighted + if travel { TRANSPORTATION_WEIGHT } else { 0 }
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence_score())
    }

    /// Context handed to extraction providers.
    pub fn context(&self, pending: Option<Topic>) -> ExtractionContext {
        ExtractionContext {
            event_type: self.event_type(),
            attendance: self.attendance.as_ref().map(|s| s.value),
            pending_topic: pending.map(|t| t.as_str().to_string()),
        }
    }

    /// A copy with every absent optional slot filled by its documented
    /// default, marked `InferredDefault`. Event type and attendance are
    /// never defaulted.
    pub fn with_defaults(&self) -> Self {
        let mut slots = self.clone();
        let event_type = slots.event_type();
        let outdoor_by_type = matches!(
            event_type,
            Some(EventType::OutdoorEvent | EventType::Festival)
        );

        fill(&mut slots.days, 1);
        fill(&mut slots.hours_per_day, 8.0);
        fill(
            &mut slots.venue_type,
            (if outdoor_by_type { "outdoor" } else { "indoor" }).to_string(),
        );
        let venue_outdoor = slots
            .venue_type
            .as_ref()
            .is_some_and(|v| matches!(v.value.as_str(), "outdoor" | "open_air" | "park" | "field" | "beach" | "farm"));
        fill(&mut slots.is_outdoor, venue_outdoor);
        fill(&mut slots.power_source, PowerSource::Grid);
        fill(
            &mut slots.stages,
            match event_type {
                Some(EventType::Festival) => 2,
                Some(EventType::Concert | EventType::Theater) => 1,
                _ => 0,
            },
        );
        fill(&mut slots.av_scale, AvScale::Medium);
        fill(&mut slots.meals_served, 0);
        fill(&mut slots.locally_sourced, false);
        fill(&mut slots.crew_size, 0);
        fill(&mut slots.crew_distance_km, 0.0);
        fill(&mut slots.trucks, 0);
        fill(&mut slots.equipment_distance_km, 0.0);
        fill(&mut slots.audience_distance_km, 0.0);
        fill(&mut slots.recycling_program, false);
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts_with_attendance(attendance: u32) -> EventFacts {
        EventFacts {
            attendance: Some(attendance),
            ..Default::default()
        }
    }

    // ── Merge ───────────────────────────────────────────────────

    #[test]
    fn merge_fills_empty_slot() {
        let mut slots = ExtractedSlotSet::new();
        let changed = slots.merge(&facts_with_attendance(300), 0.8, Provenance::UserStated);
        assert_eq!(changed, 1);
        let slot = slots.attendance.unwrap();
        assert_eq!(slot.value, 300);
        assert_eq!(slot.provenance, Provenance::UserStated);
    }

    #[test]
    fn lower_confidence_never_overwrites() {
        let mut slots = ExtractedSlotSet::new();
        slots.merge(&facts_with_attendance(300), 0.8, Provenance::UserStated);
        let changed = slots.merge(&facts_with_attendance(30), 0.6, Provenance::UserStated);
        assert_eq!(changed, 0);
        assert_eq!(slots.attendance.unwrap().value, 300);
    }

    #[test]
    fn equal_confidence_replaces() {
        let mut slots = ExtractedSlotSet::new();
        slots.merge(&facts_with_attendance(300), 0.8, Provenance::UserStated);
        slots.merge(&facts_with_attendance(350), 0.8, Provenance::UserStated);
        assert_eq!(slots.attendance.unwrap().value, 350);
    }

    #[test]
    fn zero_confidence_never_stored() {
        let mut slots = ExtractedSlotSet::new();
        let changed = slots.merge(&facts_with_attendance(300), 0.0, Provenance::UserStated);
        assert_eq!(changed, 0);
        assert!(slots.attendance.is_none());
    }

    #[test]
    fn zero_attendance_ignored() {
        let mut slots = ExtractedSlotSet::new();
        slots.merge(&facts_with_attendance(0), 0.9, Provenance::UserStated);
        assert!(slots.attendance.is_none());
    }

    #[test]
    fn waste_measures_union() {
        let mut slots = ExtractedSlotSet::new();
        let facts = EventFacts {
            waste_measures: vec!["composting".into()],
            ..Default::default()
        };
        slots.merge(&facts, 0.8, Provenance::UserStated);
        slots.merge(&facts, 0.8, Provenance::UserStated);
        assert_eq!(slots.waste_measures, vec!["composting".to_string()]);
        assert!(slots.is_populated(Topic::Waste));
    }

    // ── Topics ──────────────────────────────────────────────────

    #[test]
    fn topic_parse() {
        assert_eq!("audio visual".parse::<Topic>().unwrap(), Topic::AudioVisual);
        assert_eq!("crew_travel".parse::<Topic>().unwrap(), Topic::CrewTravel);
        assert_eq!(
            "dessert".parse::<Topic>(),
            Err(IntakeError::UnknownTopic("dessert".into()))
        );
    }

    #[test]
    fn conditional_topics() {
        assert!(Topic::Staging.applies_to(Some(EventType::Theater)));
        assert!(!Topic::Staging.applies_to(Some(EventType::Wedding)));
        assert!(Topic::AudioVisual.applies_to(Some(EventType::Festival)));
        assert!(!Topic::AudioVisual.applies_to(Some(EventType::Theater)));
        assert!(Topic::Catering.applies_to(Some(EventType::CorporateEvent)));
        assert!(!Topic::Catering.applies_to(Some(EventType::Concert)));
        assert!(!Topic::Catering.applies_to(None));
    }

    #[test]
    fn applicable_topic_counts() {
        let mut slots = ExtractedSlotSet::new();
        assert_eq!(slots.applicable_topics().len(), 9);

        slots.merge(
            &EventFacts {
                event_type: Some(EventType::Festival),
                ..Default::default()
            },
            0.8,
            Provenance::UserStated,
        );
        assert_eq!(slots.applicable_topics().len(), 12);
    }

    #[test]
    fn completion_over_applicable_topics() {
        let mut slots = ExtractedSlotSet::new();
        slots.merge(
            &EventFacts {
                event_type: Some(EventType::Wedding),
                attendance: Some(120),
                days: Some(1),
                ..Default::default()
            },
            0.8,
            Provenance::UserStated,
        );
        // Wedding has nine applicable topics, three are populated.
        assert_eq!(slots.completion_percentage(), 33);
    }

    // ── Confidence level ────────────────────────────────────────

    #[test]
    fn confidence_weights() {
        let mut slots = ExtractedSlotSet::new();
        assert_eq!(slots.confidence_level(), ConfidenceLevel::VeryLow);

        slots.merge(
            &EventFacts {
                event_type: Some(EventType::Conference),
                attendance: Some(400),
                days: Some(2),
                ..Default::default()
            },
            0.8,
            Provenance::UserStated,
        );
        assert_eq!(slots.confidence_score(), 40);
        assert_eq!(slots.confidence_level(), ConfidenceLevel::Low);

        slots.merge(
            &EventFacts {
                venue_type: Some("hotel".into()),
                crew_size: Some(10),
                trucks: Some(1),
                ..Default::default()
            },
            0.8,
            Provenance::UserStated,
        );
        // Travel counts once even with two travel topics populated.
        assert_eq!(slots.confidence_score(), 65);
        assert_eq!(slots.confidence_level(), ConfidenceLevel::Medium);
    }

    // ── Defaults ────────────────────────────────────────────────

    #[test]
    fn defaults_are_marked_inferred() {
        let mut slots = ExtractedSlotSet::new();
        slots.merge(
            &EventFacts {
                event_type: Some(EventType::Festival),
                power_source: Some(PowerSource::Generator),
                ..Default::default()
            },
            0.8,
            Provenance::UserStated,
        );
        let filled = slots.with_defaults();

        let power = filled.power_source.unwrap();
        assert_eq!(power.value, PowerSource::Generator);
        assert_eq!(power.provenance, Provenance::UserStated);

        let stages = filled.stages.unwrap();
        assert_eq!(stages.value, 2);
        assert_eq!(stages.provenance, Provenance::InferredDefault);
        assert_eq!(stages.confidence, DEFAULT_CONFIDENCE);

        assert!(filled.is_outdoor.unwrap().value);
        assert!(filled.attendance.is_none());
    }

    #[test]
    fn context_names_pending_topic() {
        let mut slots = ExtractedSlotSet::new();
        slots.merge(&facts_with_attendance(80), 0.8, Provenance::UserStated);
        let ctx = slots.context(Some(Topic::Venue));
        assert_eq!(ctx.attendance, Some(80));
        assert_eq!(ctx.pending_topic.as_deref(), Some("venue"));
    }
}
