use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::emissions::LineItemEmission;

// ── Event Type ────────────────────────────────────────────────

/// Kind of live event being estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Concert,
    Festival,
    Conference,
    SportsEvent,
    Theater,
    Wedding,
    CorporateEvent,
    TradeShow,
    CommunityEvent,
    OutdoorEvent,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 11] = [
        Self::Concert,
        Self::Festival,
        Self::Conference,
        Self::SportsEvent,
        Self::Theater,
        Self::Wedding,
        Self::CorporateEvent,
        Self::TradeShow,
        Self::CommunityEvent,
        Self::OutdoorEvent,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concert => "concert",
            Self::Festival => "festival",
            Self::Conference => "conference",
            Self::SportsEvent => "sports_event",
            Self::Theater => "theater",
            Self::Wedding => "wedding",
            Self::CorporateEvent => "corporate_event",
            Self::TradeShow => "trade_show",
            Self::CommunityEvent => "community_event",
            Self::OutdoorEvent => "outdoor_event",
            Self::Other => "other",
        }
    }

    /// Human-readable label used in rendered questions ("sports event").
    pub fn label(&self) -> &'static str {
        match self {
            Self::SportsEvent => "sports event",
            Self::CorporateEvent => "corporate event",
            Self::TradeShow => "trade show",
            Self::CommunityEvent => "community event",
            Self::OutdoorEvent => "outdoor event",
            Self::Other => "event",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known event type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    /// Accepts wire names (`sports_event`) as well as spaced or hyphenated
    /// forms (`Sports Event`, `trade-show`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}

// ── Profile sections ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Duration {
    pub days: u32,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,
}

fn default_hours_per_day() -> f64 {
    8.0
}

impl Default for Duration {
    fn default() -> Self {
        Self {
            days: 1,
            hours_per_day: default_hours_per_day(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Free-form venue description ("arena", "convention center", "park").
    #[serde(default)]
    pub venue_type: String,
    #[serde(default)]
    pub is_outdoor: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub has_existing_power: bool,
}

/// Where on-site power comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerSource {
    #[default]
    Grid,
    Generator,
    Hybrid,
    Renewable,
}

impl PowerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Generator => "generator",
            Self::Hybrid => "hybrid",
            Self::Renewable => "renewable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorSize {
    Small,
    Medium,
    Large,
    Multiple,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Power {
    #[serde(default)]
    pub source: PowerSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_size: Option<GeneratorSize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvScale {
    Small,
    #[default]
    Medium,
    Large,
    Festival,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Production {
    #[serde(default)]
    pub stages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub av_scale: Option<AvScale>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Staffing {
    #[serde(default)]
    pub total_staff: u32,
    #[serde(default)]
    pub on_site: u32,
    #[serde(default)]
    pub crew: u32,
}

/// How a group of people gets to the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Car,
    PublicTransit,
    Flight,
    Train,
    Bus,
    Mixed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudienceTravel {
    #[serde(default)]
    pub average_distance_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_mode: Option<TravelMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrewTravel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<TravelMode>,
    #[serde(default)]
    pub distance_km: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentShipping {
    #[serde(default)]
    pub trucks: u32,
    #[serde(default)]
    pub distance_km: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transportation {
    #[serde(default)]
    pub audience: AudienceTravel,
    #[serde(default)]
    pub crew: CrewTravel,
    #[serde(default)]
    pub equipment: EquipmentShipping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catering {
    #[serde(default)]
    pub meals_served: u32,
    #[serde(default)]
    pub locally_sourced: bool,
    #[serde(default)]
    pub alcohol: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Waste {
    #[serde(default)]
    pub recycling_program: bool,
    /// Additional waste measures in place (e.g. "composting", "reusable_cups").
    #[serde(default)]
    pub measures: Vec<String>,
}

impl Waste {
    pub fn has_measure(&self, measure: &str) -> bool {
        self.measures.iter().any(|m| m.eq_ignore_ascii_case(measure))
    }
}

// ── Event Profile ─────────────────────────────────────────────

/// Structured description of an event, the input to every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProfile {
    pub event_type: EventType,
    pub attendance: u32,
    #[serde(default)]
    pub duration: Duration,
    #[serde(default)]
    pub venue: Venue,
    #[serde(default)]
    pub power: Power,
    #[serde(default)]
    pub production: Production,
    #[serde(default)]
    pub staffing: Staffing,
    #[serde(default)]
    pub transportation: Transportation,
    #[serde(default)]
    pub catering: Catering,
    #[serde(default)]
    pub waste: Waste,
    /// Translated free-text items attached during a conversation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItemEmission>,
}

impl EventProfile {
    /// A profile with the given type and attendance and defaults elsewhere.
    pub fn new(event_type: EventType, attendance: u32) -> Self {
        Self {
            event_type,
            attendance,
            duration: Duration::default(),
            venue: Venue::default(),
            power: Power::default(),
            production: Production::default(),
            staffing: Staffing::default(),
            transportation: Transportation::default(),
            catering: Catering::default(),
            waste: Waste::default(),
            line_items: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_serialization() {
        let json = serde_json::to_string(&EventType::SportsEvent).unwrap();
        assert_eq!(json, "\"sports_event\"");
        let back: EventType = serde_json::from_str("\"trade_show\"").unwrap();
        assert_eq!(back, EventType::TradeShow);
    }

    #[test]
    fn event_type_loose_parse() {
        assert_eq!("Festival".parse::<EventType>().unwrap(), EventType::Festival);
        assert_eq!(
            "corporate event".parse::<EventType>().unwrap(),
            EventType::CorporateEvent
        );
        assert_eq!("trade-show".parse::<EventType>().unwrap(), EventType::TradeShow);
    }

    #[test]
    fn event_type_unknown_rejected() {
        let err = "rave".parse::<EventType>().unwrap_err();
        assert_eq!(err, UnknownEventType("rave".into()));
    }

    #[test]
    fn unknown_event_type_fails_deserialization() {
        let json = r#"{"event_type": "rave", "attendance": 10}"#;
        assert!(serde_json::from_str::<EventProfile>(json).is_err());
    }

    #[test]
    fn minimal_profile_uses_defaults() {
        let json = r#"{"event_type": "concert", "attendance": 500}"#;
        let profile: EventProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.event_type, EventType::Concert);
        assert_eq!(profile.attendance, 500);
        assert_eq!(profile.duration.days, 1);
        assert_eq!(profile.power.source, PowerSource::Grid);
        assert!(!profile.catering.locally_sourced);
        assert!(profile.line_items.is_empty());
    }

    #[test]
    fn nested_sections_deserialize() {
        let json = r#"{
            "event_type": "festival",
            "attendance": 1000,
            "duration": {"days": 3, "hours_per_day": 10},
            "power": {"source": "renewable"},
            "transportation": {"equipment": {"trucks": 4, "distance_km": 320.5}},
            "catering": {"meals_served": 2000, "locally_sourced": true},
            "waste": {"recycling_program": true, "measures": ["composting"]}
        }"#;
        let profile: EventProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.duration.days, 3);
        assert_eq!(profile.power.source, PowerSource::Renewable);
        assert_eq!(profile.transportation.equipment.trucks, 4);
        assert!(profile.catering.locally_sourced);
        assert!(profile.waste.has_measure("Composting"));
    }

    #[test]
    fn profile_without_line_items_omits_field() {
        let profile = EventProfile::new(EventType::Wedding, 120);
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("line_items").is_none());
        assert_eq!(json["event_type"], "wedding");
    }
}
