//! Conversational voice: vocabulary tiers, question wording and
//! encouragement for sustainable choices.

use ec_protocol::EventType;
use serde::{Deserialize, Serialize};

use crate::slots::Topic;
use crate::translator::contains_term;

/// How technical the conversation is. Ordered so a session can only move
/// up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyTier {
    /// Everyday words and comparisons.
    #[default]
    Plain,
    /// Footprint vocabulary without accounting jargon.
    Practical,
    /// GHG Protocol vocabulary.
    Technical,
}

impl VocabularyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Practical => "practical",
            Self::Technical => "technical",
        }
    }

    /// The higher of the two tiers.
    pub fn escalate(self, detected: Option<VocabularyTier>) -> Self {
        detected.map_or(self, |d| self.max(d))
    }
}

const TECHNICAL_TERMS: &[&str] = &[
    "scope 1",
    "scope 2",
    "scope 3",
    "tco2e",
    "ghg protocol",
    "emission factor",
    "emission factors",
    "esg",
    "compliance",
    "verification",
    "carbon accounting",
    "baseline inventory",
];

const PRACTICAL_TERMS: &[&str] = &[
    "carbon footprint",
    "emissions",
    "sustainability report",
    "co2",
    "tonnes",
    "offset",
];

/// Tier signalled by the words in an utterance, if any.
pub fn detect_tier(utterance: &str) -> Option<VocabularyTier> {
    let lower = utterance.to_lowercase();
    if TECHNICAL_TERMS.iter().any(|t| contains_term(&lower, t)) {
        Some(VocabularyTier::Technical)
    } else if PRACTICAL_TERMS.iter().any(|t| contains_term(&lower, t)) {
        Some(VocabularyTier::Practical)
    } else {
        None
    }
}

/// Question for a topic, worded for the tier.
pub fn question_text(topic: Topic, tier: VocabularyTier, event_type: Option<EventType>) -> String {
    use VocabularyTier::*;

    let event = event_type.map_or("event", |t| t.label());
    match (topic, tier) {
        (Topic::EventType, Plain) => {
            "What kind of get-together are you planning? A concert, a wedding, a festival...?".into()
        }
        (Topic::EventType, Practical) => "What type of event are you planning?".into(),
        (Topic::EventType, Technical) => {
            "Which event category should the inventory be scoped to (concert, conference, trade show, ...)?".into()
        }

        (Topic::Attendance, Plain) => format!("Roughly how many people are coming to your {event}?"),
        (Topic::Attendance, Practical) => format!("What attendance do you expect for the {event}?"),
        (Topic::Attendance, Technical) => {
            "What is the expected attendance? It sets the per-attendee intensity denominator.".into()
        }

        (Topic::Venue, Plain) => "Where's it happening? Inside somewhere, or out in the open?".into(),
        (Topic::Venue, Practical) => "What kind of venue is it, and is it indoors or outdoors?".into(),
        (Topic::Venue, Technical) => {
            "What is the venue type and is it an enclosed or open-air site?".into()
        }

        (Topic::Duration, Plain) => format!("How many days does the {event} last?"),
        (Topic::Duration, Practical) => {
            "How many days does it run, and about how many hours each day?".into()
        }
        (Topic::Duration, Technical) => {
            "What is the operating period in days and the daily operating hours?".into()
        }

        (Topic::Power, Plain) => {
            "How will you keep the lights on? Plugging into the venue, generators, solar?".into()
        }
        (Topic::Power, Practical) => {
            "Where does your power come from: grid, generators, renewables, or a mix?".into()
        }
        (Topic::Power, Technical) => {
            "What is the on-site power source (grid, diesel generation, hybrid, renewable)? It drives the scope 1/2 split.".into()
        }

        (Topic::Staging, Plain) => "How many stages will there be?".into(),
        (Topic::Staging, Practical) => "How many stages are you building or using?".into(),
        (Topic::Staging, Technical) => "How many stage structures are in scope?".into(),

        (Topic::AudioVisual, Plain) => {
            "How big is the sound and lighting setup: small, medium, large, or full festival rig?".into()
        }
        (Topic::AudioVisual, Practical) => {
            "What scale of audio-visual production: small, medium, large or festival?".into()
        }
        (Topic::AudioVisual, Technical) => {
            "What is the AV production scale (small, medium, large, festival)?".into()
        }

        (Topic::Catering, Plain) => {
            "Will you be feeding people? About how many meals, and is the food local?".into()
        }
        (Topic::Catering, Practical) => {
            "How many meals will be served, and is the catering locally sourced?".into()
        }
        (Topic::Catering, Technical) => {
            "What is the meal count and the share of locally sourced catering?".into()
        }

        (Topic::CrewTravel, Plain) => {
            "How many crew or staff are travelling in, and how are they getting there?".into()
        }
        (Topic::CrewTravel, Practical) => {
            "How many crew are travelling, by what mode, and roughly how far?".into()
        }
        (Topic::CrewTravel, Technical) => {
            "What are the crew headcount, travel mode and distance for business-travel emissions?".into()
        }

        (Topic::EquipmentShipping, Plain) => {
            "Are trucks bringing in gear? How many, and from how far away?".into()
        }
        (Topic::EquipmentShipping, Practical) => {
            "How many trucks are shipping equipment, and over what distance?".into()
        }
        (Topic::EquipmentShipping, Technical) => {
            "What is the freight profile: truck count and haul distance in km?".into()
        }

        (Topic::AudienceTravel, Plain) => {
            "How will most guests get there, and about how far do they travel?".into()
        }
        (Topic::AudienceTravel, Practical) => {
            "What is the main way attendees travel, and their average distance?".into()
        }
        (Topic::AudienceTravel, Technical) => {
            "What are the dominant attendee travel mode and mean trip distance?".into()
        }

        (Topic::Waste, Plain) => "Will there be recycling or composting bins?".into(),
        (Topic::Waste, Practical) => {
            "Do you have a recycling program or other waste measures planned?".into()
        }
        (Topic::Waste, Technical) => {
            "Which waste diversion measures are in place (recycling, composting, reusable serviceware)?".into()
        }
    }
}

// ── Encouragement ───────────────────────────────────────────────

/// A group of sustainable-choice keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SustainableChoice {
    LocalSourcing,
    Recycling,
    GridPower,
    PublicTransit,
    RenewablePower,
}

const CHOICE_KEYWORDS: &[(SustainableChoice, &[&str])] = &[
    (
        SustainableChoice::LocalSourcing,
        &[
            "local catering",
            "locally sourced",
            "local food",
            "local produce",
            "local supplier",
            "local caterer",
            "farm to table",
        ],
    ),
    (
        SustainableChoice::Recycling,
        &["recycling", "recycle", "recycled", "compost", "composting", "composted"],
    ),
    (
        SustainableChoice::GridPower,
        &["grid", "grid power", "mains", "venue power", "house power", "no generator"],
    ),
    (
        SustainableChoice::PublicTransit,
        &[
            "public transit",
            "public transport",
            "shuttle",
            "carpool",
            "carpooling",
            "car pool",
            "bus",
            "train",
            "metro",
            "subway",
        ],
    ),
    (
        SustainableChoice::RenewablePower,
        &["solar", "renewable", "renewables", "wind power", "green energy", "battery"],
    ),
];

/// Sustainable choices mentioned in an utterance, in a fixed order.
pub fn detect_sustainable_choices(utterance: &str) -> Vec<SustainableChoice> {
    let lower = utterance.to_lowercase();
    CHOICE_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| contains_term(&lower, k)))
        .map(|(choice, _)| *choice)
        .collect()
}

fn messages(choice: SustainableChoice) -> &'static [&'static str] {
    match choice {
        SustainableChoice::LocalSourcing => &[
            "Local food is a great call. Shorter supply chains cut catering emissions.",
            "Nice, sourcing locally keeps food miles down.",
            "Love the local sourcing. Your caterer's footprint just got smaller.",
        ],
        SustainableChoice::Recycling => &[
            "Recycling and composting keep a lot out of landfill. Good move.",
            "Great to hear about the waste plan. Diverted waste is lower-carbon waste.",
            "Nice, sorting waste on site makes a real difference.",
        ],
        SustainableChoice::GridPower => &[
            "Plugging into the grid instead of running generators saves a lot of fuel.",
            "Good choice on grid power. It's far cleaner than diesel generators.",
            "Using the venue's power is one of the easiest energy wins.",
        ],
        SustainableChoice::PublicTransit => &[
            "Shuttles and transit are a big win. Travel is often the largest slice.",
            "Great, getting people out of single-occupancy cars really helps.",
            "Nice, shared transport cuts audience travel emissions fast.",
        ],
        SustainableChoice::RenewablePower => &[
            "Renewable power is excellent. That's most of your energy emissions gone.",
            "Solar and renewables make a huge difference. Well done.",
            "Great to see clean energy in the plan.",
        ],
    }
}

/// Encouragement for a choice. Selection is indexed by turn number so the
/// same turn always yields the same message.
pub fn encouragement(choice: SustainableChoice, turn: u32) -> &'static str {
    let options = messages(choice);
    options[turn as usize % options.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_detection() {
        assert_eq!(
            detect_tier("we report Scope 3 under the GHG Protocol"),
            Some(VocabularyTier::Technical)
        );
        assert_eq!(
            detect_tier("what's our carbon footprint?"),
            Some(VocabularyTier::Practical)
        );
        assert_eq!(detect_tier("it's a birthday party"), None);
    }

    #[test]
    fn tier_only_escalates() {
        let tier = VocabularyTier::Technical;
        assert_eq!(tier.escalate(Some(VocabularyTier::Plain)), VocabularyTier::Technical);
        assert_eq!(tier.escalate(None), VocabularyTier::Technical);
        assert_eq!(
            VocabularyTier::Plain.escalate(Some(VocabularyTier::Practical)),
            VocabularyTier::Practical
        );
    }

    #[test]
    fn every_topic_has_three_wordings() {
        for topic in Topic::ORDER {
            let plain = question_text(topic, VocabularyTier::Plain, None);
            let practical = question_text(topic, VocabularyTier::Practical, None);
            let technical = question_text(topic, VocabularyTier::Technical, None);
            assert!(!plain.is_empty());
            assert_ne!(plain, practical, "{topic}");
            assert_ne!(practical, technical, "{topic}");
        }
    }

    #[test]
    fn question_uses_event_label() {
        let q = question_text(
            Topic::Attendance,
            VocabularyTier::Plain,
            Some(EventType::TradeShow),
        );
        assert!(q.contains("trade show"));
    }

    #[test]
    fn choices_detected_in_order() {
        let choices = detect_sustainable_choices(
            "Solar panels, a shuttle bus from the station and local catering",
        );
        assert_eq!(
            choices,
            vec![
                SustainableChoice::LocalSourcing,
                SustainableChoice::PublicTransit,
                SustainableChoice::RenewablePower,
            ]
        );
    }

    #[test]
    fn business_is_not_bus() {
        assert!(detect_sustainable_choices("a business conference").is_empty());
    }

    #[test]
    fn encouragement_is_deterministic() {
        let a = encouragement(SustainableChoice::Recycling, 4);
        let b = encouragement(SustainableChoice::Recycling, 4);
        assert_eq!(a, b);
        assert_ne!(
            encouragement(SustainableChoice::Recycling, 0),
            encouragement(SustainableChoice::Recycling, 1)
        );
    }
}
