//! Intake session state.

use chrono::{DateTime, Utc};
use ec_accounting::{AccountingError, validate_profile};
use ec_protocol::{
    AudienceTravel, Catering, CrewTravel, Duration, EquipmentShipping, EventProfile, Power,
    PowerSource, Production, Staffing, Transportation, Venue, Waste,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::IntakeResult;
use crate::persona::VocabularyTier;
use crate::slots::{ExtractedSlotSet, Slot, Topic};

/// Topics that must be answered before a profile can be built, unless the
/// caller configures a different set.
pub const DEFAULT_MINIMUM_VIABLE: [Topic; 4] = [
    Topic::EventType,
    Topic::Attendance,
    Topic::Duration,
    Topic::Venue,
];

/// One intake conversation.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub slots: ExtractedSlotSet,
    pub tier: VocabularyTier,
    /// Number of user turns handled so far.
    pub turns: u32,
    /// Topic of the last question asked.
    pub pending_topic: Option<Topic>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn value<T: Clone>(slot: &Option<Slot<T>>) -> Option<T> {
    slot.as_ref().map(|s| s.value.clone())
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            slots: ExtractedSlotSet::new(),
            tier: VocabularyTier::default(),
            turns: 0,
            pending_topic: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a profile using the default minimum-viable topic set.
    pub fn to_profile(&self) -> IntakeResult<EventProfile> {
        self.to_profile_with(&DEFAULT_MINIMUM_VIABLE)
    }

    /// Build a profile. Every topic in `required` must have been answered;
    /// event type and attendance are always required. Other absent fields
    /// take their documented defaults.
    pub fn to_profile_with(&self, required: &[Topic]) -> IntakeResult<EventProfile> {
        let always = [Topic::EventType, Topic::Attendance];
        if let Some(missing) = always
            .iter()
            .chain(required)
            .find(|t| !self.slots.is_populated(**t))
        {
            return Err(AccountingError::validation(
                missing.field_path(),
                format!("{} has not been provided yet", missing.as_str().replace('_', " ")),
            )
            .into());
        }

        let s = self.slots.with_defaults();
        let event_type = value(&s.event_type)
            .ok_or_else(|| AccountingError::validation("event_type", "not provided"))?;
        let attendance = value(&s.attendance)
            .ok_or_else(|| AccountingError::validation("attendance", "not provided"))?;

        let source = value(&s.power_source).unwrap_or_default();
        let crew = value(&s.crew_size).unwrap_or(0);

        let mut profile = EventProfile::new(event_type, attendance);
        profile.duration = Duration {
            days: value(&s.days).unwrap_or(1),
            hours_per_day: value(&s.hours_per_day).unwrap_or(8.0),
        };
        profile.venue = Venue {
            venue_type: value(&s.venue_type).unwrap_or_default(),
            is_outdoor: value(&s.is_outdoor).unwrap_or(false),
            capacity: None,
            has_existing_power: matches!(source, PowerSource::Grid | PowerSource::Hybrid),
        };
        profile.power = Power {
            source,
            generator_size: None,
        };
        profile.production = Production {
            stages: value(&s.stages).unwrap_or(0),
            av_scale: value(&s.av_scale),
        };
        profile.staffing = Staffing {
            total_staff: crew,
            on_site: crew,
            crew,
        };
        profile.transportation = Transportation {
            audience: AudienceTravel {
                average_distance_km: value(&s.audience_distance_km).unwrap_or(0.0),
                primary_mode: value(&s.audience_mode),
            },
            crew: CrewTravel {
                method: value(&s.crew_method),
                distance_km: value(&s.crew_distance_km).unwrap_or(0.0),
            },
            equipment: EquipmentShipping {
                trucks: value(&s.trucks).unwrap_or(0),
                distance_km: value(&s.equipment_distance_km).unwrap_or(0.0),
            },
        };
        profile.catering = Catering {
            meals_served: value(&s.meals_served).unwrap_or(0),
            locally_sourced: value(&s.locally_sourced).unwrap_or(false),
            alcohol: false,
        };
        profile.waste = Waste {
            recycling_program: value(&s.recycling_program).unwrap_or(false),
            measures: s.waste_measures.clone(),
        };
        profile.line_items = s.line_items.clone();

        validate_profile(&profile)?;
        Ok(profile)
    }
}
