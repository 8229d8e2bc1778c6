//! Input validation. Nothing reaches the calculator without passing here.

use ec_protocol::{EventProfile, EventType};
use serde_json::Value;

use crate::error::{AccountingError, AccountingResult};

/// Numeric wire fields that must never be negative, as JSON pointers.
const NON_NEGATIVE_FIELDS: &[&str] = &[
    "/duration/days",
    "/duration/hours_per_day",
    "/venue/capacity",
    "/production/stages",
    "/staffing/total_staff",
    "/staffing/on_site",
    "/staffing/crew",
    "/transportation/audience/average_distance_km",
    "/transportation/crew/distance_km",
    "/transportation/equipment/trucks",
    "/transportation/equipment/distance_km",
    "/catering/meals_served",
];

/// Check a profile's required fields and arithmetic preconditions.
pub fn validate_profile(profile: &EventProfile) -> AccountingResult<()> {
    if profile.attendance == 0 {
        return Err(AccountingError::validation(
            "attendance",
            "attendance must be greater than zero",
        ));
    }
    if profile.duration.days == 0 {
        return Err(AccountingError::validation(
            "duration.days",
            "an event lasts at least one day",
        ));
    }
    let hours = profile.duration.hours_per_day;
    if !hours.is_finite() || hours <= 0.0 || hours > 24.0 {
        return Err(AccountingError::validation(
            "duration.hours_per_day",
            format!("hours per day must be in (0, 24], got {hours}"),
        ));
    }

    let transport = &profile.transportation;
    non_negative(
        "transportation.audience.average_distance_km",
        transport.audience.average_distance_km,
    )?;
    non_negative("transportation.crew.distance_km", transport.crew.distance_km)?;
    non_negative(
        "transportation.equipment.distance_km",
        transport.equipment.distance_km,
    )?;

    for (i, item) in profile.line_items.iter().enumerate() {
        non_negative(&format!("line_items[{i}].quantity"), item.quantity)?;
        non_negative(
            &format!("line_items[{i}].total_emissions"),
            item.total_emissions,
        )?;
        if !(0.0..=1.0).contains(&item.confidence) {
            return Err(AccountingError::validation(
                format!("line_items[{i}].confidence"),
                "confidence must be within [0, 1]",
            ));
        }
    }

    Ok(())
}

/// Parse and validate a profile from raw JSON, reporting the offending
/// field path instead of a generic deserialization error.
pub fn profile_from_json(value: &Value) -> AccountingResult<EventProfile> {
    let Some(obj) = value.as_object() else {
        return Err(AccountingError::validation(
            "profile",
            "expected a JSON object",
        ));
    };

    match obj.get("event_type") {
        Some(Value::String(s)) => {
            s.parse::<EventType>()
                .map_err(|e| AccountingError::validation("event_type", e.to_string()))?;
        }
        Some(_) => {
            return Err(AccountingError::validation(
                "event_type",
                "event type must be a string",
            ));
        }
        None => {
            return Err(AccountingError::validation(
                "event_type",
                "event type is required",
            ));
        }
    }

    match obj.get("attendance").and_then(Value::as_f64) {
        Some(n) if n > 0.0 => {}
        Some(_) => {
            return Err(AccountingError::validation(
                "attendance",
                "attendance must be greater than zero",
            ));
        }
        None => {
            return Err(AccountingError::validation(
                "attendance",
                "attendance is required",
            ));
        }
    }

    for pointer in NON_NEGATIVE_FIELDS {
        let Some(n) = value.pointer(pointer).and_then(Value::as_f64) else {
            continue;
        };
        if n < 0.0 {
            return Err(AccountingError::guard(
                pointer.trim_start_matches('/').replace('/', "."),
                format!("must not be negative, got {n}"),
            ));
        }
    }

    // Wire names are canonical; accept loose event type spellings too.
    let mut normalized = value.clone();
    let canonical = normalized
        .get("event_type")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<EventType>().ok());
    if let Some(t) = canonical {
        normalized["event_type"] = Value::String(t.as_str().to_string());
    }

    let profile: EventProfile = serde_json::from_value(normalized)
        .map_err(|e| AccountingError::validation("profile", e.to_string()))?;
    validate_profile(&profile)?;
    Ok(profile)
}

fn non_negative(field: &str, value: f64) -> AccountingResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AccountingError::guard(
            field,
            format!("must be a non-negative number, got {value}"),
        ));
    }
    Ok(())
}
