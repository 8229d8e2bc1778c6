//! Rule-based extraction: keyword and regex matching over free text.
//!
//! Handles the common phrasings of event logistics at zero cost and
//! sub-millisecond latency. Anything it cannot read falls through to a
//! model-backed provider.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use super::{ExtractionEngine, ExtractionResult};
use crate::translator::{contains_term, match_category};
use ec_protocol::{
    AvScale, EventFacts, EventType, ExtractedItem, ExtractionContext, ExtractionRecord,
    PowerSource, TravelMode,
};

/// Confidence for facts read from explicit phrasing.
const RULE_CONFIDENCE: f64 = 0.8;

/// Confidence when the only signal is a bare answer to the open question.
const CONTEXT_CONFIDENCE: f64 = 0.6;

/// Pattern-matching extraction engine.
pub struct RuleBasedExtractor;

impl RuleBasedExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleBasedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractionEngine for RuleBasedExtractor {
    async fn extract(&self, text: &str, context: &ExtractionContext) -> Option<ExtractionResult> {
        extract_record(text, context).map(|record| ExtractionResult {
            record,
            tier: "local".into(),
        })
    }

    fn tier_name(&self) -> &str {
        "local"
    }
}

// ── Patterns ────────────────────────────────────────────────────

static ATTENDANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(k|thousand)?\+?\s*(?:people|attendees|guests|persons?|visitors|fans|participants|delegates|spectators|runners)\b",
    )
    .unwrap()
});

static ATTENDANCE_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:attendance|audience|crowd|capacity|headcount)\s+(?:of\s+)?(?:about\s+|around\s+|roughly\s+|approximately\s+)?(\d[\d,]*)\s*(k|thousand)?",
    )
    .unwrap()
});

static DAYS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve)[\s-]*days?\b")
        .unwrap()
});

static HOURS_PER_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:hours?|hrs?)\s*(?:a|per|each)\s*day").unwrap()
});

static STAGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+|one|two|three|four|five|six|seven|eight|nine|ten|a single|single)\s+(?:\w+\s+)?stages?\b")
        .unwrap()
});

static AV_SCALE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(small|medium|large|big|festival)[\s-]+(?:scale\s+|sized?\s+)?(?:sound|audio|av|a/v|production|pa|rig)\b",
    )
    .unwrap()
});

static MEALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s+(?:\w+\s+)?(?:meals|plates|dinners|lunches|covers|servings)\b")
        .unwrap()
});

static CATERING_FOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:catering|catered|feeding|food)\s+for\s+(\d[\d,]*)").unwrap()
});

static CREW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s+(?:crew|staff|technicians|roadies|workers)\b").unwrap()
});

static TRUCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+|one|two|three|four|five|six|seven|eight|nine|ten)\s+(?:\w+\s+)?(?:trucks?|lorries|lorry|vans?|semis?)\b")
        .unwrap()
});

static DISTANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(km|kilometers?|kilometres?|mi|miles?)\b").unwrap()
});

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(k)?\b").unwrap());

/// A number with an optional trailing unit. Longer alternatives come first.
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d[\d,]*(?:\.\d+)?)\s*-?\s*(square\s+feet|square\s+foot|sq\.?\s*ft|sqft|square\s+yards?|sq\.?\s*yd|sqyd|square\s+meters?|square\s+metres?|sq\.?\s*m|sqm|m2|feet|foot|ft|inches|inch|yards?|yds?|meters?|metres?|cm|lbs?|pounds?|kilograms?|kgs?|grams?|tonnes?|tons?|gallons?|gal|litres?|liters?|ml|kwh|mwh|kilometers?|kilometres?|km|miles?|mi|hours?|hrs?|sheets?|bottles?|m|l|g)?\b",
    )
    .unwrap()
});

static CLAUSE_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[;!?]\s*|\.\s+|,\s+|\s+and\s+|\s+plus\s+|\s+with\s+|\s+also\s+").unwrap()
});

// ── Vocabulary ──────────────────────────────────────────────────

/// Event type keywords, most specific first.
const EVENT_TYPES: &[(&[&str], EventType)] = &[
    (&["trade show", "tradeshow", "expo", "exhibition"], EventType::TradeShow),
    (&["festival", "fest "], EventType::Festival),
    (&["concert", "gig", "live music", "recital"], EventType::Concert),
    (&["conference", "summit", "convention", "symposium", "seminar"], EventType::Conference),
    (&["wedding", "reception"], EventType::Wedding),
    (
        &["sports", "match", "tournament", "marathon", "race", "game day"],
        EventType::SportsEvent,
    ),
    (&["theater", "theatre", "play", "musical", "opera"], EventType::Theater),
    (
        &["corporate", "offsite", "off-site", "gala", "company party", "team building"],
        EventType::CorporateEvent,
    ),
    (
        &["community", "fair", "fundraiser", "street party", "block party", "market"],
        EventType::CommunityEvent,
    ),
    (&["outdoor event", "picnic"], EventType::OutdoorEvent),
];

const OUTDOOR_VENUES: &[(&str, &str)] = &[
    ("open air", "open_air"),
    ("open-air", "open_air"),
    ("outdoor", "outdoor"),
    ("outside", "outdoor"),
    ("park", "park"),
    ("field", "field"),
    ("beach", "beach"),
    ("farm", "farm"),
];

const INDOOR_VENUES: &[(&str, &str)] = &[
    ("convention center", "convention_center"),
    ("conference center", "convention_center"),
    ("ballroom", "ballroom"),
    ("arena", "arena"),
    ("stadium", "stadium"),
    ("hotel", "hotel"),
    ("theater", "theater"),
    ("theatre", "theater"),
    ("hall", "hall"),
    ("club", "club"),
    ("indoor", "indoor"),
    ("inside", "indoor"),
];

const MATERIAL_WORDS: &[&str] = &[
    "vinyl", "fabric", "polyester", "canvas", "steel", "aluminum", "aluminium", "wood", "timber",
    "plywood", "carpet", "plastic", "paper", "cardboard", "led", "diesel", "gasoline", "petrol",
    "propane", "beef", "chicken", "fish", "vegetarian", "vegan", "water", "beer", "wine",
];

const FOOD_WORDS: &[&str] = &["beef", "chicken", "fish", "vegetarian", "vegan"];

const TRAVEL_MODES: &[(&[&str], TravelMode)] = &[
    (&["fly", "flying", "flight", "flew", "plane", "air travel"], TravelMode::Flight),
    (&["train", "rail"], TravelMode::Train),
    (
        &["public transit", "public transport", "subway", "metro", "tram", "transit"],
        TravelMode::PublicTransit,
    ),
    (&["bus", "coach", "shuttle"], TravelMode::Bus),
    (&["drive", "driving", "car", "carpool"], TravelMode::Car),
];

const CREW_WORDS: &[&str] = &["crew", "staff", "technician", "roadie", "team", "workers"];
const AUDIENCE_WORDS: &[&str] = &[
    "audience", "attendees", "guests", "fans", "visitors", "people travel", "spectators",
];
const TRUCK_WORDS: &[&str] = &[
    "truck", "lorry", "lorries", "van", "semi", "freight", "haul", "hauling", "shipping",
];

const SUSTAINABLE_PHRASES: &[&str] = &[
    "local catering",
    "locally sourced",
    "local food",
    "recycling",
    "compost",
    "reusable",
    "solar",
    "renewable",
    "grid power",
    "public transit",
    "public transport",
    "shuttle",
    "carpool",
];

const ITEM_STOPWORDS: &[&str] = &[
    " for ", " running ", " run ", " over ", " at ", " from ", " to ", " each ", " per ",
    " driving ", " traveling ", " travelling ", " going ",
];

// ── Extraction ──────────────────────────────────────────────────

/// Core extraction logic. Returns None when the text asserts nothing.
pub fn extract_record(text: &str, context: &ExtractionContext) -> Option<ExtractionRecord> {
    let lower = text.to_lowercase();
    let lower = lower.trim();
    if lower.is_empty() {
        return None;
    }

    let clauses: Vec<&str> = CLAUSE_SPLIT
        .split(lower)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();

    let mut facts = EventFacts {
        event_type: detect_event_type(lower),
        attendance: detect_attendance(lower),
        days: detect_days(lower),
        hours_per_day: HOURS_PER_DAY
            .captures(lower)
            .and_then(|c| parse_number(&c[1]))
            .filter(|h| *h > 0.0 && *h <= 24.0),
        power_source: detect_power(lower),
        stages: STAGES.captures(lower).and_then(|c| parse_count(&c[1])),
        av_scale: AV_SCALE.captures(lower).and_then(|c| parse_av_scale(&c[1])),
        meals_served: detect_meals(lower),
        locally_sourced: detect_local_sourcing(lower),
        recycling_program: detect_recycling(lower),
        waste_measures: detect_waste_measures(lower),
        ..Default::default()
    };

    if let Some((venue_type, is_outdoor)) = detect_venue(lower) {
        facts.venue_type = Some(venue_type.into());
        facts.is_outdoor = Some(is_outdoor);
    }

    for clause in &clauses {
        read_travel_clause(clause, &mut facts);
    }

    let mut confidence = RULE_CONFIDENCE;
    if facts.is_empty() && apply_context_answer(lower, context, &mut facts) {
        confidence = CONTEXT_CONFIDENCE;
    }

    let items: Vec<ExtractedItem> = clauses.iter().filter_map(|c| parse_item_clause(c)).collect();

    let record = ExtractionRecord {
        facts,
        items,
        sustainable_choices: SUSTAINABLE_PHRASES
            .iter()
            .filter(|p| lower.contains(*p))
            .map(|p| p.to_string())
            .collect(),
        confidence,
    };

    if record.is_empty() {
        None
    } else {
        Some(record)
    }
}

/// Check if the text contains any of the given terms as whole words.
fn matches_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| contains_term(text, p))
}

fn detect_event_type(text: &str) -> Option<EventType> {
    EVENT_TYPES
        .iter()
        .find(|(keywords, _)| matches_any(text, keywords))
        .map(|(_, event_type)| *event_type)
}

fn detect_attendance(text: &str) -> Option<u32> {
    let caps = ATTENDANCE
        .captures(text)
        .or_else(|| ATTENDANCE_OF.captures(text))?;
    let value = parse_number(&caps[1])?;
    let value = if caps.get(2).is_some() { value * 1000.0 } else { value };
    to_count(value)
}

fn detect_days(text: &str) -> Option<u32> {
    if let Some(caps) = DAYS.captures(text) {
        return parse_count(&caps[1]).filter(|d| *d > 0);
    }
    if text.contains("weekend") {
        return Some(2);
    }
    if matches_any(text, &["single day", "one-day", "all day", "an evening", "one night", "tonight"]) {
        return Some(1);
    }
    if text.contains("a week") || text.contains("week-long") || text.contains("weeklong") {
        return Some(7);
    }
    None
}

fn detect_venue(text: &str) -> Option<(&'static str, bool)> {
    // Explicit indoor/outdoor wins over venue nouns.
    if contains_term(text, "indoor") || contains_term(text, "indoors") {
        let venue = INDOOR_VENUES
            .iter()
            .find(|(k, _)| contains_term(text, k))
            .map_or("indoor", |(_, v)| *v);
        return Some((venue, false));
    }
    if let Some((_, venue)) = OUTDOOR_VENUES.iter().find(|(k, _)| contains_term(text, k)) {
        return Some((*venue, true));
    }
    INDOOR_VENUES
        .iter()
        .find(|(k, _)| contains_term(text, k))
        .map(|(_, v)| (*v, false))
}

fn detect_power(text: &str) -> Option<PowerSource> {
    let generator = text.contains("generator");
    let grid = matches_any(text, &["grid", "mains", "venue power", "house power", "shore power"]);
    let renewable = matches_any(text, &["solar", "renewable", "green energy", "wind power", "battery power"]);

    if text.contains("hybrid") || (generator && (grid || renewable)) {
        Some(PowerSource::Hybrid)
    } else if renewable {
        Some(PowerSource::Renewable)
    } else if generator {
        Some(PowerSource::Generator)
    } else if grid {
        Some(PowerSource::Grid)
    } else {
        None
    }
}

fn parse_av_scale(word: &str) -> Option<AvScale> {
    match word {
        "small" => Some(AvScale::Small),
        "medium" => Some(AvScale::Medium),
        "large" | "big" => Some(AvScale::Large),
        "festival" => Some(AvScale::Festival),
        _ => None,
    }
}

fn detect_meals(text: &str) -> Option<u32> {
    MEALS
        .captures(text)
        .or_else(|| CATERING_FOR.captures(text))
        .and_then(|c| parse_number(&c[1]))
        .and_then(to_count)
}

fn detect_local_sourcing(text: &str) -> Option<bool> {
    if matches_any(text, &["not local", "not locally", "imported food"]) {
        Some(false)
    } else if matches_any(
        text,
        &["local catering", "locally sourced", "local food", "local supplier", "local caterer", "farm-to-table", "farm to table"],
    ) {
        Some(true)
    } else {
        None
    }
}

fn detect_recycling(text: &str) -> Option<bool> {
    if matches_any(text, &["no recycling", "not recycling", "don't recycle", "no recycle"]) {
        Some(false)
    } else if text.contains("recycl") {
        Some(true)
    } else {
        None
    }
}

fn detect_waste_measures(text: &str) -> Vec<String> {
    let mut measures = Vec::new();
    if text.contains("compost") {
        measures.push("composting".to_string());
    }
    if matches_any(text, &["reusable cup", "reusable plate", "reusable serviceware", "reusable cutlery", "washable"]) {
        measures.push("reusable_serviceware".to_string());
    }
    if matches_any(text, &["reusable set", "reusable staging", "reuse the set", "rented staging", "reusable materials"]) {
        measures.push("reusable_materials".to_string());
    }
    if matches_any(text, &["water refill", "refill station", "water station"]) {
        measures.push("water_refill".to_string());
    }
    measures
}

/// Crew, truck and audience facts are read per clause so a distance lands
/// on the right traveller.
fn read_travel_clause(clause: &str, facts: &mut EventFacts) {
    let distance = DISTANCE.captures(clause).and_then(|c| {
        let value = parse_number(&c[1])?;
        Some(if c[2].starts_with('m') { value * 1.60934 } else { value })
    });
    let mode = TRAVEL_MODES
        .iter()
        .find(|(keywords, _)| matches_any(clause, keywords))
        .map(|(_, mode)| *mode);

    if matches_any(clause, TRUCK_WORDS) {
        if facts.trucks.is_none() {
            facts.trucks = TRUCKS.captures(clause).and_then(|c| parse_count(&c[1]));
        }
        if facts.equipment_distance_km.is_none() {
            facts.equipment_distance_km = distance;
        }
    } else if matches_any(clause, CREW_WORDS) {
        if facts.crew_size.is_none() {
            facts.crew_size = CREW
                .captures(clause)
                .and_then(|c| parse_number(&c[1]))
                .and_then(to_count);
        }
        if facts.crew_method.is_none() {
            facts.crew_method = mode;
        }
        if facts.crew_distance_km.is_none() {
            facts.crew_distance_km = distance;
        }
    } else if matches_any(clause, AUDIENCE_WORDS) || clause.contains("travel") {
        if facts.audience_mode.is_none() {
            facts.audience_mode = mode;
        }
        if facts.audience_distance_km.is_none() {
            facts.audience_distance_km = distance;
        }
    }
}

/// Interpret a bare answer ("about 500", "large", "yes") using the topic the
/// last question asked about. Returns true when a fact was set.
fn apply_context_answer(text: &str, context: &ExtractionContext, facts: &mut EventFacts) -> bool {
    let Some(topic) = context.pending_topic.as_deref() else {
        return false;
    };

    let number = BARE_NUMBER.captures(text).and_then(|c| {
        let value = parse_number(&c[1])?;
        Some(if c.get(2).is_some() { value * 1000.0 } else { value })
    });
    let number = number.or_else(|| {
        text.split_whitespace()
            .find_map(|w| word_number(w.trim_matches(|c: char| !c.is_alphanumeric())))
            .map(f64::from)
    });
    let affirmative = matches_any(text, &["yes", "yeah", "yep", "we do", "sure", "of course"]);
    let negative = matches_any(text, &["no", "nope", "none", "we don't", "not really"]);

    match topic {
        "attendance" => facts.attendance = number.and_then(to_count),
        "duration" => facts.days = number.and_then(to_count),
        "staging" => facts.stages = number.and_then(|n| u32::try_from(n as i64).ok()),
        "audio_visual" => {
            facts.av_scale = text
                .split_whitespace()
                .find_map(|w| parse_av_scale(w.trim_matches(|c: char| !c.is_alphanumeric())))
        }
        "catering" => {
            facts.meals_served = number.and_then(to_count);
            if facts.meals_served.is_none() && negative {
                facts.meals_served = Some(0);
            }
        }
        "crew_travel" => facts.crew_size = number.and_then(to_count),
        "equipment_shipping" => {
            facts.trucks = number.and_then(|n| u32::try_from(n as i64).ok());
            if facts.trucks.is_none() && negative {
                facts.trucks = Some(0);
            }
        }
        "audience_travel" => facts.audience_distance_km = number.filter(|n| *n >= 0.0),
        "waste" => {
            if negative {
                facts.recycling_program = Some(false);
            } else if affirmative {
                facts.recycling_program = Some(true);
            }
        }
        _ => {}
    }

    !facts.is_empty()
}

/// Read one `number [unit] item` tuple from a clause.
fn parse_item_clause(clause: &str) -> Option<ExtractedItem> {
    if let Some(meals) = MEALS
        .captures(clause)
        .or_else(|| CATERING_FOR.captures(clause))
        .and_then(|c| parse_number(&c[1]))
    {
        return Some(ExtractedItem {
            item: "meals".into(),
            quantity: meals,
            material: FOOD_WORDS
                .iter()
                .find(|w| contains_term(clause, w))
                .map(|w| w.to_string()),
            count: Some(meals),
            ..Default::default()
        });
    }

    let quantities: Vec<(f64, Option<String>, usize)> = QUANTITY
        .captures_iter(clause)
        .filter_map(|c| {
            let whole = c.get(0)?;
            let value = parse_number(&c[1])?;
            let unit = c.get(2).map(|u| canonical_unit_word(u.as_str()));
            Some((value, unit, whole.end()))
        })
        .collect();

    let duration_hours = quantities
        .iter()
        .find(|(_, unit, _)| unit.as_deref() == Some("hours"))
        .map(|(v, _, _)| *v);
    let (distance, distance_unit) = quantities
        .iter()
        .find(|(_, unit, _)| matches!(unit.as_deref(), Some("km") | Some("mi")))
        .map(|(v, u, _)| (Some(*v), u.clone()))
        .unwrap_or((None, None));

    let (quantity, unit, end) = quantities
        .iter()
        .find(|(_, unit, _)| !matches!(unit.as_deref(), Some("hours") | Some("km") | Some("mi")))
        .or_else(|| quantities.iter().find(|(_, unit, _)| unit.as_deref() != Some("hours")))?
        .clone();

    let item = item_text(clause, end);
    let material = MATERIAL_WORDS
        .iter()
        .find(|m| clause.split(|c: char| !c.is_alphanumeric()).any(|w| w == **m))
        .map(|m| m.to_string());

    let described = format!("{item} {}", material.as_deref().unwrap_or(""));
    if item.is_empty() || match_category(&described).is_none() {
        return None;
    }

    let is_distance = matches!(unit.as_deref(), Some("km") | Some("mi"));
    let unit = unit.unwrap_or_default();
    let count = if unit.is_empty() { Some(quantity) } else { None };

    Some(ExtractedItem {
        item,
        quantity,
        unit,
        material,
        count,
        duration_hours,
        distance: if is_distance { None } else { distance },
        distance_unit: if is_distance { None } else { distance_unit },
    })
}

/// The item noun phrase following a quantity, cut at the first stopword.
fn item_text(clause: &str, start: usize) -> String {
    let rest = clause.get(start..).unwrap_or("");
    let rest = rest.trim_start_matches(|c: char| c == '-' || c == 'x' || c.is_whitespace());
    let rest = rest.strip_prefix("of ").unwrap_or(rest);
    let padded = format!(" {rest} ");
    let cut = ITEM_STOPWORDS
        .iter()
        .filter_map(|s| padded.find(s))
        .min()
        .unwrap_or(padded.len());
    let phrase = padded[..cut].trim();
    // Stop at the next number; it belongs to another tuple.
    let phrase = phrase
        .split(|c: char| c.is_ascii_digit())
        .next()
        .unwrap_or("")
        .trim();
    phrase
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

/// Map the many spellings of a unit onto one short form.
fn canonical_unit_word(unit: &str) -> String {
    let unit = unit.to_lowercase();
    let squashed: String = unit.chars().filter(|c| c.is_alphanumeric()).collect();
    let canonical = match squashed.as_str() {
        "squarefeet" | "squarefoot" | "sqft" => "sqft",
        "squareyard" | "squareyards" | "sqyd" => "sqyd",
        "squaremeter" | "squaremeters" | "squaremetre" | "squaremetres" | "sqm" | "m2" => "sqm",
        "feet" | "foot" | "ft" => "ft",
        "inch" | "inches" => "in",
        "yard" | "yards" | "yd" | "yds" => "yd",
        "meter" | "meters" | "metre" | "metres" | "m" => "m",
        "cm" => "cm",
        "lb" | "lbs" | "pound" | "pounds" => "lb",
        "kilogram" | "kilograms" | "kg" | "kgs" => "kg",
        "gram" | "grams" | "g" => "g",
        "ton" | "tons" | "tonne" | "tonnes" => "t",
        "gallon" | "gallons" | "gal" => "gal",
        "liter" | "liters" | "litre" | "litres" | "l" => "L",
        "ml" => "ml",
        "kwh" => "kWh",
        "mwh" => "MWh",
        "kilometer" | "kilometers" | "kilometre" | "kilometres" | "km" => "km",
        "mile" | "miles" | "mi" => "mi",
        "hour" | "hours" | "hr" | "hrs" => "hours",
        "sheet" | "sheets" => "sheet",
        "bottle" | "bottles" => "bottle",
        other => return other.to_string(),
    };
    canonical.to_string()
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok().filter(|v| v.is_finite())
}

fn to_count(value: f64) -> Option<u32> {
    if value >= 1.0 && value <= u32::MAX as f64 {
        Some(value.round() as u32)
    } else {
        None
    }
}

/// Parse "3", "three" or "a single" as a count.
fn parse_count(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().or_else(|| word_number(raw))
}

fn word_number(word: &str) -> Option<u32> {
    let n = match word {
        "one" | "single" | "a single" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        _ => return None,
    };
    Some(n)
}
