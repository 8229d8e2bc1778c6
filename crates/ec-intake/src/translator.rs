//! Free text → emission line items.
//!
//! Extraction happens through an `ExtractionEngine` under a caller-imposed
//! timeout. Everything after that is pure: units are normalized, the item
//! is classified by keyword, a catalog factor is resolved and the activity
//! quantity is multiplied out to tCO2e.

use std::sync::Arc;
use std::time::Duration;

use ec_accounting::catalog::{self, FactorEntry, GENERIC_LOOKUP, SPECIFIC_LOOKUP};
use ec_protocol::{
    ExtractedItem, ExtractionContext, ExtractionRecord, ItemCategory, LineItemEmission,
};
use serde::Serialize;

use crate::inference::{ExtractionEngine, extract_with_timeout};
use crate::persona::{VocabularyTier, detect_tier};
use crate::units::{self, Dimension};

/// Diesel burn of a mid-size event generator, liters per hour.
pub const GENERATOR_LITERS_PER_HOUR: f64 = 15.0;

/// Run time assumed when a generator's hours are not given.
pub const DEFAULT_GENERATOR_HOURS: f64 = 8.0;

/// Trip length assumed when a vehicle's distance is not given.
pub const DEFAULT_TRIP_KM: f64 = 100.0;

// ── Classification ──────────────────────────────────────────────

/// Keyword rules in priority order. The first category with a hit wins.
const CATEGORY_KEYWORDS: &[(ItemCategory, &[&str])] = &[
    (
        ItemCategory::Transportation,
        &[
            "truck", "lorry", "lorries", "van", "semi", "vehicle", "car", "bus", "coach",
            "shuttle", "flight", "flying", "plane", "train", "rail", "freight", "haul",
            "delivery", "driving",
        ],
    ),
    (
        ItemCategory::Energy,
        &[
            "generator", "diesel", "gasoline", "petrol", "fuel", "propane", "natural gas",
            "electricity", "power", "kwh",
        ],
    ),
    (
        ItemCategory::Waste,
        &["waste", "trash", "garbage", "landfill", "recycling", "recycled", "compost", "rubbish"],
    ),
    (
        ItemCategory::Food,
        &[
            "meal", "catering", "food", "dinner", "lunch", "breakfast", "plate", "beef",
            "chicken", "fish", "vegetarian", "vegan", "water", "beer", "keg", "wine", "drink",
            "beverage",
        ],
    ),
    (
        ItemCategory::Materials,
        &[
            "backdrop", "banner", "signage", "sign", "truss", "staging", "carpet", "flooring",
            "plywood", "timber", "wood", "steel", "aluminum", "aluminium", "vinyl", "fabric",
            "screen", "led", "paper", "program", "flyer", "brochure", "booth", "plastic",
            "canvas", "polyester",
        ],
    ),
];

/// Catalog keys by keyword, per category. Earlier entries win.
const FACTOR_KEYS: &[(ItemCategory, &[(&str, &str)])] = &[
    (
        ItemCategory::Materials,
        &[
            ("vinyl", "vinyl_banner"),
            ("fabric", "fabric_banner"),
            ("polyester", "fabric_banner"),
            ("canvas", "fabric_banner"),
            ("aluminum", "aluminum_truss"),
            ("aluminium", "aluminum_truss"),
            ("steel", "steel_truss"),
            ("truss", "steel_truss"),
            ("plywood", "plywood_sheet"),
            ("wood", "wood_staging"),
            ("timber", "wood_staging"),
            ("staging", "wood_staging"),
            ("carpet", "carpet_flooring"),
            ("flooring", "carpet_flooring"),
            ("plastic", "plastic_signage"),
            ("led", "led_screen"),
            ("screen", "led_screen"),
            ("paper", "paper_program"),
            ("program", "paper_program"),
            ("flyer", "paper_program"),
            ("brochure", "paper_program"),
        ],
    ),
    (
        ItemCategory::Energy,
        &[
            ("diesel", "diesel_generator"),
            ("gasoline", "gasoline_generator"),
            ("petrol", "gasoline_generator"),
            ("propane", "propane"),
            ("natural gas", "natural_gas"),
        ],
    ),
    (
        ItemCategory::Transportation,
        &[
            ("flight", "domestic_flight"),
            ("flying", "domestic_flight"),
            ("plane", "domestic_flight"),
            ("electric train", "train_electric"),
            ("train", "train_diesel"),
            ("rail", "train_diesel"),
            ("truck", "semi_truck_diesel"),
            ("lorry", "semi_truck_diesel"),
            ("lorries", "semi_truck_diesel"),
            ("semi", "semi_truck_diesel"),
            ("freight", "semi_truck_diesel"),
            ("van", "van_diesel"),
            ("car", "car_gasoline"),
            ("bus", "bus_diesel"),
            ("coach", "bus_diesel"),
            ("shuttle", "bus_diesel"),
        ],
    ),
    (
        ItemCategory::Food,
        &[
            ("beef", "beef_meal"),
            ("chicken", "chicken_meal"),
            ("fish", "fish_meal"),
            ("vegetarian", "vegetarian_meal"),
            ("vegan", "vegan_meal"),
            ("local", "local_catering"),
            ("water", "bottled_water"),
            ("beer", "beer_keg"),
            ("keg", "beer_keg"),
            ("wine", "wine_bottle"),
        ],
    ),
    (
        ItemCategory::Waste,
        &[
            ("compost", "composted"),
            ("composted", "composted"),
            ("recycling", "recycled"),
            ("recycled", "recycled"),
            ("landfill", "landfill"),
            ("trash", "landfill"),
            ("garbage", "landfill"),
        ],
    ),
];

/// True when `term` occurs in `text` as whole words. The last word of the
/// term may carry a plural `s`/`es`. Hyphens separate words.
pub fn contains_term(text: &str, term: &str) -> bool {
    let words = tokens(text);
    let term_words = tokens(term);
    if term_words.is_empty() || term_words.len() > words.len() {
        return false;
    }
    let last = term_words.len() - 1;
    words.windows(term_words.len()).any(|window| {
        window.iter().zip(&term_words).enumerate().all(|(i, (w, t))| {
            w == t || (i == last && is_plural_of(w, t))
        })
    })
}

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_plural_of(word: &str, term: &str) -> bool {
    word.strip_suffix('s')
        .is_some_and(|stem| stem == term || stem.strip_suffix('e') == Some(term))
}

/// Category of an item description, if any keyword matches.
pub fn match_category(text: &str) -> Option<ItemCategory> {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| contains_term(text, k)))
        .map(|(category, _)| *category)
}

/// Category of an item description. Unmatched text is treated as materials.
pub fn classify(text: &str) -> ItemCategory {
    match_category(text).unwrap_or(ItemCategory::Materials)
}

/// Resolve the emission factor for an item, with its lookup specificity.
///
/// A keyed catalog entry has specificity 1.0. Otherwise the category's
/// generic factor is returned with specificity 0.5.
pub fn resolve_factor(category: ItemCategory, text: &str) -> (FactorEntry, f64) {
    let key = FACTOR_KEYS
        .iter()
        .find(|(c, _)| *c == category)
        .and_then(|(_, keys)| keys.iter().find(|(word, _)| contains_term(text, word)))
        .map(|(_, key)| *key);

    match key.and_then(|k| catalog::lookup(category, k)) {
        Some(entry) => (entry, SPECIFIC_LOOKUP),
        None => (catalog::generic(category), GENERIC_LOOKUP),
    }
}

// ── Quantities ──────────────────────────────────────────────────

/// Activity quantity of an item in the factor's unit.
fn activity_quantity(item: &ExtractedItem, category: ItemCategory, factor: &FactorEntry) -> Option<f64> {
    let primary = units::normalize(item.quantity, &item.unit)?;

    match category {
        ItemCategory::Energy if primary.dimension == Dimension::Count && factor.unit == "L" => {
            let generators = item.count.unwrap_or(primary.value);
            let hours = item.duration_hours.unwrap_or(DEFAULT_GENERATOR_HOURS);
            Some(generators * hours * GENERATOR_LITERS_PER_HOUR)
        }
        ItemCategory::Transportation => {
            let (vehicles, km) = match primary.dimension {
                Dimension::Distance => (item.count.unwrap_or(1.0), primary.value),
                Dimension::Length => (item.count.unwrap_or(1.0), primary.value / 1000.0),
                _ => {
                    let km = match (item.distance, item.distance_unit.as_deref()) {
                        (Some(d), unit) => {
                            units::normalize(d, unit.unwrap_or("km"))
                                .and_then(|q| units::to_factor_unit(q, "km"))?
                        }
                        (None, _) => DEFAULT_TRIP_KM,
                    };
                    (item.count.unwrap_or(primary.value), km)
                }
            };
            Some(vehicles * km)
        }
        _ => units::to_factor_unit(primary, factor.unit),
    }
}

fn describe(item: &ExtractedItem) -> String {
    let mut text = item.item.clone();
    if let Some(material) = &item.material {
        if !contains_term(&text, material) {
            text = format!("{material} {text}");
        }
    }
    if item.unit.is_empty() {
        format!("{} {}", item.quantity, text)
    } else {
        format!("{} {} {}", item.quantity, item.unit, text)
    }
}

/// Translate one extracted tuple. `confidence` is the extraction confidence.
///
/// Returns None when the quantity cannot be expressed in the factor's unit.
pub fn translate_item(item: &ExtractedItem, confidence: f64) -> Option<LineItemEmission> {
    let text = format!("{} {}", item.item, item.material.as_deref().unwrap_or(""));
    let energy_unit = matches!(item.unit.to_lowercase().as_str(), "kwh" | "mwh");

    let category = if energy_unit {
        ItemCategory::Energy
    } else {
        classify(&text)
    };

    let (factor, specificity) = if energy_unit {
        let key = if contains_term(&text, "eu") || contains_term(&text, "europe") {
            "grid_electricity_eu"
        } else {
            "grid_electricity_us"
        };
        match catalog::lookup(ItemCategory::Energy, key) {
            Some(entry) => (entry, SPECIFIC_LOOKUP),
            None => (catalog::generic(ItemCategory::Energy), GENERIC_LOOKUP),
        }
    } else {
        resolve_factor(category, &text)
    };

    let Some(quantity) = activity_quantity(item, category, &factor) else {
        tracing::warn!(
            item = %item.item,
            unit = %item.unit,
            factor_unit = factor.unit,
            "cannot express quantity in factor unit, item skipped"
        );
        return None;
    };

    let total_emissions = quantity * factor.factor / 1000.0;
    if !(quantity.is_finite() && quantity >= 0.0 && total_emissions >= 0.0) {
        tracing::warn!(
            item = %item.item,
            quantity,
            total_emissions,
            "negative or non-finite emissions, item skipped"
        );
        return None;
    }

    let catalog_review = specificity < SPECIFIC_LOOKUP;
    if catalog_review {
        tracing::warn!(
            item = %item.item,
            category = %category,
            fallback = factor.key,
            "no specific emission factor, using generic"
        );
    }

    Some(LineItemEmission {
        description: describe(item),
        quantity,
        unit: factor.unit.to_string(),
        factor: factor.factor,
        factor_unit: factor.unit.to_string(),
        total_emissions,
        category,
        confidence: (confidence * specificity).clamp(0.0, 1.0),
        source: factor.source.to_string(),
        catalog_review,
    })
}

/// Translate every item of an extraction record.
pub fn translate_record(record: &ExtractionRecord) -> Vec<LineItemEmission> {
    record
        .items
        .iter()
        .filter(|item| is_well_formed(item))
        .filter_map(|item| translate_item(item, record.confidence))
        .collect()
}

/// Every numeric field of an item is finite and non-negative.
fn is_well_formed(item: &ExtractedItem) -> bool {
    let valid = |v: f64| v.is_finite() && v >= 0.0;
    let ok = valid(item.quantity)
        && [item.count, item.distance, item.duration_hours]
            .into_iter()
            .flatten()
            .all(valid);
    if !ok {
        tracing::warn!(item = %item.item, "item with a negative or non-finite number, skipped");
    }
    ok
}

// ── Plain-language comparison ───────────────────────────────────

/// Everyday comparison for an amount of tCO2e.
pub fn metaphor(t_co2e: f64) -> String {
    let t = t_co2e.max(0.0);
    if t < 0.1 {
        "about as much as a small campfire".into()
    } else if t < 1.0 {
        format!("about the same as {:.0} campfires", t / 0.005)
    } else if t < 5.0 {
        format!("like powering {:.0} homes for a month", t / 0.02)
    } else if t < 20.0 {
        format!("roughly {:.0} miles of driving", t / 0.0004)
    } else if t < 100.0 {
        format!("what {:.0} trees absorb in a year", t / 0.02)
    } else {
        format!("like {:.0} cars on the road for a year", t / 4.6)
    }
}

// ── Translator ──────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Deadline for one extraction call.
    pub timeout: Duration,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

/// Result of translating a free-text description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub line_items: Vec<LineItemEmission>,
    /// Sum of line item emissions, tCO2e.
    pub total_emissions: f64,
    /// Mean line item confidence. Zero means "no data".
    pub confidence: f64,
    pub explanation: String,
    /// True when extraction failed, timed out or returned nothing.
    pub degraded: bool,
}

impl Translation {
    fn degraded() -> Self {
        Self {
            line_items: Vec::new(),
            total_emissions: 0.0,
            confidence: 0.0,
            explanation: "We couldn't read any quantities from that description.".into(),
            degraded: true,
        }
    }

    /// The everyday comparison is only offered in the plain tier.
    fn from_items(line_items: Vec<LineItemEmission>, tier: VocabularyTier) -> Self {
        let total_emissions: f64 = line_items.iter().map(|i| i.total_emissions).sum();
        let confidence = if line_items.is_empty() {
            0.0
        } else {
            line_items.iter().map(|i| i.confidence).sum::<f64>() / line_items.len() as f64
        };
        let explanation = match line_items.len() {
            0 => "No quantifiable items were found in that description.".to_string(),
            n => {
                let plural = if n == 1 { "" } else { "s" };
                match tier {
                    VocabularyTier::Plain => format!(
                        "{n} item{plural} totalling {total_emissions:.3} tCO2e, {}.",
                        metaphor(total_emissions)
                    ),
                    VocabularyTier::Practical | VocabularyTier::Technical => {
                        format!("{n} item{plural} totalling {total_emissions:.3} tCO2e.")
                    }
                }
            }
        };
        Self {
            line_items,
            total_emissions,
            confidence,
            explanation,
            degraded: false,
        }
    }
}

/// Turns free-text descriptions into emission line items.
pub struct Translator {
    engine: Arc<dyn ExtractionEngine>,
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(engine: Arc<dyn ExtractionEngine>, config: TranslatorConfig) -> Self {
        Self { engine, config }
    }

    /// Translate free text. Extraction failure degrades, it never errors.
    ///
    /// `tier` is the caller's vocabulary tier; technical wording in the
    /// text itself can raise it.
    pub async fn translate(
        &self,
        text: &str,
        context: &ExtractionContext,
        tier: VocabularyTier,
    ) -> Translation {
        let tier = tier.escalate(detect_tier(text));
        match extract_with_timeout(self.engine.as_ref(), text, context, self.config.timeout).await
        {
            Some(result) => {
                let translation =
                    Translation::from_items(translate_record(&result.record), tier);
                tracing::debug!(
                    provider = %result.tier,
                    vocabulary = tier.as_str(),
                    items = translation.line_items.len(),
                    total = translation.total_emissions,
                    "translated description"
                );
                translation
            }
            None => Translation::degraded(),
        }
    }

    /// Line items only.
    pub async fn translate_line_item(
        &self,
        text: &str,
        context: &ExtractionContext,
    ) -> Vec<LineItemEmission> {
        self.translate(text, context, VocabularyTier::default())
            .await
            .line_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::ExtractionResult;
    use crate::inference::rules::RuleBasedExtractor;
    use async_trait::async_trait;

    struct FixedEngine(Option<ExtractionRecord>);

    #[async_trait]
    impl ExtractionEngine for FixedEngine {
        async fn extract(&self, _text: &str, _ctx: &ExtractionContext) -> Option<ExtractionResult> {
            self.0.clone().map(|record| ExtractionResult {
                record,
                tier: "fixed".into(),
            })
        }

        fn tier_name(&self) -> &str {
            "fixed"
        }
    }

    struct StalledEngine;

    #[async_trait]
    impl ExtractionEngine for StalledEngine {
        async fn extract(&self, _text: &str, _ctx: &ExtractionContext) -> Option<ExtractionResult> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            None
        }

        fn tier_name(&self) -> &str {
            "stalled"
        }
    }

    fn rules_translator() -> Translator {
        Translator::new(Arc::new(RuleBasedExtractor::new()), TranslatorConfig::default())
    }

    fn item(name: &str, quantity: f64, unit: &str) -> ExtractedItem {
        ExtractedItem {
            item: name.into(),
            quantity,
            unit: unit.into(),
            ..Default::default()
        }
    }

    // ── Classification ──────────────────────────────────────────

    #[test]
    fn classification_priority() {
        assert_eq!(classify("diesel truck"), ItemCategory::Transportation);
        assert_eq!(classify("diesel generators"), ItemCategory::Energy);
        assert_eq!(classify("food waste"), ItemCategory::Waste);
        assert_eq!(classify("chicken meals"), ItemCategory::Food);
        assert_eq!(classify("vinyl backdrop"), ItemCategory::Materials);
        assert_eq!(classify("mystery widgets"), ItemCategory::Materials);
    }

    #[test]
    fn terms_match_whole_words() {
        assert!(contains_term("two trucks", "truck"));
        assert!(contains_term("three buses", "bus"));
        assert!(contains_term("an off-site retreat", "off-site"));
        assert!(!contains_term("carpet tiles", "car"));
        assert!(!contains_term("business cards", "bus"));
    }

    #[test]
    fn specific_factor_lookup() {
        let (entry, specificity) = resolve_factor(ItemCategory::Materials, "vinyl backdrop");
        assert_eq!(entry.key, "vinyl_banner");
        assert_eq!(specificity, SPECIFIC_LOOKUP);
    }

    #[test]
    fn generic_factor_fallback() {
        let (entry, specificity) = resolve_factor(ItemCategory::Materials, "mystery widgets");
        assert_eq!(entry.key, "generic_material");
        assert_eq!(specificity, GENERIC_LOOKUP);
    }

    // ── Items ───────────────────────────────────────────────────

    #[test]
    fn backdrop_by_length() {
        let mut backdrop = item("backdrop", 30.0, "ft");
        backdrop.material = Some("vinyl".into());
        let line = translate_item(&backdrop, 0.8).unwrap();
        assert_eq!(line.category, ItemCategory::Materials);
        assert_eq!(line.unit, "sqm");
        assert!((line.quantity - 22.2967296).abs() < 1e-9);
        assert!((line.total_emissions - 22.2967296 * 4.2 / 1000.0).abs() < 1e-12);
        assert!((line.confidence - 0.8).abs() < 1e-12);
        assert!(!line.catalog_review);
        assert_eq!(line.description, "30 ft vinyl backdrop");
    }

    #[test]
    fn generators_burn_per_hour() {
        let generators = ExtractedItem {
            item: "diesel generators".into(),
            quantity: 3.0,
            count: Some(3.0),
            duration_hours: Some(10.0),
            material: Some("diesel".into()),
            ..Default::default()
        };
        let line = translate_item(&generators, 0.8).unwrap();
        assert_eq!(line.category, ItemCategory::Energy);
        assert_eq!(line.quantity, 450.0);
        assert!((line.total_emissions - 450.0 * 2.68 / 1000.0).abs() < 1e-12);
    }

    #[test]
    fn generator_hours_default() {
        let generators = ExtractedItem {
            item: "diesel generator".into(),
            quantity: 1.0,
            count: Some(1.0),
            ..Default::default()
        };
        let line = translate_item(&generators, 0.8).unwrap();
        assert_eq!(line.quantity, DEFAULT_GENERATOR_HOURS * GENERATOR_LITERS_PER_HOUR);
    }

    #[test]
    fn fuel_volume_used_directly() {
        let mut diesel = item("diesel", 100.0, "gal");
        diesel.material = Some("diesel".into());
        let line = translate_item(&diesel, 1.0).unwrap();
        assert!((line.quantity - 378.541).abs() < 1e-9);
    }

    #[test]
    fn trucks_times_distance() {
        let trucks = ExtractedItem {
            item: "trucks".into(),
            quantity: 2.0,
            count: Some(2.0),
            distance: Some(500.0),
            distance_unit: Some("km".into()),
            ..Default::default()
        };
        let line = translate_item(&trucks, 0.8).unwrap();
        assert_eq!(line.category, ItemCategory::Transportation);
        assert_eq!(line.quantity, 1000.0);
        assert!((line.total_emissions - 0.85).abs() < 1e-12);
    }

    #[test]
    fn vehicle_distance_defaults() {
        let van = ExtractedItem {
            item: "van".into(),
            quantity: 1.0,
            count: Some(1.0),
            ..Default::default()
        };
        let line = translate_item(&van, 0.8).unwrap();
        assert_eq!(line.quantity, DEFAULT_TRIP_KM);
    }

    #[test]
    fn meals_by_count() {
        let mut meals = item("meals", 200.0, "");
        meals.material = Some("chicken".into());
        let line = translate_item(&meals, 0.8).unwrap();
        assert_eq!(line.category, ItemCategory::Food);
        assert!((line.total_emissions - 200.0 * 2.9 / 1000.0).abs() < 1e-12);
    }

    #[test]
    fn electricity_in_kwh() {
        let line = translate_item(&item("electricity", 2.0, "MWh"), 0.9).unwrap();
        assert_eq!(line.category, ItemCategory::Energy);
        assert_eq!(line.quantity, 2000.0);
        assert!((line.total_emissions - 2000.0 * 0.475 / 1000.0).abs() < 1e-12);
    }

    #[test]
    fn generic_item_flagged_and_discounted() {
        let line = translate_item(&item("mystery widgets", 10.0, "kg"), 0.8).unwrap();
        assert!(line.catalog_review);
        assert!((line.confidence - 0.4).abs() < 1e-12);
        assert!((line.total_emissions - 0.02).abs() < 1e-12);
    }

    #[test]
    fn incompatible_unit_skipped() {
        let mut steel = item("steel truss", 3.0, "gal");
        steel.material = Some("steel".into());
        assert!(translate_item(&steel, 0.8).is_none());
    }

    #[test]
    fn negative_quantities_dropped() {
        let record = ExtractionRecord {
            items: vec![item("vinyl banner", -4.0, "sqm")],
            confidence: 0.8,
            ..Default::default()
        };
        assert!(translate_record(&record).is_empty());
    }

    #[test]
    fn negative_distance_dropped() {
        let van = ExtractedItem {
            item: "van".into(),
            quantity: 1.0,
            count: Some(1.0),
            distance: Some(-500.0),
            distance_unit: Some("km".into()),
            ..Default::default()
        };
        let record = ExtractionRecord {
            items: vec![van],
            confidence: 0.8,
            ..Default::default()
        };
        assert!(translate_record(&record).is_empty());
    }

    #[test]
    fn non_finite_count_and_hours_dropped() {
        let mut generators = item("diesel generators", 2.0, "");
        generators.count = Some(f64::NAN);
        let mut screen = item("diesel generator", 1.0, "");
        screen.duration_hours = Some(-8.0);
        let mut trucks = item("trucks", 2.0, "");
        trucks.distance = Some(f64::INFINITY);

        let record = ExtractionRecord {
            items: vec![generators, screen, trucks, item("vinyl banner", 4.0, "sqm")],
            confidence: 0.8,
            ..Default::default()
        };
        let lines = translate_record(&record);
        assert_eq!(lines.len(), 1);
        assert!(lines.iter().all(|l| l.total_emissions >= 0.0));
    }

    // ── Metaphors ───────────────────────────────────────────────

    #[test]
    fn metaphor_thresholds() {
        assert_eq!(metaphor(0.05), "about as much as a small campfire");
        assert_eq!(metaphor(0.5), "about the same as 100 campfires");
        assert_eq!(metaphor(2.0), "like powering 100 homes for a month");
        assert_eq!(metaphor(10.0), "roughly 25000 miles of driving");
        assert_eq!(metaphor(50.0), "what 2500 trees absorb in a year");
        assert_eq!(metaphor(460.0), "like 100 cars on the road for a year");
    }

    // ── Translator ──────────────────────────────────────────────

    #[tokio::test]
    async fn length_and_area_descriptions_agree() {
        let translator = rules_translator();
        let ctx = ExtractionContext::default();

        let by_length = translator.translate("a 30-foot vinyl backdrop", &ctx, VocabularyTier::Plain).await;
        let by_area = translator
            .translate("22.296729 sqm vinyl backdrop", &ctx, VocabularyTier::Plain)
            .await;

        assert!(!by_length.degraded);
        assert_eq!(by_length.line_items.len(), 1);
        assert_eq!(by_area.line_items.len(), 1);
        assert!((by_length.total_emissions - by_area.total_emissions).abs() < 1e-6);
    }

    #[tokio::test]
    async fn several_items_sum() {
        let translation = rules_translator()
            .translate(
                "3 diesel generators running 10 hours, 2 trucks driving 500 km",
                &ExtractionContext::default(),
                VocabularyTier::Plain,
            )
            .await;
        assert_eq!(translation.line_items.len(), 2);
        let expected = 450.0 * 2.68 / 1000.0 + 0.85;
        assert!((translation.total_emissions - expected).abs() < 1e-9);
        assert!(translation.explanation.starts_with("2 items totalling"));
        assert!(translation.explanation.contains("homes"));
    }

    #[tokio::test]
    async fn technical_tier_skips_metaphor() {
        let translator = rules_translator();
        let ctx = ExtractionContext::default();

        let technical = translator
            .translate("2 trucks driving 500 km", &ctx, VocabularyTier::Technical)
            .await;
        assert_eq!(technical.explanation, "1 item totalling 0.850 tCO2e.");

        // Accounting vocabulary in the text raises a plain caller.
        let escalated = translator
            .translate("scope 3 haulage: 2 trucks driving 500 km", &ctx, VocabularyTier::Plain)
            .await;
        assert!(!escalated.explanation.contains("campfire"));

        let plain = translator
            .translate("2 trucks driving 500 km", &ctx, VocabularyTier::Plain)
            .await;
        assert!(plain.explanation.contains("campfires"));
    }

    #[tokio::test]
    async fn unavailable_engine_degrades() {
        let translator = Translator::new(Arc::new(FixedEngine(None)), TranslatorConfig::default());
        let translation = translator
            .translate("30 ft vinyl backdrop", &ExtractionContext::default(), VocabularyTier::Plain)
            .await;
        assert!(translation.degraded);
        assert!(translation.line_items.is_empty());
        assert_eq!(translation.confidence, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_engine_degrades() {
        let translator = Translator::new(
            Arc::new(StalledEngine),
            TranslatorConfig {
                timeout: Duration::from_millis(200),
            },
        );
        let items = translator
            .translate_line_item("30 ft vinyl backdrop", &ExtractionContext::default())
            .await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn facts_without_items_are_not_degraded() {
        let translation = rules_translator()
            .translate("a wedding for 120 guests", &ExtractionContext::default(), VocabularyTier::Plain)
            .await;
        assert!(!translation.degraded);
        assert!(translation.line_items.is_empty());
        assert_eq!(translation.confidence, 0.0);
    }
}
