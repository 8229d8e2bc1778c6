//! Static emission factor catalog.
//!
//! Factors are kg CO2e per `unit`. Lookup is by category and key; keys are
//! snake_case descriptors such as `vinyl_banner` or `diesel_generator`.
//! The catalog is read-only and versioned so that results can be traced
//! back to the factor set that produced them.

use ec_protocol::ItemCategory;
use serde::Serialize;

/// Version of the factor set below.
pub const CATALOG_VERSION: &str = "2025.1";

/// Specificity of a keyed factor. Confidence is scaled by this.
pub const SPECIFIC_LOOKUP: f64 = 1.0;

/// Specificity of a generic fallback factor.
pub const GENERIC_LOOKUP: f64 = 0.5;

/// A single emission factor with provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorEntry {
    pub key: &'static str,
    /// kg CO2e per `unit`.
    pub factor: f64,
    pub unit: &'static str,
    pub source: &'static str,
}

const fn entry(
    key: &'static str,
    factor: f64,
    unit: &'static str,
    source: &'static str,
) -> FactorEntry {
    FactorEntry {
        key,
        factor,
        unit,
        source,
    }
}

// ===== Materials =====
const MATERIALS: &[FactorEntry] = &[
    entry("vinyl_banner", 4.2, "sqm", "ISO 14040 LCA Studies 2025"),
    entry("fabric_banner", 2.8, "sqm", "Textile Exchange Material Report 2025"),
    entry("wood_staging", 0.45, "kg", "ICE Database 2025"),
    entry("steel_truss", 2.1, "kg", "ICE Database 2025"),
    entry("aluminum_truss", 8.2, "kg", "ICE Database 2025"),
    entry("plywood_sheet", 0.65, "sheet", "ICE Database 2025"),
    entry("carpet_flooring", 3.5, "sqm", "Carpet and Rug Institute LCA"),
    entry("plastic_signage", 6.0, "kg", "PlasticsEurope Eco-profiles"),
    entry("led_screen", 150.0, "sqm", "Manufacturer EPD average, per event"),
    entry("paper_program", 1.2, "kg", "Confederation of European Paper Industries"),
];

// ===== Energy =====
const ENERGY: &[FactorEntry] = &[
    entry("diesel_generator", 2.68, "L", "EPA Emission Factors Hub 2025"),
    entry("gasoline_generator", 2.31, "L", "EPA Emission Factors Hub 2025"),
    entry("grid_electricity_us", 0.475, "kWh", "EPA eGRID 2025 US average"),
    entry("grid_electricity_eu", 0.295, "kWh", "EEA 2025 EU average"),
    entry("propane", 2.96, "kg", "EPA Emission Factors Hub 2025"),
    entry("natural_gas", 0.185, "kWh", "DEFRA 2025"),
];

// ===== Transportation =====
const TRANSPORTATION: &[FactorEntry] = &[
    entry("semi_truck_diesel", 0.85, "km", "DEFRA 2025 HGV average laden"),
    entry("van_diesel", 0.21, "km", "DEFRA 2025"),
    entry("car_gasoline", 0.18, "km", "DEFRA 2025"),
    entry("bus_diesel", 0.12, "pkm", "DEFRA 2025"),
    entry("domestic_flight", 0.25, "pkm", "DEFRA 2025 incl. radiative forcing"),
    entry("international_flight", 0.18, "pkm", "DEFRA 2025 incl. radiative forcing"),
    entry("train_diesel", 0.04, "pkm", "DEFRA 2025"),
    entry("train_electric", 0.006, "pkm", "DEFRA 2025"),
];

// ===== Food & beverage =====
const FOOD: &[FactorEntry] = &[
    entry("beef_meal", 7.2, "meal", "Poore & Nemecek 2018"),
    entry("chicken_meal", 2.9, "meal", "Poore & Nemecek 2018"),
    entry("fish_meal", 3.5, "meal", "Poore & Nemecek 2018"),
    entry("vegetarian_meal", 1.5, "meal", "Poore & Nemecek 2018"),
    entry("vegan_meal", 0.9, "meal", "Poore & Nemecek 2018"),
    entry("mixed_catering", 3.5, "meal", "WRAP catering average"),
    entry("local_catering", 2.5, "meal", "WRAP catering average, local sourcing"),
    entry("bottled_water", 0.15, "L", "Pacific Institute"),
    entry("beer_keg", 0.9, "L", "Brewers Association LCA"),
    entry("wine_bottle", 1.8, "bottle", "Wine Institute LCA"),
];

// ===== Waste =====
const WASTE: &[FactorEntry] = &[
    entry("landfill", 0.5, "kg", "EPA WARM 2025"),
    entry("recycled", 0.1, "kg", "EPA WARM 2025"),
    entry("composted", 0.05, "kg", "EPA WARM 2025"),
];

// ===== Generic fallbacks (LookupMiss) =====
const GENERIC_MATERIAL: FactorEntry =
    entry("generic_material", 2.0, "kg", "Generic construction material average (ICE 2025)");
const GENERIC_ENERGY: FactorEntry =
    entry("generic_fuel", 2.5, "L", "Generic liquid fuel average (EPA 2025)");
const GENERIC_TRANSPORT: FactorEntry =
    entry("generic_vehicle", 0.21, "km", "Generic light commercial vehicle (DEFRA 2025)");
const GENERIC_FOOD: FactorEntry = entry("generic_meal", 3.5, "meal", "WRAP catering average");
const GENERIC_WASTE: FactorEntry = entry("generic_waste", 0.5, "kg", "EPA WARM 2025 landfill");

/// All keyed entries for a category.
pub fn entries(category: ItemCategory) -> &'static [FactorEntry] {
    match category {
        ItemCategory::Materials => MATERIALS,
        ItemCategory::Energy => ENERGY,
        ItemCategory::Transportation => TRANSPORTATION,
        ItemCategory::Food => FOOD,
        ItemCategory::Waste => WASTE,
    }
}

/// Look up a specific factor. Keys are case-insensitive.
pub fn lookup(category: ItemCategory, key: &str) -> Option<FactorEntry> {
    let key = key.to_lowercase();
    entries(category).iter().find(|e| e.key == key).copied()
}

/// Documented fallback factor used when no specific key matches.
pub fn generic(category: ItemCategory) -> FactorEntry {
    match category {
        ItemCategory::Materials => GENERIC_MATERIAL,
        ItemCategory::Energy => GENERIC_ENERGY,
        ItemCategory::Transportation => GENERIC_TRANSPORT,
        ItemCategory::Food => GENERIC_FOOD,
        ItemCategory::Waste => GENERIC_WASTE,
    }
}

/// Find a key in any category.
pub fn quick_lookup(key: &str) -> Option<(ItemCategory, FactorEntry)> {
    const ORDER: [ItemCategory; 5] = [
        ItemCategory::Materials,
        ItemCategory::Energy,
        ItemCategory::Transportation,
        ItemCategory::Food,
        ItemCategory::Waste,
    ];
    ORDER
        .into_iter()
        .find_map(|c| lookup(c, key).map(|e| (c, e)))
}
