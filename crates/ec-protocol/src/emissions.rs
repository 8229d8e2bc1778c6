use serde::{Deserialize, Serialize};

// ── Event categories ──────────────────────────────────────────

/// Reporting category of an event footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Venue,
    Transportation,
    Energy,
    Catering,
    Waste,
    Production,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Venue,
        Self::Transportation,
        Self::Energy,
        Self::Catering,
        Self::Waste,
        Self::Production,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::Transportation => "transportation",
            Self::Energy => "energy",
            Self::Catering => "catering",
            Self::Waste => "waste",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emissions per category, in tCO2e.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub venue: f64,
    pub transportation: f64,
    pub energy: f64,
    pub catering: f64,
    pub waste: f64,
    pub production: f64,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Venue => self.venue,
            Category::Transportation => self.transportation,
            Category::Energy => self.energy,
            Category::Catering => self.catering,
            Category::Waste => self.waste,
            Category::Production => self.production,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::Venue => &mut self.venue,
            Category::Transportation => &mut self.transportation,
            Category::Energy => &mut self.energy,
            Category::Catering => &mut self.catering,
            Category::Waste => &mut self.waste,
            Category::Production => &mut self.production,
        }
    }

    /// Iterate `(category, value)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }
}

// ── Line items ────────────────────────────────────────────────

/// Category of a single translated free-text item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Materials,
    Energy,
    Transportation,
    Food,
    Waste,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Materials => "materials",
            Self::Energy => "energy",
            Self::Transportation => "transportation",
            Self::Food => "food",
            Self::Waste => "waste",
        }
    }

    /// Event category a line item of this kind is reported under.
    pub fn event_category(&self) -> Category {
        match self {
            Self::Materials => Category::Production,
            Self::Energy => Category::Energy,
            Self::Transportation => Category::Transportation,
            Self::Food => Category::Catering,
            Self::Waste => Category::Waste,
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One translated activity and its emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemEmission {
    pub description: String,
    /// Activity quantity in `unit` (already normalized).
    pub quantity: f64,
    pub unit: String,
    /// kg CO2e per `factor_unit`.
    pub factor: f64,
    pub factor_unit: String,
    /// Emissions in tCO2e.
    pub total_emissions: f64,
    pub category: ItemCategory,
    /// Extraction confidence times lookup specificity, in [0, 1].
    pub confidence: f64,
    /// Provenance of the emission factor.
    pub source: String,
    /// Set when no specific factor matched and a generic one was used.
    #[serde(default)]
    pub catalog_review: bool,
}

// ── Scopes ────────────────────────────────────────────────────

/// GHG Protocol scope subtotals in tCO2e.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeTotals {
    pub scope1: f64,
    pub scope2: f64,
    pub scope3: f64,
}

impl ScopeTotals {
    pub fn total(&self) -> f64 {
        self.scope1 + self.scope2 + self.scope3
    }
}

// ── Benchmark ─────────────────────────────────────────────────

/// Performance tier relative to industry benchmarks, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
    Poor,
}

impl PerformanceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::NeedsImprovement => "needs_improvement",
            Self::Poor => "poor",
        }
    }

    /// One-sentence reading of the tier for the organizer.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => {
                "You're among the most sustainable events of this kind. Seriously impressive work!"
            }
            Self::Good => "You're doing better than average; this event is cleaner than most.",
            Self::Average => {
                "You're right in the middle of the pack, with some good opportunities to improve."
            }
            Self::NeedsImprovement => {
                "You're above average for emissions, so big savings are within reach."
            }
            Self::Poor => {
                "Emissions are well above typical for this kind of event, which leaves plenty of room to make a difference."
            }
        }
    }
}

impl std::fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    /// Industry average tCO2e per attendee.
    pub industry_average: f64,
    /// Top-performer tCO2e per attendee.
    pub top_performers: f64,
    pub percentile: u8,
    pub performance_tier: PerformanceTier,
    #[serde(default)]
    pub message: String,
}

// ── Influence ─────────────────────────────────────────────────

/// How much control the organizer has over a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfluenceTier {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TieredEmissions {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

// ── Result ────────────────────────────────────────────────────

/// Outcome of one event calculation. Superseded, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total: f64,
    pub per_category: CategoryTotals,
    pub per_attendee: f64,
    pub scopes: ScopeTotals,
    pub benchmark: Benchmark,
    pub influence_score: f64,
    pub tiered_emissions: TieredEmissions,
}

impl Default for CalculationResult {
    /// The empty result: no emissions anywhere.
    fn default() -> Self {
        Self {
            total: 0.0,
            per_category: CategoryTotals::default(),
            per_attendee: 0.0,
            scopes: ScopeTotals::default(),
            benchmark: Benchmark {
                industry_average: 0.0,
                top_performers: 0.0,
                percentile: 0,
                performance_tier: PerformanceTier::Excellent,
                message: String::new(),
            },
            influence_score: 0.0,
            tiered_emissions: TieredEmissions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_totals_sum_and_lookup() {
        let totals = CategoryTotals {
            venue: 1.0,
            transportation: 2.0,
            energy: 3.0,
            catering: 4.0,
            waste: 0.5,
            production: 0.25,
        };
        assert_eq!(totals.get(Category::Catering), 4.0);
        assert!((totals.sum() - 10.75).abs() < 1e-12);
        assert_eq!(totals.iter().count(), 6);
    }

    #[test]
    fn get_mut_updates_category() {
        let mut totals = CategoryTotals::default();
        *totals.get_mut(Category::Waste) += 2.0;
        assert_eq!(totals.waste, 2.0);
    }

    #[test]
    fn item_category_maps_to_event_category() {
        assert_eq!(ItemCategory::Materials.event_category(), Category::Production);
        assert_eq!(ItemCategory::Food.event_category(), Category::Catering);
        assert_eq!(
            ItemCategory::Transportation.event_category(),
            Category::Transportation
        );
    }

    #[test]
    fn performance_tier_serialization() {
        let json = serde_json::to_string(&PerformanceTier::NeedsImprovement).unwrap();
        assert_eq!(json, "\"needs_improvement\"");
        assert!(PerformanceTier::Excellent < PerformanceTier::Poor);
    }

    #[test]
    fn line_item_catalog_review_defaults_false() {
        let json = r#"{
            "description": "vinyl backdrop",
            "quantity": 22.3,
            "unit": "sqm",
            "factor": 4.2,
            "factor_unit": "kg CO2e/sqm",
            "total_emissions": 0.09366,
            "category": "materials",
            "confidence": 0.85,
            "source": "ISO 14040 LCA"
        }"#;
        let item: LineItemEmission = serde_json::from_str(json).unwrap();
        assert!(!item.catalog_review);
        assert_eq!(item.category, ItemCategory::Materials);
    }

    #[test]
    fn default_result_is_empty() {
        let result = CalculationResult::default();
        assert_eq!(result.total, 0.0);
        assert_eq!(result.per_category.sum(), 0.0);
    }
}
