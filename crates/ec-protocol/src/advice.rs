use serde::{Deserialize, Serialize};

use crate::emissions::Category;

/// Implementation effort of a reduction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

impl Difficulty {
    /// Weight applied to potential savings when ranking opportunities.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Moderate => 0.7,
            Self::Challenging => 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cost {
    Free,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Immediate,
    ShortTerm,
    LongTerm,
}

/// One ranked way to lower an event's footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionOpportunity {
    pub category: Category,
    pub title: String,
    pub description: String,
    /// Emissions of the category this strategy acts on, in tCO2e.
    pub current_emissions: f64,
    /// Estimated tCO2e avoided.
    pub potential_savings: f64,
    /// Savings as a percentage of `current_emissions`.
    pub savings_percentage: f64,
    pub difficulty: Difficulty,
    pub cost: Cost,
    pub timeframe: Timeframe,
    pub implementation_steps: Vec<String>,
    /// Difficulty-weighted impact; higher ranks first.
    pub priority: f64,
}

/// The full advisor output for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionStrategy {
    pub opportunities: Vec<ReductionOpportunity>,
    pub total_potential_savings: f64,
    pub quick_wins: Vec<ReductionOpportunity>,
    pub biggest_impact: Vec<ReductionOpportunity>,
    /// Version of the savings table that produced these numbers.
    pub table_version: String,
}
