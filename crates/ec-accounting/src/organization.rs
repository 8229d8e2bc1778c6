//! Organization-level scope 1/2/3 accounting.
//!
//! Independent of the event calculator: every line is an activity amount
//! times a fixed kg factor, divided by 1000. Industry and size multipliers
//! touch only scope 3 procurement and travel lines.

use ec_protocol::ScopeTotals;
use serde::{Deserialize, Serialize};

use crate::error::{AccountingError, AccountingResult};

// kg CO2e per unit of activity.
const NATURAL_GAS_KWH: f64 = 0.185;
const PROPANE_KG: f64 = 2.96;
const FUEL_OIL_L: f64 = 2.52;
const GASOLINE_L: f64 = 2.31;
const DIESEL_L: f64 = 2.68;
const ELECTRICITY_KWH: f64 = 0.475;
const HEATING_KWH: f64 = 0.215;
const COOLING_KWH: f64 = 0.475;
const STEAM_KWH: f64 = 0.185;
const BUSINESS_TRAVEL_KM: f64 = 0.21;
const COMMUTING_KM: f64 = 0.18;
const WASTE_KG: f64 = 0.5;
const PAPER_KG: f64 = 1.2;
const WATER_L: f64 = 0.0003;
const PURCHASED_GOODS_USD: f64 = 0.0005;
const TRANSPORT_DISTRIBUTION_KM: f64 = 0.12;
const INVESTMENTS_USD: f64 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Manufacturing,
    Energy,
    Transportation,
    Construction,
    Agriculture,
    Technology,
    Finance,
    Healthcare,
    Retail,
    #[default]
    Other,
}

impl Industry {
    /// Scales purchased goods only.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Manufacturing => 1.5,
            Self::Energy => 2.0,
            Self::Transportation => 1.8,
            Self::Construction => 1.3,
            Self::Agriculture => 1.2,
            Self::Technology => 0.8,
            Self::Finance => 0.7,
            Self::Healthcare => 0.9,
            Self::Retail => 1.1,
            Self::Other => 1.0,
        }
    }
}

/// Headcount band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrganizationSize {
    #[serde(rename = "1-10")]
    Micro,
    #[serde(rename = "11-50")]
    Small,
    #[default]
    #[serde(rename = "51-200")]
    Medium,
    #[serde(rename = "201-500")]
    Large,
    #[serde(rename = "501-1000")]
    Enterprise,
    #[serde(rename = "1000+")]
    Corporation,
}

impl OrganizationSize {
    /// Scales business travel and commuting only.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Micro => 0.5,
            Self::Small => 0.8,
            Self::Medium => 1.0,
            Self::Large => 1.2,
            Self::Enterprise => 1.5,
            Self::Corporation => 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scope1Inputs {
    pub natural_gas_kwh: f64,
    pub propane_kg: f64,
    pub fuel_oil_liters: f64,
    pub gasoline_liters: f64,
    pub diesel_liters: f64,
    /// Refrigerant leakage, already in kg CO2e.
    pub refrigerants_kg_co2e: f64,
    /// Process emissions, already in tCO2e.
    pub process_emissions_t: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scope2Inputs {
    pub electricity_kwh: f64,
    /// Overrides the default grid factor (kg CO2e/kWh).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_emission_factor: Option<f64>,
    pub heating_kwh: f64,
    pub cooling_kwh: f64,
    pub steam_kwh: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scope3Inputs {
    pub business_travel_km: f64,
    pub employee_commuting_km: f64,
    pub waste_kg: f64,
    pub paper_kg: f64,
    pub water_liters: f64,
    pub purchased_goods_usd: f64,
    pub transport_distribution_km: f64,
    pub investments_usd: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationInput {
    #[serde(default)]
    pub industry: Industry,
    #[serde(default)]
    pub size: OrganizationSize,
    #[serde(default)]
    pub scope1: Scope1Inputs,
    #[serde(default)]
    pub scope2: Scope2Inputs,
    #[serde(default)]
    pub scope3: Scope3Inputs,
}

/// One non-zero line of an organization footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub scope: u8,
    pub source: String,
    /// tCO2e.
    pub emissions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationResult {
    pub scopes: ScopeTotals,
    pub total: f64,
    pub breakdown: Vec<BreakdownLine>,
}

/// Accumulates non-zero lines per scope.
#[derive(Default)]
struct Ledger {
    scopes: ScopeTotals,
    breakdown: Vec<BreakdownLine>,
}

impl Ledger {
    fn add(&mut self, scope: u8, source: &str, tonnes: f64) {
        if tonnes <= 0.0 {
            return;
        }
        match scope {
            1 => self.scopes.scope1 += tonnes,
            2 => self.scopes.scope2 += tonnes,
            _ => self.scopes.scope3 += tonnes,
        }
        self.breakdown.push(BreakdownLine {
            scope,
            source: source.to_string(),
            emissions: tonnes,
        });
    }
}

/// Scope 1/2/3 totals from direct activity inputs.
pub fn calculate_organization(input: &OrganizationInput) -> AccountingResult<OrganizationResult> {
    validate(input)?;

    let s1 = &input.scope1;
    let s2 = &input.scope2;
    let s3 = &input.scope3;
    let size = input.size.multiplier();
    let industry = input.industry.multiplier();
    let grid = s2.grid_emission_factor.unwrap_or(ELECTRICITY_KWH);

    let mut ledger = Ledger::default();

    ledger.add(1, "natural_gas", s1.natural_gas_kwh * NATURAL_GAS_KWH / 1000.0);
    ledger.add(1, "propane", s1.propane_kg * PROPANE_KG / 1000.0);
    ledger.add(1, "fuel_oil", s1.fuel_oil_liters * FUEL_OIL_L / 1000.0);
    ledger.add(1, "gasoline", s1.gasoline_liters * GASOLINE_L / 1000.0);
    ledger.add(1, "diesel", s1.diesel_liters * DIESEL_L / 1000.0);
    ledger.add(1, "refrigerants", s1.refrigerants_kg_co2e / 1000.0);
    ledger.add(1, "process_emissions", s1.process_emissions_t);

    ledger.add(2, "electricity", s2.electricity_kwh * grid / 1000.0);
    ledger.add(2, "heating", s2.heating_kwh * HEATING_KWH / 1000.0);
    ledger.add(2, "cooling", s2.cooling_kwh * COOLING_KWH / 1000.0);
    ledger.add(2, "steam", s2.steam_kwh * STEAM_KWH / 1000.0);

    ledger.add(
        3,
        "business_travel",
        s3.business_travel_km * BUSINESS_TRAVEL_KM * size / 1000.0,
    );
    ledger.add(
        3,
        "employee_commuting",
        s3.employee_commuting_km * COMMUTING_KM * size / 1000.0,
    );
    ledger.add(3, "waste", s3.waste_kg * WASTE_KG / 1000.0);
    ledger.add(3, "paper", s3.paper_kg * PAPER_KG / 1000.0);
    ledger.add(3, "water", s3.water_liters * WATER_L / 1000.0);
    ledger.add(
        3,
        "purchased_goods",
        s3.purchased_goods_usd * PURCHASED_GOODS_USD * industry / 1000.0,
    );
    ledger.add(
        3,
        "transport_distribution",
        s3.transport_distribution_km * TRANSPORT_DISTRIBUTION_KM / 1000.0,
    );
    ledger.add(3, "investments", s3.investments_usd * INVESTMENTS_USD / 1000.0);

    Ok(OrganizationResult {
        total: ledger.scopes.total(),
        scopes: ledger.scopes,
        breakdown: ledger.breakdown,
    })
}

fn validate(input: &OrganizationInput) -> AccountingResult<()> {
    let s1 = &input.scope1;
    let s2 = &input.scope2;
    let s3 = &input.scope3;
    let fields = [
        ("scope1.natural_gas_kwh", s1.natural_gas_kwh),
        ("scope1.propane_kg", s1.propane_kg),
        ("scope1.fuel_oil_liters", s1.fuel_oil_liters),
        ("scope1.gasoline_liters", s1.gasoline_liters),
        ("scope1.diesel_liters", s1.diesel_liters),
        ("scope1.refrigerants_kg_co2e", s1.refrigerants_kg_co2e),
        ("scope1.process_emissions_t", s1.process_emissions_t),
        ("scope2.electricity_kwh", s2.electricity_kwh),
        ("scope2.grid_emission_factor", s2.grid_emission_factor.unwrap_or(0.0)),
        ("scope2.heating_kwh", s2.heating_kwh),
        ("scope2.cooling_kwh", s2.cooling_kwh),
        ("scope2.steam_kwh", s2.steam_kwh),
        ("scope3.business_travel_km", s3.business_travel_km),
        ("scope3.employee_commuting_km", s3.employee_commuting_km),
        ("scope3.waste_kg", s3.waste_kg),
        ("scope3.paper_kg", s3.paper_kg),
        ("scope3.water_liters", s3.water_liters),
        ("scope3.purchased_goods_usd", s3.purchased_goods_usd),
        ("scope3.transport_distribution_km", s3.transport_distribution_km),
        ("scope3.investments_usd", s3.investments_usd),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(AccountingError::guard(
                field,
                format!("must be a non-negative number, got {value}"),
            ));
        }
    }
    Ok(())
}

// ── Quick estimate ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    #[default]
    Corporate,
    Government,
    Ngo,
    University,
    Event,
}

impl OrganizationType {
    fn multiplier(&self) -> f64 {
        match self {
            Self::Corporate => 1.0,
            Self::Government => 0.8,
            Self::Ngo => 0.6,
            Self::University => 0.7,
            Self::Event => 0.3,
        }
    }
}

/// Annual tCO2e baseline by industry and size. Industries without their own
/// row use the technology row.
fn industry_baseline(industry: Industry, size: OrganizationSize) -> f64 {
    let row: [f64; 6] = match industry {
        Industry::Manufacturing => [15.0, 75.0, 300.0, 900.0, 1800.0, 4500.0],
        Industry::Retail => [8.0, 40.0, 160.0, 480.0, 960.0, 2400.0],
        Industry::Finance => [6.0, 30.0, 120.0, 360.0, 720.0, 1800.0],
        Industry::Healthcare => [10.0, 50.0, 200.0, 600.0, 1200.0, 3000.0],
        _ => [5.0, 25.0, 100.0, 300.0, 600.0, 1500.0],
    };
    let index = match size {
        OrganizationSize::Micro => 0,
        OrganizationSize::Small => 1,
        OrganizationSize::Medium => 2,
        OrganizationSize::Large => 3,
        OrganizationSize::Enterprise => 4,
        OrganizationSize::Corporation => 5,
    };
    row[index]
}

/// Size-based estimate with a typical 25/45/30 scope split.
pub fn estimate_organization(
    org_type: OrganizationType,
    size: OrganizationSize,
    industry: Industry,
) -> OrganizationResult {
    let total = industry_baseline(industry, size) * org_type.multiplier();
    let scopes = ScopeTotals {
        scope1: total * 0.25,
        scope2: total * 0.45,
        scope3: total * 0.30,
    };
    OrganizationResult {
        total,
        breakdown: vec![
            BreakdownLine {
                scope: 1,
                source: "estimated".into(),
                emissions: scopes.scope1,
            },
            BreakdownLine {
                scope: 2,
                source: "estimated".into(),
                emissions: scopes.scope2,
            },
            BreakdownLine {
                scope: 3,
                source: "estimated".into(),
                emissions: scopes.scope3,
            },
        ],
        scopes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_zero() {
        let r = calculate_organization(&OrganizationInput::default()).unwrap();
        assert_eq!(r.total, 0.0);
        assert!(r.breakdown.is_empty());
    }

    #[test]
    fn diesel_is_scope1_in_tonnes() {
        let mut input = OrganizationInput::default();
        input.scope1.diesel_liters = 1000.0;
        let r = calculate_organization(&input).unwrap();
        assert!((r.scopes.scope1 - 2.68).abs() < 1e-9);
        assert_eq!(r.breakdown[0].source, "diesel");
    }

    #[test]
    fn grid_factor_override() {
        let mut input = OrganizationInput::default();
        input.scope2.electricity_kwh = 10_000.0;
        let default = calculate_organization(&input).unwrap();
        assert!((default.scopes.scope2 - 4.75).abs() < 1e-9);

        input.scope2.grid_emission_factor = Some(0.1);
        let overridden = calculate_organization(&input).unwrap();
        assert!((overridden.scopes.scope2 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn process_emissions_already_tonnes() {
        let mut input = OrganizationInput::default();
        input.scope1.process_emissions_t = 12.5;
        input.scope1.refrigerants_kg_co2e = 500.0;
        let r = calculate_organization(&input).unwrap();
        assert!((r.scopes.scope1 - 13.0).abs() < 1e-9);
    }

    #[test]
    fn size_multiplier_scales_travel_only() {
        let mut input = OrganizationInput::default();
        input.scope3.business_travel_km = 10_000.0;
        input.scope3.waste_kg = 1000.0;
        input.size = OrganizationSize::Corporation;
        let r = calculate_organization(&input).unwrap();
        // travel 10000 × 0.21 × 2 / 1000 = 4.2, waste 0.5
        assert!((r.scopes.scope3 - 4.7).abs() < 1e-9);
    }

    #[test]
    fn industry_multiplier_scales_purchased_goods_only() {
        let mut input = OrganizationInput::default();
        input.scope3.purchased_goods_usd = 1_000_000.0;
        input.scope3.paper_kg = 100.0;
        input.industry = Industry::Energy;
        let r = calculate_organization(&input).unwrap();
        // goods 1e6 × 0.0005 × 2 / 1000 = 1.0, paper 0.12
        assert!((r.scopes.scope3 - 1.12).abs() < 1e-9);
        assert_eq!(r.scopes.scope1, 0.0);
    }

    #[test]
    fn negative_input_rejected_with_path() {
        let mut input = OrganizationInput::default();
        input.scope3.water_liters = -1.0;
        let err = calculate_organization(&input).unwrap_err();
        assert_eq!(err.field(), "scope3.water_liters");
    }

    #[test]
    fn size_band_wire_names() {
        let size: OrganizationSize = serde_json::from_str("\"1000+\"").unwrap();
        assert_eq!(size, OrganizationSize::Corporation);
        assert_eq!(serde_json::to_string(&OrganizationSize::Small).unwrap(), "\"11-50\"");
    }

    #[test]
    fn estimate_uses_baseline_and_type() {
        let r = estimate_organization(
            OrganizationType::Ngo,
            OrganizationSize::Medium,
            Industry::Manufacturing,
        );
        assert!((r.total - 180.0).abs() < 1e-9);
        assert!((r.scopes.total() - r.total).abs() < 1e-9);
    }

    #[test]
    fn estimate_falls_back_to_technology_row() {
        let r = estimate_organization(
            OrganizationType::Corporate,
            OrganizationSize::Micro,
            Industry::Agriculture,
        );
        assert_eq!(r.total, 5.0);
    }
}
