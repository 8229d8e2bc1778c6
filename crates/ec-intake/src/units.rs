//! Unit normalization.
//!
//! Every quantity is converted to one canonical unit per dimension before a
//! factor is applied: meters, square meters, kilograms, liters, kilometers,
//! kWh. Counts pass through unchanged.

use serde::Serialize;

/// Default height of a backdrop or banner given only by its length (8 ft).
pub const BACKDROP_HEIGHT_M: f64 = 8.0 * 0.3048;

/// Area of one standard banner when only a count is given (4 ft × 8 ft).
pub const STANDARD_BANNER_SQM: f64 = 2.9729;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Length,
    Area,
    Mass,
    Volume,
    Distance,
    Energy,
    Count,
}

/// A value in its dimension's canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: &'static str,
    pub dimension: Dimension,
}

impl Quantity {
    fn new(value: f64, unit: &'static str, dimension: Dimension) -> Self {
        Self {
            value,
            unit,
            dimension,
        }
    }
}

/// Convert `value` in `unit` to the canonical unit of its dimension.
///
/// An empty unit is a plain count. Returns None for units we do not know.
pub fn normalize(value: f64, unit: &str) -> Option<Quantity> {
    use Dimension::*;

    let unit = unit.trim().to_lowercase();
    let quantity = match unit.as_str() {
        "" | "each" | "x" | "count" | "pcs" | "sheet" | "sheets" | "bottle" | "bottles"
        | "meal" | "meals" => Quantity::new(value, "count", Count),

        "m" | "meter" | "meters" | "metre" | "metres" => Quantity::new(value, "m", Length),
        "ft" | "foot" | "feet" => Quantity::new(value * 0.3048, "m", Length),
        "in" | "inch" | "inches" => Quantity::new(value * 0.0254, "m", Length),
        "yd" | "yard" | "yards" => Quantity::new(value * 0.9144, "m", Length),
        "cm" => Quantity::new(value * 0.01, "m", Length),

        "sqm" | "m2" | "square meters" => Quantity::new(value, "sqm", Area),
        "sqft" | "square feet" => Quantity::new(value * 0.092903, "sqm", Area),
        "sqyd" | "square yards" => Quantity::new(value * 0.836127, "sqm", Area),

        "kg" | "kgs" | "kilogram" | "kilograms" => Quantity::new(value, "kg", Mass),
        "lb" | "lbs" | "pound" | "pounds" => Quantity::new(value * 0.453592, "kg", Mass),
        "g" | "gram" | "grams" => Quantity::new(value * 0.001, "kg", Mass),
        "t" | "ton" | "tons" | "tonne" | "tonnes" => Quantity::new(value * 1000.0, "kg", Mass),

        "l" | "liter" | "liters" | "litre" | "litres" => Quantity::new(value, "L", Volume),
        "gal" | "gallon" | "gallons" => Quantity::new(value * 3.78541, "L", Volume),
        "ml" => Quantity::new(value * 0.001, "L", Volume),

        "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
            Quantity::new(value, "km", Distance)
        }
        "mi" | "mile" | "miles" => Quantity::new(value * 1.60934, "km", Distance),

        "kwh" => Quantity::new(value, "kWh", Energy),
        "mwh" => Quantity::new(value * 1000.0, "kWh", Energy),

        _ => return None,
    };
    Some(quantity)
}

/// Express a normalized quantity in the unit an emission factor expects.
///
/// Handles the cross-dimension cases the catalog needs: a banner length
/// becomes an area with the default height, a count of banners becomes a
/// standard area, a length in meters becomes a distance. Counts are only
/// accepted by per-piece factors. Returns None when the quantity cannot be
/// expressed in `factor_unit`.
pub fn to_factor_unit(quantity: Quantity, factor_unit: &str) -> Option<f64> {
    match (factor_unit, quantity.dimension) {
        ("sqm", Dimension::Area) => Some(quantity.value),
        ("sqm", Dimension::Length) => Some(quantity.value * BACKDROP_HEIGHT_M),
        ("sqm", Dimension::Count) => Some(quantity.value * STANDARD_BANNER_SQM),
        ("kg", Dimension::Mass) => Some(quantity.value),
        ("L", Dimension::Volume) => Some(quantity.value),
        ("kWh", Dimension::Energy) => Some(quantity.value),
        ("km" | "pkm", Dimension::Distance) => Some(quantity.value),
        ("km" | "pkm", Dimension::Length) => Some(quantity.value / 1000.0),
        ("meal" | "bottle" | "sheet", Dimension::Count) => Some(quantity.value),
        _ => None,
    }
}
