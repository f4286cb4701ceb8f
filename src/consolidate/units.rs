//! Unit types and conversion tables
//!
//! Provides the unit families used for consolidation and the exact
//! conversion factors to each family's base unit.

use serde::{Deserialize, Serialize};

use super::names::singularize;
use super::quantity::Quantity;

/// A set of units that convert into each other
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    /// Volume units (tsp, tbsp, cup, ml, ...), base milliliter
    Volume,
    /// Weight/mass units (g, oz, lb, kg), base gram
    Weight,
    /// Explicit count words (each, piece, whole)
    Count,
    /// No unit at all ("2 apples")
    Bare,
    /// Anything unrecognized; only combines with the same unit
    Custom(String),
}

/// Measurement system a unit belongs to, used to pick the display ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementSystem {
    UsCustomary,
    Metric,
}

/// A known unit with its conversion factor to the family base
#[derive(Debug, Clone, Copy)]
pub struct UnitDef {
    /// Singular display name
    pub name: &'static str,
    /// Lowercase spellings recognized on input
    pub aliases: &'static [&'static str],
    pub family: KnownFamily,
    pub system: Option<MeasurementSystem>,
    /// Base units per one of this unit, as (numerator, denominator)
    pub to_base: (i128, i128),
}

/// Families that have table entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownFamily {
    Volume,
    Weight,
    Count,
}

impl KnownFamily {
    fn to_family(self) -> UnitFamily {
        match self {
            KnownFamily::Volume => UnitFamily::Volume,
            KnownFamily::Weight => UnitFamily::Weight,
            KnownFamily::Count => UnitFamily::Count,
        }
    }
}

/// A parsed unit string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUnit {
    /// Display name (singular); None for bare quantities
    pub name: Option<String>,
    pub family: UnitFamily,
    pub system: Option<MeasurementSystem>,
    /// Base units per one of this unit
    pub factor: Quantity,
}

// ============================================================================
// Volume Conversion Constants (milliliters per unit, exact US definitions)
// ============================================================================

/// Milliliters per teaspoon: 4.92892159375
pub const ML_PER_TSP: (i128, i128) = (492_892_159_375, 100_000_000_000);
/// Milliliters per tablespoon: 3 tsp
pub const ML_PER_TBSP: (i128, i128) = (1_478_676_478_125, 100_000_000_000);
/// Milliliters per fluid ounce: 6 tsp
pub const ML_PER_FL_OZ: (i128, i128) = (2_957_352_956_250, 100_000_000_000);
/// Milliliters per cup: 48 tsp
pub const ML_PER_CUP: (i128, i128) = (23_658_823_650_000, 100_000_000_000);
/// Milliliters per pint: 96 tsp
pub const ML_PER_PINT: (i128, i128) = (47_317_647_300_000, 100_000_000_000);
/// Milliliters per quart: 192 tsp
pub const ML_PER_QUART: (i128, i128) = (94_635_294_600_000, 100_000_000_000);
/// Milliliters per gallon: 768 tsp
pub const ML_PER_GALLON: (i128, i128) = (378_541_178_400_000, 100_000_000_000);
/// Milliliters per liter
pub const ML_PER_LITER: (i128, i128) = (1000, 1);

// ============================================================================
// Weight Conversion Constants (grams per unit)
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: (i128, i128) = (1, 1000);
/// Grams per kilogram
pub const G_PER_KG: (i128, i128) = (1000, 1);
/// Grams per ounce: 28.349523125
pub const G_PER_OZ: (i128, i128) = (28_349_523_125, 1_000_000_000);
/// Grams per pound: 453.59237
pub const G_PER_LB: (i128, i128) = (45_359_237, 100_000);

use KnownFamily::{Count, Volume, Weight};
use MeasurementSystem::{Metric, UsCustomary};

/// Every recognized unit
pub const UNITS: &[UnitDef] = &[
    UnitDef { name: "teaspoon", aliases: &["tsp", "tsps", "teaspoon", "teaspoons"], family: Volume, system: Some(UsCustomary), to_base: ML_PER_TSP },
    UnitDef { name: "tablespoon", aliases: &["tbsp", "tbsps", "tbs", "tbl", "tablespoon", "tablespoons"], family: Volume, system: Some(UsCustomary), to_base: ML_PER_TBSP },
    UnitDef { name: "fluid ounce", aliases: &["fl oz", "floz", "fl. oz", "fluid ounce", "fluid ounces"], family: Volume, system: Some(UsCustomary), to_base: ML_PER_FL_OZ },
    UnitDef { name: "cup", aliases: &["c", "cup", "cups"], family: Volume, system: Some(UsCustomary), to_base: ML_PER_CUP },
    UnitDef { name: "pint", aliases: &["pt", "pint", "pints"], family: Volume, system: Some(UsCustomary), to_base: ML_PER_PINT },
    UnitDef { name: "quart", aliases: &["qt", "quart", "quarts"], family: Volume, system: Some(UsCustomary), to_base: ML_PER_QUART },
    UnitDef { name: "gallon", aliases: &["gal", "gallon", "gallons"], family: Volume, system: Some(UsCustomary), to_base: ML_PER_GALLON },
    UnitDef { name: "milliliter", aliases: &["ml", "milliliter", "milliliters", "millilitre", "millilitres"], family: Volume, system: Some(Metric), to_base: (1, 1) },
    UnitDef { name: "liter", aliases: &["l", "liter", "liters", "litre", "litres"], family: Volume, system: Some(Metric), to_base: ML_PER_LITER },
    UnitDef { name: "milligram", aliases: &["mg", "milligram", "milligrams"], family: Weight, system: Some(Metric), to_base: G_PER_MG },
    UnitDef { name: "gram", aliases: &["g", "gram", "grams", "gr"], family: Weight, system: Some(Metric), to_base: (1, 1) },
    UnitDef { name: "kilogram", aliases: &["kg", "kgs", "kilogram", "kilograms"], family: Weight, system: Some(Metric), to_base: G_PER_KG },
    UnitDef { name: "ounce", aliases: &["oz", "ounce", "ounces"], family: Weight, system: Some(UsCustomary), to_base: G_PER_OZ },
    UnitDef { name: "pound", aliases: &["lb", "lbs", "pound", "pounds"], family: Weight, system: Some(UsCustomary), to_base: G_PER_LB },
    UnitDef { name: "each", aliases: &["each", "ea", "piece", "pieces", "pc", "pcs", "whole", "item", "items", "count", "unit", "units"], family: Count, system: None, to_base: (1, 1) },
];

/// One rung of a display ladder: use `unit` once the total reaches `min` of it
#[derive(Debug, Clone, Copy)]
pub struct DisplayStep {
    pub unit: &'static str,
    pub min: (i128, i128),
}

/// US volume ladder, largest first
pub const US_VOLUME_DISPLAY: &[DisplayStep] = &[
    DisplayStep { unit: "gallon", min: (1, 1) },
    DisplayStep { unit: "cup", min: (1, 4) },
    DisplayStep { unit: "tablespoon", min: (1, 1) },
    DisplayStep { unit: "teaspoon", min: (0, 1) },
];

pub const METRIC_VOLUME_DISPLAY: &[DisplayStep] = &[
    DisplayStep { unit: "liter", min: (1, 1) },
    DisplayStep { unit: "milliliter", min: (0, 1) },
];

pub const US_WEIGHT_DISPLAY: &[DisplayStep] = &[
    DisplayStep { unit: "pound", min: (1, 1) },
    DisplayStep { unit: "ounce", min: (0, 1) },
];

pub const METRIC_WEIGHT_DISPLAY: &[DisplayStep] = &[
    DisplayStep { unit: "kilogram", min: (1, 1) },
    DisplayStep { unit: "gram", min: (0, 1) },
];

// ============================================================================
// Unit Recognition
// ============================================================================

/// Look up a known unit by its display name
pub fn unit_by_name(name: &str) -> Option<&'static UnitDef> {
    UNITS.iter().find(|def| def.name == name)
}

/// Parse an optional unit string into its family and conversion factor
///
/// Missing or blank units are bare counts. Unknown units become a custom
/// family keyed by their singular form, so "pinches" combines with "pinch".
pub fn parse_unit(unit: Option<&str>) -> ParsedUnit {
    let cleaned = match unit.map(clean_unit) {
        Some(u) if !u.is_empty() => u,
        _ => {
            return ParsedUnit {
                name: None,
                family: UnitFamily::Bare,
                system: None,
                factor: Quantity::one(),
            }
        }
    };

    if let Some(def) = UNITS.iter().find(|def| def.aliases.contains(&cleaned.as_str())) {
        return ParsedUnit {
            name: Some(def.name.to_string()),
            family: def.family.to_family(),
            system: def.system,
            factor: ratio(def.to_base),
        };
    }

    let singular = singularize(&cleaned);
    ParsedUnit {
        name: Some(singular.clone()),
        family: UnitFamily::Custom(singular),
        system: None,
        factor: Quantity::one(),
    }
}

/// Display ladder for a family and measurement system
pub fn display_ladder(
    family: &UnitFamily,
    system: Option<MeasurementSystem>,
) -> Option<&'static [DisplayStep]> {
    match (family, system) {
        (UnitFamily::Volume, Some(MeasurementSystem::Metric)) => Some(METRIC_VOLUME_DISPLAY),
        (UnitFamily::Volume, _) => Some(US_VOLUME_DISPLAY),
        (UnitFamily::Weight, Some(MeasurementSystem::Metric)) => Some(METRIC_WEIGHT_DISPLAY),
        (UnitFamily::Weight, _) => Some(US_WEIGHT_DISPLAY),
        _ => None,
    }
}

/// Build a Quantity from a table ratio
pub fn ratio(pair: (i128, i128)) -> Quantity {
    Quantity::new(pair.0, pair.1).unwrap_or(Quantity::one())
}

/// Lowercase, trim, collapse whitespace and drop a trailing period ("Tbsp.")
fn clean_unit(unit: &str) -> String {
    let lower = unit.to_lowercase();
    let collapsed = lower.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_end_matches('.').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_volume_units() {
        for spelling in ["tsp", "Teaspoons", "tbsp.", "cup", "CUPS", "ml", "l", "fl oz"] {
            assert_eq!(parse_unit(Some(spelling)).family, UnitFamily::Volume, "{}", spelling);
        }
    }

    #[test]
    fn test_parse_weight_units() {
        for spelling in ["g", "grams", "oz", "lb", "lbs", "Pounds", "kg"] {
            assert_eq!(parse_unit(Some(spelling)).family, UnitFamily::Weight, "{}", spelling);
        }
    }

    #[test]
    fn test_parse_count_units() {
        let parsed = parse_unit(Some("pieces"));
        assert_eq!(parsed.family, UnitFamily::Count);
        assert_eq!(parsed.name.as_deref(), Some("each"));
    }

    #[test]
    fn test_parse_bare_units() {
        assert_eq!(parse_unit(None).family, UnitFamily::Bare);
        assert_eq!(parse_unit(Some("")).family, UnitFamily::Bare);
        assert_eq!(parse_unit(Some("   ")).family, UnitFamily::Bare);
        assert_eq!(parse_unit(None).name, None);
    }

    #[test]
    fn test_parse_custom_units() {
        let pinch = parse_unit(Some("pinch"));
        let pinches = parse_unit(Some("Pinches"));
        assert_eq!(pinch.family, UnitFamily::Custom("pinch".to_string()));
        assert_eq!(pinch.family, pinches.family);
        assert_ne!(parse_unit(Some("can")).family, pinch.family);
    }

    #[test]
    fn test_names_are_singular() {
        assert_eq!(parse_unit(Some("cups")).name.as_deref(), Some("cup"));
        assert_eq!(parse_unit(Some("Tbsp")).name.as_deref(), Some("tablespoon"));
        assert_eq!(parse_unit(Some("lbs")).name.as_deref(), Some("pound"));
    }

    #[test]
    fn test_factors_are_consistent() {
        let tsp = ratio(ML_PER_TSP);
        let three = Quantity::from_integer(3);
        assert_eq!(tsp.checked_mul(&three), Some(ratio(ML_PER_TBSP)));
        assert_eq!(
            tsp.checked_mul(&Quantity::from_integer(48)),
            Some(ratio(ML_PER_CUP))
        );
        assert_eq!(
            ratio(G_PER_OZ).checked_mul(&Quantity::from_integer(16)),
            Some(ratio(G_PER_LB))
        );
    }

    #[test]
    fn test_display_ladder_selection() {
        let metric = display_ladder(&UnitFamily::Volume, Some(MeasurementSystem::Metric));
        assert_eq!(metric.map(|l| l[0].unit), Some("liter"));
        let us = display_ladder(&UnitFamily::Weight, Some(MeasurementSystem::UsCustomary));
        assert_eq!(us.map(|l| l[0].unit), Some("pound"));
        assert!(display_ladder(&UnitFamily::Bare, None).is_none());
    }
}
