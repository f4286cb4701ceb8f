//! Unit conversion and quantity summation
//!
//! Sums a group of (quantity, unit) pairs when they share a unit family,
//! otherwise falls back to a composite listing of the original amounts.

use super::quantity::Quantity;
use super::units::{display_ladder, parse_unit, ratio, unit_by_name, ParsedUnit};

/// Result of converting and summing a group of amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertedQuantity {
    /// All entries shared a family; `amount` is in `unit` (None for bare counts)
    Summed {
        amount: Quantity,
        unit: Option<String>,
    },
    /// Incompatible or unparseable; the original amounts joined with ", "
    Composite(String),
}

impl ConvertedQuantity {
    /// Quantity string for display and persistence
    pub fn quantity_string(&self) -> String {
        match self {
            ConvertedQuantity::Summed { amount, .. } => amount.format(),
            ConvertedQuantity::Composite(s) => s.clone(),
        }
    }

    pub fn unit(&self) -> Option<&str> {
        match self {
            ConvertedQuantity::Summed { unit, .. } => unit.as_deref(),
            ConvertedQuantity::Composite(_) => None,
        }
    }

    pub fn amount(&self) -> Option<Quantity> {
        match self {
            ConvertedQuantity::Summed { amount, .. } => Some(amount.clone()),
            ConvertedQuantity::Composite(_) => None,
        }
    }
}

/// Convert and sum a group of (quantity, unit) pairs
///
/// Examples:
/// - [("2", "cups"), ("1", "cups")] -> Summed { 3, "cup" }
/// - [("1", "tbsp"), ("3", "tsp")] -> Summed { 2, "tablespoon" }
/// - [("2", "cups"), ("1", "each")] -> Composite("2 cups, 1 each")
pub fn convert_and_sum(entries: &[(&str, Option<&str>)]) -> ConvertedQuantity {
    let parsed: Vec<(Option<Quantity>, ParsedUnit)> = entries
        .iter()
        .map(|(quantity, unit)| (Quantity::parse(quantity), parse_unit(*unit)))
        .collect();

    let first = match parsed.first() {
        Some((_, unit)) => unit,
        None => return ConvertedQuantity::Composite(String::new()),
    };

    if parsed.iter().any(|(_, unit)| unit.family != first.family) {
        return ConvertedQuantity::Composite(composite(entries));
    }

    if parsed.iter().all(|(quantity, _)| quantity.is_none()) {
        return ConvertedQuantity::Composite(composite(entries));
    }

    let total = match sum_in_base(&parsed) {
        Some(total) => total,
        None => {
            tracing::warn!(
                "Quantity overflow while summing {} entries; falling back to composite",
                entries.len()
            );
            return ConvertedQuantity::Composite(composite(entries));
        }
    };

    match display_ladder(&first.family, first.system) {
        Some(ladder) => {
            for step in ladder {
                let def = match unit_by_name(step.unit) {
                    Some(def) => def,
                    None => continue,
                };
                let amount = match total.checked_div(&ratio(def.to_base)) {
                    Some(amount) => amount,
                    None => continue,
                };
                if amount >= ratio(step.min) {
                    return ConvertedQuantity::Summed {
                        amount,
                        unit: Some(def.name.to_string()),
                    };
                }
            }
            ConvertedQuantity::Composite(composite(entries))
        }
        // Count, bare and custom families have a factor of one
        None => ConvertedQuantity::Summed {
            amount: total,
            unit: first.name.clone(),
        },
    }
}

/// Sum every parsed quantity in the family's base unit
fn sum_in_base(parsed: &[(Option<Quantity>, ParsedUnit)]) -> Option<Quantity> {
    parsed
        .iter()
        .try_fold(Quantity::zero(), |acc, (quantity, unit)| match quantity {
            Some(q) => acc.checked_add(&q.checked_mul(&unit.factor)?),
            None => Some(acc),
        })
}

/// Join the original "quantity unit" pairs in input order
fn composite(entries: &[(&str, Option<&str>)]) -> String {
    entries
        .iter()
        .map(|(quantity, unit)| {
            format!("{} {}", quantity.trim(), unit.unwrap_or("").trim())
                .trim()
                .to_string()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summed(result: &ConvertedQuantity) -> (String, Option<&str>) {
        match result {
            ConvertedQuantity::Summed { amount, unit } => (amount.format(), unit.as_deref()),
            other => panic!("expected summed, got {:?}", other),
        }
    }

    #[test]
    fn test_same_unit_sums() {
        let result = convert_and_sum(&[("2", Some("cups")), ("1", Some("cups"))]);
        assert_eq!(summed(&result), ("3".to_string(), Some("cup")));
    }

    #[test]
    fn test_mixed_volume_units_convert() {
        let result = convert_and_sum(&[("1", Some("tbsp")), ("3", Some("tsp"))]);
        assert_eq!(summed(&result), ("2".to_string(), Some("tablespoon")));

        // 8 tbsp is half a cup, which crosses the quarter-cup rung
        let result = convert_and_sum(&[("4", Some("tbsp")), ("4", Some("tablespoons"))]);
        assert_eq!(summed(&result), ("0.5".to_string(), Some("cup")));
    }

    #[test]
    fn test_small_volumes_stay_small() {
        let result = convert_and_sum(&[("1/2", Some("tsp")), ("1/4", Some("teaspoon"))]);
        assert_eq!(summed(&result), ("0.75".to_string(), Some("teaspoon")));
    }

    #[test]
    fn test_gallon_rung() {
        let result = convert_and_sum(&[("1", Some("gallon")), ("8", Some("cups"))]);
        assert_eq!(summed(&result), ("1.5".to_string(), Some("gallon")));
    }

    #[test]
    fn test_weight_units_convert() {
        let result = convert_and_sum(&[("8", Some("oz")), ("1/2", Some("lb"))]);
        assert_eq!(summed(&result), ("1".to_string(), Some("pound")));

        let result = convert_and_sum(&[("4", Some("oz"))]);
        assert_eq!(summed(&result), ("4".to_string(), Some("ounce")));
    }

    #[test]
    fn test_metric_system_follows_first_entry() {
        let result = convert_and_sum(&[("500", Some("g")), ("0.75", Some("kg"))]);
        assert_eq!(summed(&result), ("1.25".to_string(), Some("kilogram")));

        let result = convert_and_sum(&[("250", Some("ml")), ("250", Some("ml"))]);
        assert_eq!(summed(&result), ("500".to_string(), Some("milliliter")));
    }

    #[test]
    fn test_fractions_sum_exactly() {
        let result = convert_and_sum(&[
            ("1/3", Some("cup")),
            ("1/3", Some("cup")),
            ("1/3", Some("cup")),
        ]);
        assert_eq!(summed(&result), ("1".to_string(), Some("cup")));
    }

    #[test]
    fn test_bare_counts_sum() {
        let result = convert_and_sum(&[("2", None), ("3", Some(""))]);
        assert_eq!(summed(&result), ("5".to_string(), None));
    }

    #[test]
    fn test_custom_units_only_match_themselves() {
        let result = convert_and_sum(&[("1", Some("pinch")), ("2", Some("pinches"))]);
        assert_eq!(summed(&result), ("3".to_string(), Some("pinch")));

        let result = convert_and_sum(&[("1", Some("pinch")), ("1", Some("dash"))]);
        assert_eq!(result, ConvertedQuantity::Composite("1 pinch, 1 dash".to_string()));
    }

    #[test]
    fn test_incompatible_families_are_composite() {
        let result = convert_and_sum(&[("2", Some("cups")), ("1", Some("each"))]);
        assert_eq!(result, ConvertedQuantity::Composite("2 cups, 1 each".to_string()));
        assert_eq!(result.unit(), None);
        assert!(result.quantity_string().contains(", "));
    }

    #[test]
    fn test_bare_does_not_match_each() {
        let result = convert_and_sum(&[("2", None), ("1", Some("each"))]);
        assert_eq!(result, ConvertedQuantity::Composite("2, 1 each".to_string()));
    }

    #[test]
    fn test_unparseable_quantities_contribute_zero() {
        let result = convert_and_sum(&[("a handful", Some("cup")), ("2", Some("cups"))]);
        assert_eq!(summed(&result), ("2".to_string(), Some("cup")));
    }

    #[test]
    fn test_all_unparseable_passes_through() {
        let result = convert_and_sum(&[("to taste", None)]);
        assert_eq!(result, ConvertedQuantity::Composite("to taste".to_string()));

        let result = convert_and_sum(&[("", None)]);
        assert_eq!(result.quantity_string(), "");
    }

    #[test]
    fn test_overflow_falls_back_to_composite() {
        // 1e37 gallons does not fit in milliliters
        let huge = "10000000000000000000000000000000000000";
        let result = convert_and_sum(&[(huge, Some("gallons")), ("1", Some("cup"))]);
        assert_eq!(
            result,
            ConvertedQuantity::Composite(format!("{} gallons, 1 cup", huge))
        );
        assert_eq!(result.amount(), None);
        assert_eq!(result.unit(), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convert_and_sum(&[]), ConvertedQuantity::Composite(String::new()));
    }
}
