//! Ingredient consolidation
//!
//! Merges raw ingredient entries from one or more recipes into a
//! deduplicated, unit-normalized, categorized shopping list.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::category::{categorize, is_bulk_buying};
use super::converter::convert_and_sum;
use super::names::canonicalize;

/// A raw ingredient entry as supplied by a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientItem {
    pub name: String,
    /// Amount as written ("2", "1/2", "1 1/2"); may be empty
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: String,
    /// None means a bare count ("2 apples")
    #[serde(default, deserialize_with = "deserialize_unit")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "deserialize_category")]
    pub category: Option<String>,
}

impl IngredientItem {
    pub fn new(name: &str, quantity: &str, unit: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.map(str::to_string),
            category: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

/// The raw tuple kept for traceability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalIngredient {
    pub name: String,
    pub quantity: String,
    pub unit: Option<String>,
}

/// One line of a consolidated shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedIngredient {
    /// Canonical name
    pub name: String,
    /// Summed amount, or the original amounts joined with ", "
    pub quantity: String,
    pub unit: Option<String>,
    pub category: String,
    pub bulk_buying: bool,
    pub original_ingredients: Vec<OriginalIngredient>,
}

/// Merge ingredient entries into a consolidated list
///
/// Entries are grouped by canonical name. Output order follows the first
/// appearance of each canonical name. Never fails: unparseable quantities
/// contribute nothing, unknown units only combine with themselves and
/// unknown names stand for themselves.
pub fn consolidate_ingredients(items: &[IngredientItem]) -> Vec<ConsolidatedIngredient> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&IngredientItem>> = HashMap::new();

    for item in items {
        let key = canonicalize(&item.name);
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(item);
    }

    let consolidated: Vec<ConsolidatedIngredient> = order
        .into_iter()
        .filter_map(|name| {
            let members = groups.remove(&name)?;
            Some(consolidate_group(name, &members))
        })
        .collect();

    tracing::debug!(
        "Consolidated {} ingredient entries into {} items",
        items.len(),
        consolidated.len()
    );

    consolidated
}

fn consolidate_group(name: String, members: &[&IngredientItem]) -> ConsolidatedIngredient {
    let pairs: Vec<(&str, Option<&str>)> = members
        .iter()
        .map(|item| (item.quantity.as_str(), item.unit.as_deref()))
        .collect();
    let converted = convert_and_sum(&pairs);

    let category = members
        .iter()
        .filter_map(|item| item.category.as_deref())
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| categorize(&name).to_string());

    let bulk_buying = is_bulk_buying(&category, converted.amount(), converted.unit());

    ConsolidatedIngredient {
        quantity: converted.quantity_string(),
        unit: converted.unit().map(str::to_string),
        category,
        bulk_buying,
        original_ingredients: members
            .iter()
            .map(|item| OriginalIngredient {
                name: item.name.clone(),
                quantity: item.quantity.clone(),
                unit: item.unit.clone(),
            })
            .collect(),
        name,
    }
}

// ============================================================================
// Input normalization
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityInput {
    Text(String),
    Integer(i64),
    Float(f64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryInput {
    One(String),
    Many(Vec<Option<String>>),
}

/// Quantities may arrive as strings or JSON numbers
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<QuantityInput>::deserialize(deserializer)? {
        Some(QuantityInput::Text(s)) => s,
        Some(QuantityInput::Integer(n)) => n.to_string(),
        Some(QuantityInput::Float(f)) => f.to_string(),
        None => String::new(),
    })
}

/// Blank units are treated as absent
fn deserialize_unit<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let unit = Option::<String>::deserialize(deserializer)?;
    Ok(unit.filter(|u| !u.trim().is_empty()))
}

/// Categories may be a string or a list of strings; the first non-empty wins
fn deserialize_category<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let category = match Option::<CategoryInput>::deserialize(deserializer)? {
        Some(CategoryInput::One(s)) => Some(s),
        Some(CategoryInput::Many(list)) => list
            .into_iter()
            .flatten()
            .find(|c| !c.trim().is_empty()),
        None => None,
    };
    Ok(category.filter(|c| !c.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: &str, unit: Option<&str>) -> IngredientItem {
        IngredientItem::new(name, quantity, unit)
    }

    #[test]
    fn test_empty_input() {
        assert!(consolidate_ingredients(&[]).is_empty());
    }

    #[test]
    fn test_compatible_units_sum() {
        let result = consolidate_ingredients(&[
            item("tomato", "2", Some("cups")),
            item("tomato", "1", Some("cups")),
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "tomato");
        assert_eq!(result[0].quantity, "3");
        assert_eq!(result[0].unit.as_deref(), Some("cup"));
        assert_eq!(result[0].original_ingredients.len(), 2);
    }

    #[test]
    fn test_synonyms_merge() {
        let result = consolidate_ingredients(&[
            item("roma tomatoes", "2", None),
            item("cherry tomatoes", "1", Some("cup")),
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "tomato");
        assert_eq!(result[0].original_ingredients.len(), 2);
        assert_eq!(result[0].original_ingredients[0].name, "roma tomatoes");
        assert_eq!(result[0].original_ingredients[1].unit.as_deref(), Some("cup"));
    }

    #[test]
    fn test_colored_names_merge_only_with_the_same_product() {
        let result = consolidate_ingredients(&[
            item("red bell pepper", "1", None),
            item("red pepper", "2", None),
            item("green peppers", "1", None),
            item("black pepper", "1", Some("tsp")),
            item("red wine", "1", Some("cup")),
            item("white wine", "1", Some("cup")),
            item("egg whites", "2", None),
            item("eggs", "3", None),
        ]);

        let names: Vec<&str> = result.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["bell pepper", "black pepper", "red wine", "white wine", "egg white", "egg"]
        );
        assert_eq!(result[0].quantity, "4");
        assert_eq!(result[0].category, "produce");
        assert_eq!(result[2].quantity, "1");
        assert_eq!(result[4].quantity, "2");
        assert_eq!(result[5].quantity, "3");
    }

    #[test]
    fn test_incompatible_units_fall_back_to_composite() {
        let result = consolidate_ingredients(&[
            item("tomato", "2", Some("cups")),
            item("tomato", "1", Some("each")),
        ]);
        assert_eq!(result.len(), 1);
        assert!(result[0].quantity.contains(','));
        assert_eq!(result[0].quantity, "2 cups, 1 each");
        assert_eq!(result[0].unit, None);
        assert!(!result[0].bulk_buying);
    }

    #[test]
    fn test_category_inference() {
        let result = consolidate_ingredients(&[
            item("apple", "1", None),
            item("milk", "1", Some("cup")),
            item("chicken breast", "1", Some("lb")),
            item("olive oil", "2", Some("tbsp")),
        ]);
        let pairs: Vec<(&str, &str)> = result
            .iter()
            .map(|c| (c.name.as_str(), c.category.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("apple", "produce"),
                ("milk", "dairy"),
                ("chicken", "meat"),
                ("oil", "pantry"),
            ]
        );
    }

    #[test]
    fn test_explicit_category_wins() {
        let result = consolidate_ingredients(&[
            item("apple", "3", None),
            item("apples", "2", None).with_category("snacks"),
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "snacks");
    }

    #[test]
    fn test_first_explicit_category_wins() {
        let result = consolidate_ingredients(&[
            item("rice", "1", Some("cup")).with_category("  "),
            item("rice", "1", Some("cup")).with_category("bulk bin"),
            item("rice", "1", Some("cup")).with_category("asian"),
        ]);
        assert_eq!(result[0].category, "bulk bin");
    }

    #[test]
    fn test_bulk_flag() {
        let result = consolidate_ingredients(&[
            item("all-purpose flour", "3", Some("cups")),
            item("flour", "2", Some("cups")),
            item("sugar", "4", Some("pounds")),
            item("salt", "1", Some("tsp")),
        ]);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].name, "flour");
        assert_eq!(result[0].quantity, "5");
        assert!(result[0].bulk_buying);
        assert_eq!(result[1].name, "sugar");
        assert!(result[1].bulk_buying);
        assert!(!result[2].bulk_buying);
    }

    #[test]
    fn test_grouping_is_complete_and_unique() {
        let items = vec![
            item("Garlic cloves", "3", None),
            item("garlic", "1", Some("tbsp")),
            item("  GARLIC ", "2", None),
            item("basil", "1", Some("cup")),
            item("fresh basil leaves", "1/2", Some("cup")),
            item("unknown thing", "1", Some("box")),
            item("unknown thing", "", None),
        ];
        let result = consolidate_ingredients(&items);

        let total: usize = result.iter().map(|c| c.original_ingredients.len()).sum();
        assert_eq!(total, items.len());

        let mut names: Vec<&str> = result.iter().map(|c| c.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), result.len());

        // First-seen ordering
        assert_eq!(result[0].name, "garlic");
        assert_eq!(result[1].name, "basil");
        assert_eq!(result[1].quantity, "1.5");
        assert_eq!(result[2].name, "unknown thing");
    }

    #[test]
    fn test_malformed_input_passes_through() {
        let result = consolidate_ingredients(&[
            item("zorbleberry jam", "some", Some("blob")),
            item("", "", None),
        ]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].quantity, "some blob");
        assert_eq!(result[0].category, "other");
        assert!(!result[0].bulk_buying);
        assert_eq!(result[1].name, "");
        assert_eq!(result[1].category, "other");
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = consolidate_ingredients(&[item("egg", "12", None)]);
        let json = serde_json::to_value(&result[0]).unwrap();
        assert_eq!(json["bulkBuying"], serde_json::json!(false));
        assert_eq!(json["originalIngredients"][0]["name"], "egg");
        assert_eq!(json["unit"], serde_json::Value::Null);
    }

    #[test]
    fn test_lenient_input_deserialization() {
        let items: Vec<IngredientItem> = serde_json::from_str(
            r#"[
                {"name": "milk", "quantity": 2, "unit": "cups", "category": ["dairy", "cold"]},
                {"name": "salt", "quantity": null, "unit": "  "},
                {"name": "rice", "quantity": 1.5, "category": [null, "", "grains"]},
                {"name": "apple"}
            ]"#,
        )
        .unwrap();

        assert_eq!(items[0].quantity, "2");
        assert_eq!(items[0].category.as_deref(), Some("dairy"));
        assert_eq!(items[1].quantity, "");
        assert_eq!(items[1].unit, None);
        assert_eq!(items[2].quantity, "1.5");
        assert_eq!(items[2].category.as_deref(), Some("grains"));
        assert_eq!(items[3], IngredientItem::new("apple", "", None));
    }

    #[test]
    fn test_long_float_quantities_are_summed() {
        let items: Vec<IngredientItem> = serde_json::from_str(
            r#"[
                {"name": "flour", "quantity": 0.3333333333333333, "unit": "cup"},
                {"name": "flour", "quantity": 1, "unit": "cup"}
            ]"#,
        )
        .unwrap();

        let result = consolidate_ingredients(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].quantity, "1.33");
        assert_eq!(result[0].unit.as_deref(), Some("cup"));
    }
}
