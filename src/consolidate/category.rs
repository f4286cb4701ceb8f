//! Shopping categories and bulk-buy thresholds

use super::quantity::Quantity;
use super::units::{parse_unit, ratio, UnitFamily};

/// Category used when nothing matches
pub const DEFAULT_CATEGORY: &str = "other";

/// Keyword to category table. Multi-word keywords are matched as whole words.
pub const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    // Produce
    ("apple", "produce"),
    ("banana", "produce"),
    ("orange", "produce"),
    ("lemon", "produce"),
    ("lime", "produce"),
    ("strawberry", "produce"),
    ("blueberry", "produce"),
    ("raspberry", "produce"),
    ("grape", "produce"),
    ("avocado", "produce"),
    ("tomato", "produce"),
    ("onion", "produce"),
    ("scallion", "produce"),
    ("shallot", "produce"),
    ("garlic", "produce"),
    ("ginger", "produce"),
    ("potato", "produce"),
    ("sweet potato", "produce"),
    ("carrot", "produce"),
    ("celery", "produce"),
    ("cucumber", "produce"),
    ("zucchini", "produce"),
    ("eggplant", "produce"),
    ("bell pepper", "produce"),
    ("jalapeno", "produce"),
    ("lettuce", "produce"),
    ("spinach", "produce"),
    ("kale", "produce"),
    ("cabbage", "produce"),
    ("broccoli", "produce"),
    ("cauliflower", "produce"),
    ("mushroom", "produce"),
    ("green bean", "produce"),
    ("corn", "produce"),
    ("basil", "produce"),
    ("cilantro", "produce"),
    ("parsley", "produce"),
    ("mint", "produce"),
    ("rosemary", "produce"),
    ("thyme", "produce"),
    // Dairy
    ("milk", "dairy"),
    ("butter", "dairy"),
    ("cheese", "dairy"),
    ("cheddar", "dairy"),
    ("mozzarella", "dairy"),
    ("parmesan", "dairy"),
    ("cream", "dairy"),
    ("sour cream", "dairy"),
    ("heavy cream", "dairy"),
    ("yogurt", "dairy"),
    ("egg", "dairy"),
    // Meat
    ("chicken", "meat"),
    ("beef", "meat"),
    ("ground beef", "meat"),
    ("pork", "meat"),
    ("bacon", "meat"),
    ("sausage", "meat"),
    ("ham", "meat"),
    ("turkey", "meat"),
    ("lamb", "meat"),
    ("steak", "meat"),
    // Seafood
    ("fish", "seafood"),
    ("salmon", "seafood"),
    ("tuna", "seafood"),
    ("cod", "seafood"),
    ("shrimp", "seafood"),
    ("crab", "seafood"),
    ("scallop", "seafood"),
    // Grains
    ("rice", "grains"),
    ("pasta", "grains"),
    ("spaghetti", "grains"),
    ("noodle", "grains"),
    ("bread", "grains"),
    ("tortilla", "grains"),
    ("oat", "grains"),
    ("quinoa", "grains"),
    ("couscous", "grains"),
    // Baking
    ("flour", "baking"),
    ("sugar", "baking"),
    ("brown sugar", "baking"),
    ("powdered sugar", "baking"),
    ("baking powder", "baking"),
    ("baking soda", "baking"),
    ("yeast", "baking"),
    ("cornstarch", "baking"),
    ("vanilla", "baking"),
    ("chocolate chip", "baking"),
    ("cocoa", "baking"),
    // Pantry
    ("oil", "pantry"),
    ("vinegar", "pantry"),
    ("soy sauce", "pantry"),
    ("broth", "pantry"),
    ("stock", "pantry"),
    ("chicken broth", "pantry"),
    ("chicken stock", "pantry"),
    ("honey", "pantry"),
    ("maple syrup", "pantry"),
    ("peanut butter", "pantry"),
    ("tomato paste", "pantry"),
    ("tomato sauce", "pantry"),
    ("canned tomato", "pantry"),
    ("bean", "pantry"),
    ("lentil", "pantry"),
    ("chickpea", "pantry"),
    ("mustard", "pantry"),
    ("ketchup", "pantry"),
    ("mayonnaise", "pantry"),
    // Spices
    ("salt", "spices"),
    ("black pepper", "spices"),
    ("pepper", "spices"),
    ("red pepper flakes", "spices"),
    ("cinnamon", "spices"),
    ("cumin", "spices"),
    ("paprika", "spices"),
    ("oregano", "spices"),
    ("chili powder", "spices"),
    ("garlic powder", "spices"),
    ("onion powder", "spices"),
    ("nutmeg", "spices"),
    ("turmeric", "spices"),
    ("bay leaf", "spices"),
    // Beverages
    ("coffee", "beverages"),
    ("tea", "beverages"),
    ("juice", "beverages"),
    ("wine", "beverages"),
    ("beer", "beverages"),
    // Frozen
    ("ice cream", "frozen"),
    ("frozen pea", "frozen"),
    ("frozen vegetable", "frozen"),
];

/// Assign a category to a canonical name
///
/// An exact whole-name match wins; otherwise the longest keyword found as
/// whole word(s) inside the name. Unmatched names are "other".
pub fn categorize(canonical_name: &str) -> &'static str {
    let name = canonical_name.trim().to_lowercase();
    if name.is_empty() {
        return DEFAULT_CATEGORY;
    }

    if let Some((_, category)) = CATEGORY_KEYWORDS.iter().find(|(kw, _)| *kw == name) {
        return category;
    }

    let padded = format!(" {} ", name);
    CATEGORY_KEYWORDS
        .iter()
        .filter(|(kw, _)| padded.contains(&format!(" {} ", kw)))
        .max_by_key(|(kw, _)| kw.len())
        .map(|(_, category)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

/// A bulk-buy threshold: at or above `amount` of `unit` suggests a larger pack
#[derive(Debug, Clone, Copy)]
pub struct BulkThreshold {
    pub category: &'static str,
    /// Unit display name; None for bare counts
    pub unit: Option<&'static str>,
    pub amount: (i128, i128),
}

pub const BULK_THRESHOLDS: &[BulkThreshold] = &[
    BulkThreshold { category: "baking", unit: Some("cup"), amount: (4, 1) },
    BulkThreshold { category: "baking", unit: Some("pound"), amount: (3, 1) },
    BulkThreshold { category: "pantry", unit: Some("cup"), amount: (4, 1) },
    BulkThreshold { category: "pantry", unit: Some("pound"), amount: (3, 1) },
    BulkThreshold { category: "grains", unit: Some("cup"), amount: (6, 1) },
    BulkThreshold { category: "grains", unit: Some("pound"), amount: (3, 1) },
    BulkThreshold { category: "meat", unit: Some("pound"), amount: (3, 1) },
    BulkThreshold { category: "seafood", unit: Some("pound"), amount: (2, 1) },
    BulkThreshold { category: "dairy", unit: Some("cup"), amount: (8, 1) },
    BulkThreshold { category: "dairy", unit: Some("pound"), amount: (2, 1) },
    BulkThreshold { category: "dairy", unit: Some("each"), amount: (18, 1) },
    BulkThreshold { category: "dairy", unit: None, amount: (18, 1) },
    BulkThreshold { category: "produce", unit: Some("pound"), amount: (5, 1) },
    BulkThreshold { category: "produce", unit: Some("each"), amount: (12, 1) },
    BulkThreshold { category: "produce", unit: None, amount: (12, 1) },
    BulkThreshold { category: "spices", unit: Some("cup"), amount: (1, 2) },
    BulkThreshold { category: "spices", unit: Some("ounce"), amount: (8, 1) },
];

/// Whether a resolved amount is large enough to suggest buying in bulk
///
/// `amount` is None for composite quantities, which are never bulk. A
/// threshold in another unit of the same family is converted before the
/// comparison, so 2 kg of sugar is checked against the pound threshold.
pub fn is_bulk_buying(category: &str, amount: Option<Quantity>, unit: Option<&str>) -> bool {
    let amount = match amount {
        Some(a) => a,
        None => return false,
    };
    let category = category.trim().to_lowercase();
    let parsed = parse_unit(unit);

    let amount_base = match amount.checked_mul(&parsed.factor) {
        Some(base) => base,
        None => return false,
    };

    BULK_THRESHOLDS
        .iter()
        .filter(|t| t.category == category)
        .any(|t| {
            let threshold_unit = parse_unit(t.unit);
            let comparable = match (&parsed.family, &threshold_unit.family) {
                (UnitFamily::Volume, UnitFamily::Volume) | (UnitFamily::Weight, UnitFamily::Weight) => true,
                (a, b) => a == b,
            };
            if !comparable {
                return false;
            }
            match ratio(t.amount).checked_mul(&threshold_unit.factor) {
                Some(threshold_base) => amount_base >= threshold_base,
                None => false,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: u64) -> Option<Quantity> {
        Some(Quantity::from_integer(n))
    }

    #[test]
    fn test_categorize_exact_names() {
        assert_eq!(categorize("apple"), "produce");
        assert_eq!(categorize("milk"), "dairy");
        assert_eq!(categorize("chicken"), "meat");
        assert_eq!(categorize("oil"), "pantry");
        assert_eq!(categorize("flour"), "baking");
    }

    #[test]
    fn test_categorize_longest_keyword_wins() {
        assert_eq!(categorize("chicken broth"), "pantry");
        assert_eq!(categorize("garlic powder"), "spices");
        assert_eq!(categorize("smoked salmon"), "seafood");
        assert_eq!(categorize("cheddar cheese"), "dairy");
    }

    #[test]
    fn test_categorize_matches_whole_words_only() {
        // "ham" must not match inside "graham"
        assert_eq!(categorize("graham crackers"), DEFAULT_CATEGORY);
        assert_eq!(categorize("dragon fruit jam"), DEFAULT_CATEGORY);
        assert_eq!(categorize(""), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_categorize_is_pure() {
        for name in ["apple", "mystery", "chicken broth"] {
            assert_eq!(categorize(name), categorize(name));
        }
    }

    #[test]
    fn test_bulk_at_threshold() {
        assert!(is_bulk_buying("baking", q(5), Some("cup")));
        assert!(is_bulk_buying("baking", q(4), Some("pound")));
        assert!(is_bulk_buying("meat", q(3), Some("pound")));
        assert!(!is_bulk_buying("meat", q(2), Some("pound")));
    }

    #[test]
    fn test_bulk_converts_threshold_units() {
        // 2 kg is about 4.4 lb, over the 3 lb baking threshold
        assert!(is_bulk_buying("baking", q(2), Some("kilogram")));
        // 1 gallon is 16 cups
        assert!(is_bulk_buying("dairy", q(1), Some("gallon")));
        assert!(!is_bulk_buying("dairy", q(1), Some("quart")));
    }

    #[test]
    fn test_bulk_counts() {
        assert!(is_bulk_buying("produce", q(12), None));
        assert!(!is_bulk_buying("produce", q(11), None));
        assert!(is_bulk_buying("Produce", q(12), Some("each")));
    }

    #[test]
    fn test_bulk_never_for_composite_or_unknown() {
        assert!(!is_bulk_buying("baking", None, None));
        assert!(!is_bulk_buying("snacks", q(100), Some("cup")));
        assert!(!is_bulk_buying("baking", q(100), Some("pinch")));
    }
}
