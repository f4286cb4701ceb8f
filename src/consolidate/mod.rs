//! Ingredient consolidation module
//!
//! Name canonicalization, unit conversion, categorization and bulk-buy
//! detection for turning recipe ingredients into a shopping list.

pub mod category;
pub mod consolidator;
pub mod converter;
pub mod names;
pub mod quantity;
pub mod units;

pub use category::{categorize, is_bulk_buying, DEFAULT_CATEGORY};
pub use consolidator::{
    consolidate_ingredients, ConsolidatedIngredient, IngredientItem, OriginalIngredient,
};
pub use converter::{convert_and_sum, ConvertedQuantity};
pub use names::{canonicalize, normalize, singularize};
pub use quantity::Quantity;
pub use units::{parse_unit, MeasurementSystem, ParsedUnit, UnitFamily};
