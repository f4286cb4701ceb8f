//! Data models
//!
//! Rust structs representing database entities.

mod pantry_item;
mod recipe;
mod recipe_ingredient;
mod shopping_list;
mod shopping_list_item;

pub use pantry_item::{PantryItem, PantryItemCreate};
pub use recipe::{Recipe, RecipeCreate};
pub use recipe_ingredient::{RecipeIngredient, RecipeIngredientCreate};
pub use shopping_list::{ShoppingList, ShoppingListSummary};
pub use shopping_list_item::ShoppingListItem;

/// In-memory database with the full schema, for model tests
#[cfg(test)]
pub(crate) fn test_conn() -> rusqlite::Connection {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    crate::db::migrations::run_migrations(&conn).unwrap();
    conn
}
