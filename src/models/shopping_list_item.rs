//! Shopping List Item model
//!
//! Persisted form of a consolidated ingredient.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::consolidate::{ConsolidatedIngredient, OriginalIngredient};
use crate::db::DbResult;

/// A line on a shopping list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: i64,
    pub shopping_list_id: i64,
    pub position: i64,
    pub name: String,
    pub quantity: String,
    pub unit: Option<String>,
    pub category: String,
    pub bulk_buying: bool,
    pub checked: bool,
    pub original_ingredients: Vec<OriginalIngredient>,
    pub created_at: String,
    pub updated_at: String,
}

impl ShoppingListItem {
    /// Create from a database row, decoding the JSON originals column
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let originals_json: String = row.get("original_ingredients")?;
        let original_ingredients = serde_json::from_str(&originals_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

        Ok(Self {
            id: row.get("id")?,
            shopping_list_id: row.get("shopping_list_id")?,
            position: row.get("position")?,
            name: row.get("name")?,
            quantity: row.get("quantity")?,
            unit: row.get("unit")?,
            category: row.get("category")?,
            bulk_buying: row.get::<_, i32>("bulk_buying")? != 0,
            checked: row.get::<_, i32>("checked")? != 0,
            original_ingredients,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Persist a consolidated ingredient as a row of the given list
    pub fn insert_consolidated(
        conn: &Connection,
        shopping_list_id: i64,
        position: i64,
        item: &ConsolidatedIngredient,
    ) -> DbResult<Self> {
        let originals_json = serde_json::to_string(&item.original_ingredients)?;

        conn.execute(
            r#"
            INSERT INTO shopping_list_items
                (shopping_list_id, position, name, quantity, unit, category, bulk_buying, original_ingredients)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                shopping_list_id,
                position,
                item.name,
                item.quantity,
                item.unit,
                item.category,
                item.bulk_buying as i32,
                originals_json,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get an item by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM shopping_list_items WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All items of a list in consolidation order
    pub fn list_for_list(conn: &Connection, shopping_list_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM shopping_list_items WHERE shopping_list_id = ?1 ORDER BY position, id",
        )?;

        let items = stmt
            .query_map([shopping_list_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Tick or untick an item. Returns None if the item does not exist.
    pub fn set_checked(conn: &Connection, id: i64, checked: bool) -> DbResult<Option<Self>> {
        let rows = conn.execute(
            "UPDATE shopping_list_items SET checked = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![checked as i32, id],
        )?;

        if rows == 0 {
            return Ok(None);
        }
        Self::get_by_id(conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidate::{consolidate_ingredients, IngredientItem};
    use crate::models::{test_conn, ShoppingList};

    #[test]
    fn test_insert_round_trips_originals() {
        let conn = test_conn();
        let list = ShoppingList::create(&conn, "Weekly", &[]).unwrap();
        let consolidated = consolidate_ingredients(&[
            IngredientItem::new("roma tomatoes", "2", None),
            IngredientItem::new("cherry tomatoes", "1", Some("cup")),
        ]);

        let item = ShoppingListItem::insert_consolidated(&conn, list.id, 0, &consolidated[0]).unwrap();
        assert_eq!(item.name, "tomato");
        assert_eq!(item.quantity, "2, 1 cup");
        assert_eq!(item.unit, None);
        assert_eq!(item.category, "produce");
        assert!(!item.checked);
        assert_eq!(item.original_ingredients, consolidated[0].original_ingredients);
    }

    #[test]
    fn test_set_checked() {
        let conn = test_conn();
        let list = ShoppingList::create(&conn, "Weekly", &[]).unwrap();
        let consolidated = consolidate_ingredients(&[IngredientItem::new("milk", "1", Some("gallon"))]);
        let item = ShoppingListItem::insert_consolidated(&conn, list.id, 0, &consolidated[0]).unwrap();
        assert!(item.bulk_buying);

        let updated = ShoppingListItem::set_checked(&conn, item.id, true).unwrap().unwrap();
        assert!(updated.checked);
        assert!(ShoppingListItem::set_checked(&conn, 9999, true).unwrap().is_none());
    }

    #[test]
    fn test_list_for_list_orders_by_position() {
        let conn = test_conn();
        let list = ShoppingList::create(&conn, "Weekly", &[]).unwrap();
        let consolidated = consolidate_ingredients(&[
            IngredientItem::new("salt", "1", Some("tsp")),
            IngredientItem::new("rice", "2", Some("cups")),
        ]);
        ShoppingListItem::insert_consolidated(&conn, list.id, 1, &consolidated[1]).unwrap();
        ShoppingListItem::insert_consolidated(&conn, list.id, 0, &consolidated[0]).unwrap();

        let items = ShoppingListItem::list_for_list(&conn, list.id).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["salt", "rice"]);
    }
}
