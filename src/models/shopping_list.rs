//! Shopping List model
//!
//! A generated list together with the recipes it was built from.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A shopping list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Shopping list with item counts, for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListSummary {
    pub id: i64,
    pub name: String,
    pub item_count: i64,
    pub checked_count: i64,
    pub created_at: String,
}

impl ShoppingList {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a list and link it to its source recipes
    pub fn create(conn: &Connection, name: &str, recipe_ids: &[i64]) -> DbResult<Self> {
        conn.execute("INSERT INTO shopping_lists (name) VALUES (?1)", [name.trim()])?;
        let id = conn.last_insert_rowid();

        let mut stmt = conn.prepare(
            "INSERT OR IGNORE INTO shopping_list_recipes (shopping_list_id, recipe_id) VALUES (?1, ?2)",
        )?;
        for recipe_id in recipe_ids {
            stmt.execute(params![id, recipe_id])?;
        }

        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a list by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM shopping_lists WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(list) => Ok(Some(list)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// IDs of the recipes a list was generated from
    pub fn recipe_ids(conn: &Connection, id: i64) -> DbResult<Vec<i64>> {
        let mut stmt = conn.prepare(
            "SELECT recipe_id FROM shopping_list_recipes WHERE shopping_list_id = ?1 ORDER BY recipe_id",
        )?;
        let ids = stmt
            .query_map([id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    /// Newest lists first, with item and checked counts
    pub fn list_summaries(conn: &Connection, limit: i64, offset: i64) -> DbResult<Vec<ShoppingListSummary>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT sl.id, sl.name, sl.created_at,
                   COUNT(sli.id) AS item_count,
                   COALESCE(SUM(sli.checked), 0) AS checked_count
            FROM shopping_lists sl
            LEFT JOIN shopping_list_items sli ON sli.shopping_list_id = sl.id
            GROUP BY sl.id
            ORDER BY sl.id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )?;

        let summaries = stmt
            .query_map(params![limit, offset], |row| {
                Ok(ShoppingListSummary {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    item_count: row.get("item_count")?,
                    checked_count: row.get("checked_count")?,
                    created_at: row.get("created_at")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(summaries)
    }

    /// Delete a list and its items
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM shopping_lists WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidate::{consolidate_ingredients, IngredientItem};
    use crate::models::{test_conn, Recipe, RecipeCreate, ShoppingListItem};

    #[test]
    fn test_create_links_recipes() {
        let conn = test_conn();
        let recipe = Recipe::create(
            &conn,
            &RecipeCreate {
                name: "Chili".to_string(),
                servings: 6.0,
                notes: None,
            },
        )
        .unwrap();

        let list = ShoppingList::create(&conn, " Week 1 ", &[recipe.id, recipe.id]).unwrap();
        assert_eq!(list.name, "Week 1");
        assert_eq!(ShoppingList::recipe_ids(&conn, list.id).unwrap(), vec![recipe.id]);
    }

    #[test]
    fn test_summaries_count_items() {
        let conn = test_conn();
        let empty = ShoppingList::create(&conn, "Empty", &[]).unwrap();
        let full = ShoppingList::create(&conn, "Full", &[]).unwrap();

        let consolidated = consolidate_ingredients(&[
            IngredientItem::new("egg", "6", None),
            IngredientItem::new("bread", "1", Some("loaf")),
        ]);
        let first = ShoppingListItem::insert_consolidated(&conn, full.id, 0, &consolidated[0]).unwrap();
        ShoppingListItem::insert_consolidated(&conn, full.id, 1, &consolidated[1]).unwrap();
        ShoppingListItem::set_checked(&conn, first.id, true).unwrap();

        let summaries = ShoppingList::list_summaries(&conn, 10, 0).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, full.id);
        assert_eq!(summaries[0].item_count, 2);
        assert_eq!(summaries[0].checked_count, 1);
        assert_eq!(summaries[1].id, empty.id);
        assert_eq!(summaries[1].item_count, 0);
        assert_eq!(summaries[1].checked_count, 0);
    }

    #[test]
    fn test_delete_cascades_to_items() {
        let conn = test_conn();
        let list = ShoppingList::create(&conn, "Temp", &[]).unwrap();
        let consolidated = consolidate_ingredients(&[IngredientItem::new("salt", "", None)]);
        let item = ShoppingListItem::insert_consolidated(&conn, list.id, 0, &consolidated[0]).unwrap();

        assert!(ShoppingList::delete(&conn, list.id).unwrap());
        assert!(ShoppingListItem::get_by_id(&conn, item.id).unwrap().is_none());
    }
}
