//! Pantry MCP Tools
//!
//! Tools for tracking ingredients already on hand.

use serde::Serialize;

use super::DeleteResponse;
use crate::db::Database;
use crate::models::{PantryItem, PantryItemCreate};

/// Response for list_pantry_items
#[derive(Debug, Serialize)]
pub struct ListPantryResponse {
    pub items: Vec<PantryItem>,
    pub total: usize,
}

/// Add an item to the pantry, updating it if the canonical name is already stocked
pub fn add_pantry_item(db: &Database, data: PantryItemCreate) -> Result<PantryItem, String> {
    if data.name.trim().is_empty() {
        return Err("Pantry item name cannot be empty".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let item = PantryItem::upsert(&conn, &data)
        .map_err(|e| format!("Failed to add pantry item: {}", e))?;

    tracing::debug!("Stocked pantry item {} as '{}'", item.id, item.name);
    Ok(item)
}

/// List everything in the pantry
pub fn list_pantry_items(db: &Database) -> Result<ListPantryResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let items = PantryItem::list(&conn)
        .map_err(|e| format!("Failed to list pantry items: {}", e))?;

    Ok(ListPantryResponse {
        total: items.len(),
        items,
    })
}

/// Remove an item from the pantry
pub fn remove_pantry_item(db: &Database, id: i64) -> Result<DeleteResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = PantryItem::delete(&conn, id)
        .map_err(|e| format!("Failed to remove pantry item: {}", e))?;
    if !deleted {
        return Err(format!("Pantry item not found with id: {}", id));
    }

    Ok(DeleteResponse {
        success: true,
        deleted_id: id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_db;

    fn item(name: &str) -> PantryItemCreate {
        PantryItemCreate {
            name: name.to_string(),
            quantity: String::new(),
            unit: None,
            category: None,
        }
    }

    #[test]
    fn test_pantry_workflow() {
        let (_dir, db) = test_db();

        let salt = add_pantry_item(&db, item("Kosher Salt")).unwrap();
        add_pantry_item(&db, item("butter")).unwrap();
        assert!(add_pantry_item(&db, item("   ")).is_err());

        let listed = list_pantry_items(&db).unwrap();
        assert_eq!(listed.total, 2);
        assert_eq!(listed.items[0].name, "butter");

        remove_pantry_item(&db, salt.id).unwrap();
        assert!(remove_pantry_item(&db, salt.id).is_err());
        assert_eq!(list_pantry_items(&db).unwrap().total, 1);
    }
}
