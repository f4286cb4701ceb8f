//! Pantry Item model
//!
//! Ingredients already on hand, stored under their canonical name so they
//! line up with consolidated shopping list entries.

use std::collections::HashSet;

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::consolidate::{canonicalize, categorize};
use crate::db::DbResult;

/// An ingredient in the pantry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: i64,
    pub name: String,
    pub quantity: String,
    pub unit: Option<String>,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for adding to the pantry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PantryItemCreate {
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    pub unit: Option<String>,
    pub category: Option<String>,
}

impl PantryItem {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            quantity: row.get("quantity")?,
            unit: row.get("unit")?,
            category: row.get("category")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Add an item, or update the amount if its canonical name is already stocked
    pub fn upsert(conn: &Connection, data: &PantryItemCreate) -> DbResult<Self> {
        let name = canonicalize(&data.name);
        let unit = data.unit.as_deref().map(str::trim).filter(|u| !u.is_empty());
        let category = data
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| categorize(&name).to_string());

        conn.execute(
            r#"
            INSERT INTO pantry_items (name, quantity, unit, category)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(name) DO UPDATE SET
                quantity = excluded.quantity,
                unit = excluded.unit,
                category = excluded.category,
                updated_at = datetime('now')
            "#,
            params![name, data.quantity.trim(), unit, category],
        )?;

        Self::get_by_name(conn, &name)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get an item by canonical name
    pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM pantry_items WHERE name = ?1")?;

        let result = stmt.query_row([name], Self::from_row);
        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All pantry items by name
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM pantry_items ORDER BY name")?;
        let items = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Canonical names currently stocked
    pub fn canonical_names(conn: &Connection) -> DbResult<HashSet<String>> {
        let mut stmt = conn.prepare("SELECT name FROM pantry_items")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<HashSet<String>, _>>()?;
        Ok(names)
    }

    /// Remove an item
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM pantry_items WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}
