//! Larder Status Tool
//!
//! Provides runtime status information about the Larder service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::migrations::{get_schema_version, needs_migration};
use crate::db::Database;

/// Shopping list workflow instructions for AI assistants
pub const SHOPPING_INSTRUCTIONS: &str = r#"
# Larder Shopping List Instructions

This guide explains how to turn recipes into a consolidated shopping list.

## Overview

1. **Recipes** hold ingredient lines exactly as written ("2 cups diced tomatoes").
2. **The pantry** holds what is already on hand.
3. **Shopping lists** are generated from one or more recipes. Matching
   ingredients are merged, quantities are summed where the units allow it,
   and every line is tagged with a store category.

---

## Step 1: Create Recipes

```
create_recipe(name: "Chili", servings: 6)
add_recipe_ingredient(recipe_id: 1, name: "ground beef", quantity: "2", unit: "lb")
add_recipe_ingredient(recipe_id: 1, name: "diced tomatoes", quantity: "2", unit: "cups")
add_recipe_ingredient(recipe_id: 1, name: "garlic cloves", quantity: "3")
```

Write quantities the way the recipe does. Fractions ("1/2"), mixed numbers
("1 1/2"), decimals ("0.75") and vulgar fractions ("½") are all understood.
Leave `unit` empty for plain counts.

## Step 2: Stock the Pantry (optional)

```
add_pantry_item(name: "olive oil")
add_pantry_item(name: "salt")
```

Pantry names are stored in canonical form, so "extra virgin olive oil" and
"olive oil" are the same pantry entry.

## Step 3: Generate the List

```
generate_shopping_list(recipe_ids: [1, 2], exclude_pantry: true)
```

- Every recipe id must exist.
- With `exclude_pantry: true`, items already in the pantry are left off.
- The name defaults to "Shopping list YYYY-MM-DD".

## Reading the Result

| Field | Meaning |
|-------|---------|
| `name` | canonical ingredient name ("roma tomatoes" → "tomato") |
| `quantity` | summed amount ("3"), or a comma-joined list when units cannot be combined ("2 cups, 1") |
| `unit` | display unit for a summed amount, empty for composites |
| `category` | store section: produce, dairy, meat, seafood, grains, baking, pantry, spices, beverages, frozen, other |
| `bulk_buying` | true when the amount is large enough to buy in bulk |
| `original_ingredients` | the recipe lines that were merged into this item |

## Shopping

Use `set_shopping_list_item_checked(item_id, checked: true)` as items go into
the cart. `list_shopping_lists` shows checked counts per list.

## Quick Checks

Use `consolidate_ingredients` to preview how a list of ingredients merges
without saving anything.
"#;

/// Runtime status of the Larder service
#[derive(Debug, Clone, Serialize)]
pub struct LarderStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub schema_version: i32,
    pub needs_migration: bool,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, db: &Database) -> Result<LarderStatus, String> {
        let build_info = BuildInfo::current();

        let (schema_version, needs_migration) = db
            .with_conn(|conn| Ok((get_schema_version(conn)?, needs_migration(conn)?)))
            .map_err(|e| format!("Failed to read schema version: {}", e))?;

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        Ok(LarderStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            schema_version,
            needs_migration,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::SCHEMA_VERSION;
    use crate::tools::test_db;

    #[test]
    fn test_status_reports_schema() {
        let (dir, db) = test_db();
        let tracker = StatusTracker::new(dir.path().join("larder.db"));

        let status = tracker.get_status(&db).unwrap();
        assert_eq!(status.schema_version, SCHEMA_VERSION);
        assert!(!status.needs_migration);
        assert!(status.database_size_bytes.is_some());
        assert_eq!(status.process_id, std::process::id());
    }
}
