//! Larder Tools module
//!
//! MCP tool implementations for recipes, shopping lists and the pantry.

use serde::Serialize;

pub mod pantry;
pub mod recipes;
pub mod shopping_lists;
pub mod status;

/// Response for delete operations
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted_id: i64,
}

/// Migrated database in a temporary directory, for tool tests
#[cfg(test)]
pub(crate) fn test_db() -> (tempfile::TempDir, crate::db::Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = crate::db::Database::new(dir.path().join("larder.db")).unwrap();
    db.with_conn(crate::db::migrations::run_migrations).unwrap();
    (dir, db)
}
