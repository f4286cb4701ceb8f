//! Database module
//!
//! SQLite pool, transactions and the recipe / shopping list schema.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
