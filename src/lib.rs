//! Larder Library
//!
//! Recipe ingredient consolidation, shopping lists and pantry tracking.

pub mod build_info;
pub mod consolidate;
pub mod db;
pub mod mcp;
pub mod models;
pub mod tools;
