//! MCP server module
//!
//! Exposes the Larder tools over the Model Context Protocol.

mod server;

pub use server::LarderService;
