//! Model Context Protocol (MCP) server implementation.
//!
//! This module provides an MCP server that exposes vvtrans to AI assistants:
//! reading the configuration, annotating key references in a file, and
//! rewriting literal translation calls.
//!
//! ## Module Structure
//!
//! - `helpers`: Session setup and result conversion for tool calls
//! - `server`: Main MCP server implementation
//! - `types`: MCP-specific type definitions

mod helpers;
mod server;
pub mod types;

pub use server::{VvtransMcpServer, run_server};
