//! MCP protocol implementation.
//!
//! - [`protocol`] — JSON-RPC 2.0 message types and parsing
//! - [`dispatch`] — transport-agnostic request dispatch over the tool registry
//! - [`server`] — stdio server loop
//! - [`transport`] — stdio framing

pub mod dispatch;
pub mod protocol;
pub mod server;
pub mod transport;
