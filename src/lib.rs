//! series-mcp: MCP server for economic time-series data
//!
//! This library exposes a small set of named tools (series lookup, catalog
//! browsing, metadata, chart rendering) through a JSON-RPC 2.0 envelope,
//! served identically over a stdio stream and an HTTP/SSE channel.
//!
//! # Architecture
//!
//! A single transport-agnostic dispatcher sits between the transports and a
//! read-only tool registry. Tools validate their own input and report
//! domain problems as payload-level failures; the dispatcher reserves
//! protocol-level errors for routing failures and unexpected faults.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Error types
//! - [`validate`] — Pure input validators
//! - [`data`] — Series provider trait and fixture backing
//! - [`tools`] — Tool contract and registry
//! - [`mcp`] — JSON-RPC protocol, dispatch, stdio transport
//! - [`http`] — HTTP/SSE transport
//! - `chart` — Chart rasterisation (feature `plot`)

#[cfg(feature = "plot")]
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod http;
pub mod mcp;
pub mod tools;
pub mod validate;
