//! # Dispatcher Module
//!
//! Routes decoded JSON-RPC requests to catalog tools.
//!
//! ## Overview
//!
//! - Keeps a registry of tools keyed by name, each with an advertised
//!   [`ToolSpec`] (name, description, JSON input schema) and a handler
//! - Answers the protocol methods `initialize`, `ping`, `tools/list` and
//!   `tools/call`
//! - Maps catalog errors to JSON-RPC error objects; unknown ids become
//!   `-32004` with `{kind, key}` data
//!
//! ## Request Flow
//!
//! 1. The stdio server decodes a line into an [`RpcRequest`](crate::server::RpcRequest)
//! 2. The dispatcher looks up the tool by method name (or `tools/call` name)
//! 3. The handler validates its named parameters and queries the [`Catalog`](crate::catalog::Catalog)
//! 4. The result or error is wrapped in a response, unless the request was a notification

mod core;
mod tools;

pub use core::{Dispatcher, PROTOCOL_VERSION, SERVER_NAME};
pub use tools::{builtin_tools, Params, Tool, ToolHandler, ToolSpec};
