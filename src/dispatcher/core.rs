use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::tools::{builtin_tools, Params, Tool, ToolSpec};
use crate::catalog::Catalog;
use crate::server::{RpcError, RpcRequest, RpcResponse};

/// Name reported by `initialize`.
pub const SERVER_NAME: &str = "btd6-tower-stats";

/// Protocol revision reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const INSTRUCTIONS: &str =
    "Provides BTD6 tower statistics, upgrade paths, hero details and cost calculations.";

/// Registry of tools keyed by name.
///
/// Tools can be called directly (`"method": "get_tower_info"`) or through
/// `tools/call` with `{"name": ..., "arguments": {...}}`.
pub struct Dispatcher {
    tools: Vec<Tool>,
    index: HashMap<&'static str, usize>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Dispatcher with every catalog tool registered.
    #[must_use]
    pub fn new() -> Self {
        let mut dispatcher = Self::empty();
        for tool in builtin_tools() {
            dispatcher.register(tool);
        }
        dispatcher
    }

    fn empty() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a tool, replacing any tool registered under the same name.
    pub fn register(&mut self, tool: Tool) {
        let name = tool.spec.name;
        match self.index.get(name) {
            Some(&i) => {
                debug!(tool = name, "replacing tool");
                self.tools[i] = tool;
            }
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    pub fn tool_specs(&self) -> impl Iterator<Item = &ToolSpec> {
        self.tools.iter().map(|t| &t.spec)
    }

    /// Run one tool by name.
    pub fn call(&self, catalog: &Catalog, name: &str, params: &Params) -> Result<Value, RpcError> {
        let tool = self
            .index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| RpcError::method_not_found(name))?;
        (tool.handler)(catalog, params)
    }

    fn call_wrapped(&self, catalog: &Catalog, params: &Params) -> Result<Value, RpcError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("`name` must be a string"))?;
        let empty = Params::new();
        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(args)) => args,
            Some(_) => return Err(RpcError::invalid_params("`arguments` must be an object")),
        };
        let result = self.call(catalog, name, arguments)?;
        Ok(json!({
            "content": [{ "type": "text", "text": result.to_string() }],
            "structuredContent": result,
            "isError": false,
        }))
    }

    fn execute(&self, catalog: &Catalog, request: &RpcRequest) -> Result<Value, RpcError> {
        match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
                "capabilities": { "tools": {} },
                "instructions": INSTRUCTIONS,
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.tool_specs().collect::<Vec<_>>() })),
            "tools/call" => self.call_wrapped(catalog, &request.params),
            method => self.call(catalog, method, &request.params),
        }
    }

    /// Serve one request. Notifications run but produce no response.
    #[must_use]
    pub fn handle(&self, catalog: &Catalog, request: &RpcRequest) -> Option<RpcResponse> {
        debug!(method = %request.method, notification = request.is_notification(), "dispatching");
        let outcome = self.execute(catalog, request);
        if let Err(err) = &outcome {
            warn!(method = %request.method, code = err.code, message = %err.message, "request failed");
        }
        let id = request.id.clone()?;
        Some(match outcome {
            Ok(result) => RpcResponse::success(id, result),
            Err(err) => RpcResponse::failure(id, err),
        })
    }
}
