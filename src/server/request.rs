use serde_json::{Map, Value};

use super::response::{RpcError, RpcResponse, INVALID_REQUEST, PARSE_ERROR};

/// A well-formed JSON-RPC 2.0 call.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    /// `None` marks a notification, which never gets a response.
    pub id: Option<Value>,
    pub method: String,
    /// Named parameters; absent `params` decodes as an empty object.
    pub params: Map<String, Value>,
}

impl RpcRequest {
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Outcome of decoding one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    Request(RpcRequest),
    /// The line was rejected before dispatch; reply with this response.
    Rejected(RpcResponse),
}

fn invalid(id: Value, message: &str) -> Incoming {
    Incoming::Rejected(RpcResponse::failure(
        id,
        RpcError::new(INVALID_REQUEST, message),
    ))
}

/// Decode one line of input.
///
/// Only by-name (object) parameters are accepted; tools have no positional
/// form.
#[must_use]
pub fn parse_request(line: &str) -> Incoming {
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            return Incoming::Rejected(RpcResponse::failure(
                Value::Null,
                RpcError::new(PARSE_ERROR, format!("parse error: {e}")),
            ))
        }
    };
    let Value::Object(mut obj) = value else {
        return invalid(Value::Null, "request must be a JSON object");
    };

    let id = obj.remove("id");
    let reply_id = id.clone().unwrap_or(Value::Null);
    if let Some(id) = &id {
        if !(id.is_string() || id.is_number() || id.is_null()) {
            return invalid(Value::Null, "id must be a string, number or null");
        }
    }
    if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        return invalid(reply_id, "jsonrpc must be \"2.0\"");
    }
    let method = match obj.remove("method") {
        Some(Value::String(m)) => m,
        _ => return invalid(reply_id, "method must be a string"),
    };
    let params = match obj.remove("params") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(p)) => p,
        Some(_) => return invalid(reply_id, "params must be an object"),
    };

    Incoming::Request(RpcRequest { id, method, params })
}
