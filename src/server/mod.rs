//! JSON-RPC 2.0 transport over newline-delimited stdio.
//!
//! [`request`] decodes and validates one line, [`response`] holds the error
//! codes and the response envelope, and [`serve`] drives the read/dispatch/write
//! loop until input closes.

pub mod request;
pub mod response;
mod stdio;

pub use request::{parse_request, Incoming, RpcRequest};
pub use response::{
    RpcError, RpcResponse, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND,
    NOT_FOUND, PARSE_ERROR,
};
pub use stdio::{handle_line, serve, ServeStats};
