use serde_json::Value;

use crate::error::{CoreError, RpcError, TransportError};

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) method: &'a str,
    pub(super) params: Vec<Value>,
    pub(super) id: u64,
    pub(super) jsonrpc: &'static str,
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    pub(super) result: Option<Value>,
    pub(super) error: Option<Value>,
}

/// Turn a decoded response envelope into the call outcome.
///
/// A truthy `error` wins regardless of what `result` holds; otherwise the
/// `result` is handed back verbatim, with an absent one read as `null`.
pub(super) fn into_result(response: JsonRpcResponse) -> Result<Value, CoreError> {
    match response.error {
        Some(err) if is_truthy(&err) => Err(parse_jsonrpc_error(err)),
        _ => Ok(response.result.unwrap_or(Value::Null)),
    }
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// `{"code": <int>, "message": <string>}` becomes an [`RpcError`]; any other
/// shape is reported as an invalid response carrying the raw JSON.
pub(super) fn parse_jsonrpc_error(err: Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => RpcError {
            code: parsed.code,
            message: parsed.message,
        }
        .into(),
        Err(_) => TransportError::InvalidResponse(format!("non-standard JSON-RPC error: {err}"))
            .into(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
