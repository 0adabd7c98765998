use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{CoreError, RpcError};

use super::CoindRpc;

/// A mock daemon for testing. Records every call and answers from canned
/// results populated via the builder pattern; unknown methods return `null`.
pub struct MockRpc {
    responses: HashMap<String, Result<Value, RpcError>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockRpc {
    pub fn builder() -> MockRpcBuilder {
        MockRpcBuilder {
            responses: HashMap::new(),
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    /// The single recorded call; panics unless exactly one call was made.
    pub fn only_call(&self) -> (String, Vec<Value>) {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls.into_iter().next().expect("length checked above")
    }
}

pub struct MockRpcBuilder {
    responses: HashMap<String, Result<Value, RpcError>>,
}

impl MockRpcBuilder {
    pub fn with_result(mut self, method: &str, result: Value) -> Self {
        self.responses.insert(method.to_owned(), Ok(result));
        self
    }

    pub fn with_error(mut self, method: &str, code: i64, message: &str) -> Self {
        self.responses.insert(
            method.to_owned(),
            Err(RpcError {
                code,
                message: message.to_owned(),
            }),
        );
        self
    }

    pub fn build(self) -> MockRpc {
        MockRpc {
            responses: self.responses,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CoindRpc for MockRpc {
    async fn fetch(&self, method: &str, params: Vec<Value>) -> Result<Value, CoreError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push((method.to_owned(), params));
        match self.responses.get(method) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(err)) => Err(err.clone().into()),
            None => Ok(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn records_calls_and_replays_results() {
        let rpc = MockRpc::builder()
            .with_result("getblockcount", json!(12345))
            .build();
        let result = rpc.fetch("getblockcount", Vec::new()).await.unwrap();
        assert_eq!(result, json!(12345));
        assert_eq!(rpc.only_call(), ("getblockcount".to_owned(), Vec::new()));
    }

    #[tokio::test]
    async fn replays_errors() {
        let rpc = MockRpc::builder()
            .with_error("sendrawtransaction", -26, "txn-mempool-conflict")
            .build();
        let err = rpc
            .fetch("sendrawtransaction", vec![json!("deadbeef")])
            .await
            .expect_err("canned error must surface");
        assert_eq!(err.rpc_code(), Some(-26));
    }
}
