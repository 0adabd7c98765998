use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::{fetch_as, CoindRpc};

/// Regtest block generation. Both calls return the new block hashes.
pub struct Generating<'a> {
    rpc: &'a dyn CoindRpc,
}

impl<'a> Generating<'a> {
    pub fn new(rpc: &'a dyn CoindRpc) -> Self {
        Self { rpc }
    }

    pub async fn generate(
        &self,
        num_blocks: u64,
        max_tries: Option<u64>,
    ) -> Result<Vec<String>, CoreError> {
        let mut params = vec![json!(num_blocks)];
        if let Some(max_tries) = max_tries {
            params.push(json!(max_tries));
        }
        fetch_as(self.rpc, "generate", params).await
    }

    pub async fn generate_to_address(
        &self,
        num_blocks: u64,
        address: &str,
        max_tries: Option<u64>,
    ) -> Result<Vec<String>, CoreError> {
        let mut params: Vec<Value> = vec![json!(num_blocks), json!(address)];
        if let Some(max_tries) = max_tries {
            params.push(json!(max_tries));
        }
        fetch_as(self.rpc, "generatetoaddress", params).await
    }
}
