use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::{fetch_as, CoindRpc};

/// Block templates, mining candidates and miner-side node settings.
pub struct Mining<'a> {
    rpc: &'a dyn CoindRpc,
}

impl<'a> Mining<'a> {
    pub fn new(rpc: &'a dyn CoindRpc) -> Self {
        Self { rpc }
    }

    pub async fn genesis(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("genesis", Vec::new()).await
    }

    pub async fn get_block_template(&self, request: Option<&Value>) -> Result<Value, CoreError> {
        self.rpc
            .fetch("getblocktemplate", request.map(|r| vec![r.clone()]).unwrap_or_default())
            .await
    }

    pub async fn get_block_version(&self) -> Result<i64, CoreError> {
        fetch_as(self.rpc, "getblockversion", Vec::new()).await
    }

    pub async fn get_miner_comment(&self) -> Result<String, CoreError> {
        fetch_as(self.rpc, "getminercomment", Vec::new()).await
    }

    pub async fn get_mining_candidate(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getminingcandidate", Vec::new()).await
    }

    pub async fn get_mining_info(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getmininginfo", Vec::new()).await
    }

    pub async fn get_mining_max_block(&self) -> Result<u64, CoreError> {
        fetch_as(self.rpc, "getminingmaxblock", Vec::new()).await
    }

    /// Estimated network hashes per second.
    ///
    /// A `height` without `blocks` still has to land in the second slot, so
    /// the first one is sent as `null` in that case.
    pub async fn get_network_hashrate(
        &self,
        blocks: Option<u64>,
        height: Option<u64>,
    ) -> Result<f64, CoreError> {
        let params = match (blocks, height) {
            (Some(blocks), Some(height)) => vec![json!(blocks), json!(height)],
            (Some(blocks), None) => vec![json!(blocks)],
            (None, Some(height)) => vec![Value::Null, json!(height)],
            (None, None) => Vec::new(),
        };
        fetch_as(self.rpc, "getnetworkhashps", params).await
    }

    pub async fn prioritise_transaction(
        &self,
        txid: &str,
        priority_delta: f64,
        fee_delta: f64,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch(
                "prioritisetransaction",
                vec![json!(txid), json!(priority_delta), json!(fee_delta)],
            )
            .await
    }

    pub async fn set_block_version(&self, version: i64) -> Result<Value, CoreError> {
        self.rpc.fetch("setblockversion", vec![json!(version)]).await
    }

    pub async fn set_miner_comment(&self, comment: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("setminercomment", vec![json!(comment)]).await
    }

    pub async fn set_mining_max_block(&self, block_size: u64) -> Result<Value, CoreError> {
        self.rpc
            .fetch("setminingmaxblock", vec![json!(block_size)])
            .await
    }

    pub async fn submit_block(
        &self,
        hex_data: &str,
        parameters: Option<&Value>,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("submitblock", with_optional(json!(hex_data), parameters))
            .await
    }

    pub async fn submit_mining_solution(
        &self,
        candidate: &Value,
        parameters: Option<&Value>,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch(
                "submitminingsolution",
                with_optional(candidate.clone(), parameters),
            )
            .await
    }

    pub async fn validate_block_template(&self, hex_data: &str) -> Result<Value, CoreError> {
        self.rpc
            .fetch("validateblocktemplate", vec![json!(hex_data)])
            .await
    }
}

fn with_optional(first: Value, second: Option<&Value>) -> Vec<Value> {
    let mut params = vec![first];
    params.extend(second.cloned());
    params
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::rpc::mock::MockRpc;
    use crate::rpc::CoindRpc;

    #[tokio::test]
    async fn network_hashrate_shapes_params() {
        let rpc = MockRpc::builder()
            .with_result("getnetworkhashps", json!(1.5e9))
            .build();
        let mining = rpc.mining();
        assert_eq!(mining.get_network_hashrate(None, None).await.unwrap(), 1.5e9);
        mining.get_network_hashrate(Some(120), None).await.unwrap();
        mining.get_network_hashrate(None, Some(500)).await.unwrap();
        mining
            .get_network_hashrate(Some(120), Some(500))
            .await
            .unwrap();

        let params: Vec<Vec<Value>> = rpc.calls().into_iter().map(|(_, p)| p).collect();
        assert_eq!(
            params,
            vec![
                vec![],
                vec![json!(120)],
                vec![Value::Null, json!(500)],
                vec![json!(120), json!(500)],
            ]
        );
    }

    #[tokio::test]
    async fn block_template_request_is_optional() {
        let rpc = MockRpc::new();
        rpc.mining().get_block_template(None).await.unwrap();
        let request = json!({"mode": "template"});
        rpc.mining().get_block_template(Some(&request)).await.unwrap();
        let calls = rpc.calls();
        assert!(calls[0].1.is_empty());
        assert_eq!(calls[1].1, vec![request]);
    }

    #[tokio::test]
    async fn submit_block_appends_parameters_only_when_given() {
        let rpc = MockRpc::new();
        rpc.mining().submit_block("00aa", None).await.unwrap();
        let extra = json!({"workid": "w"});
        rpc.mining().submit_block("00aa", Some(&extra)).await.unwrap();
        let calls = rpc.calls();
        assert_eq!(calls[0].1, vec![json!("00aa")]);
        assert_eq!(calls[1].1, vec![json!("00aa"), extra]);
    }

    #[tokio::test]
    async fn submit_mining_solution_forwards_candidate() {
        let rpc = MockRpc::new();
        let candidate = json!({"id": 1, "nonce": "00"});
        rpc.mining()
            .submit_mining_solution(&candidate, None)
            .await
            .unwrap();
        assert_eq!(
            rpc.only_call(),
            ("submitminingsolution".to_owned(), vec![candidate])
        );
    }

    #[tokio::test]
    async fn prioritise_transaction_sends_all_deltas() {
        let rpc = MockRpc::new();
        rpc.mining()
            .prioritise_transaction("tx", 0.0, 1000.0)
            .await
            .unwrap();
        assert_eq!(
            rpc.only_call().1,
            vec![json!("tx"), json!(0.0), json!(1000.0)]
        );
    }
}
