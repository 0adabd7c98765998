use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::{fetch_as, CoindRpc};

/// Fee estimation, address helpers, message verification and node logging.
pub struct Util<'a> {
    rpc: &'a dyn CoindRpc,
}

impl<'a> Util<'a> {
    pub fn new(rpc: &'a dyn CoindRpc) -> Self {
        Self { rpc }
    }

    pub async fn create_multi_sig(
        &self,
        n_required: u32,
        keys: &[&str],
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("createmultisig", vec![json!(n_required), json!(keys)])
            .await
    }

    /// Fee per kB for confirmation within `n_blocks`; the daemon answers a
    /// negative value when it has no estimate.
    pub async fn estimate_fee(&self, n_blocks: u32) -> Result<f64, CoreError> {
        fetch_as(self.rpc, "estimatefee", vec![json!(n_blocks)]).await
    }

    pub async fn estimate_smart_fee(&self, n_blocks: u32) -> Result<Value, CoreError> {
        self.rpc.fetch("estimatesmartfee", vec![json!(n_blocks)]).await
    }

    /// Read tweakable node settings.
    pub async fn get(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("get", Vec::new()).await
    }

    pub async fn get_address_forms(&self, address: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("getaddressforms", vec![json!(address)]).await
    }

    pub async fn get_stat(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getstat", Vec::new()).await
    }

    pub async fn get_stat_list(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getstatlist", Vec::new()).await
    }

    pub async fn issue_alert(&self, alert: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("issuealert", vec![json!(alert)]).await
    }

    /// Turn a log category (or `all`) `on` or `off`.
    pub async fn log(&self, category: &str, state: &str) -> Result<Value, CoreError> {
        self.rpc
            .fetch("log", vec![json!(category), json!(state)])
            .await
    }

    pub async fn log_line(&self, line: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("logline", vec![json!(line)]).await
    }

    /// Write tweakable node settings.
    pub async fn set(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("set", Vec::new()).await
    }

    pub async fn validate_address(&self, address: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("validateaddress", vec![json!(address)]).await
    }

    pub async fn validate_chain_history(&self, hash: Option<&str>) -> Result<Value, CoreError> {
        let params = hash.map(|hash| vec![json!(hash)]).unwrap_or_default();
        self.rpc.fetch("validatechainhistory", params).await
    }

    pub async fn verify_message(
        &self,
        address: &str,
        signature: &str,
        message: &str,
    ) -> Result<bool, CoreError> {
        fetch_as(
            self.rpc,
            "verifymessage",
            vec![json!(address), json!(signature), json!(message)],
        )
        .await
    }
}
