use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::{fetch_as, CoindRpc, HashOrHeight};

/// Chain state, blocks, UTXO set and transaction pool queries.
pub struct Blockchain<'a> {
    rpc: &'a dyn CoindRpc,
}

impl<'a> Blockchain<'a> {
    pub fn new(rpc: &'a dyn CoindRpc) -> Self {
        Self { rpc }
    }

    /// Remove a transaction from the transaction pool.
    pub async fn evict_transaction(&self, txid: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("evicttransaction", vec![json!(txid)]).await
    }

    pub async fn get_best_block_hash(&self) -> Result<String, CoreError> {
        fetch_as(self.rpc, "getbestblockhash", Vec::new()).await
    }

    /// `verbosity` defaults to 1 and `tx_count` to 0; both are always sent.
    pub async fn get_block(
        &self,
        hash_or_height: impl Into<HashOrHeight>,
        verbosity: Option<u8>,
        tx_count: Option<u64>,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch(
                "getblock",
                vec![
                    json!(hash_or_height.into()),
                    json!(verbosity.unwrap_or(1)),
                    json!(tx_count.unwrap_or(0)),
                ],
            )
            .await
    }

    pub async fn get_blockchain_info(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getblockchaininfo", Vec::new()).await
    }

    pub async fn get_block_count(&self) -> Result<u64, CoreError> {
        fetch_as(self.rpc, "getblockcount", Vec::new()).await
    }

    pub async fn get_block_hash(&self, index: u64) -> Result<String, CoreError> {
        fetch_as(self.rpc, "getblockhash", vec![json!(index)]).await
    }

    /// `verbose` defaults to `true`.
    pub async fn get_block_header(
        &self,
        hash_or_height: impl Into<HashOrHeight>,
        verbose: Option<bool>,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch(
                "getblockheader",
                vec![json!(hash_or_height.into()), json!(verbose.unwrap_or(true))],
            )
            .await
    }

    pub async fn get_block_stats(
        &self,
        hash_or_height: impl Into<HashOrHeight>,
        stats: &[&str],
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch(
                "getblockstats",
                vec![json!(hash_or_height.into()), json!(stats)],
            )
            .await
    }

    pub async fn get_chain_tips(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getchaintips", Vec::new()).await
    }

    /// Both positions are always present; absent arguments go out as `null`.
    pub async fn get_chain_tx_stats(
        &self,
        nblocks: Option<u64>,
        blockhash: Option<&str>,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("getchaintxstats", vec![json!(nblocks), json!(blockhash)])
            .await
    }

    pub async fn get_difficulty(&self) -> Result<f64, CoreError> {
        fetch_as(self.rpc, "getdifficulty", Vec::new()).await
    }

    pub async fn get_orphan_pool_info(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getorphanpoolinfo", Vec::new()).await
    }

    pub async fn get_raw_orphan_pool(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getraworphanpool", Vec::new()).await
    }

    /// `id` narrows the answer to one pool entry; an empty id is left out.
    pub async fn get_raw_tx_pool(
        &self,
        verbose: bool,
        id: Option<&str>,
    ) -> Result<Value, CoreError> {
        let mut params = vec![json!(verbose)];
        if let Some(id) = id.filter(|id| !id.is_empty()) {
            params.push(json!(id));
        }
        self.rpc.fetch("getrawtxpool", params).await
    }

    /// `include_tx_pool` defaults to `true`. The daemon answers `null` for a
    /// spent or unknown output.
    pub async fn get_tx_out(
        &self,
        txid: &str,
        n: u32,
        include_tx_pool: Option<bool>,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch(
                "gettxout",
                vec![json!(txid), json!(n), json!(include_tx_pool.unwrap_or(true))],
            )
            .await
    }

    pub async fn get_tx_out_proof(
        &self,
        txids: &[&str],
        blockhash: Option<&str>,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("gettxoutproof", txids_and_block(txids, blockhash))
            .await
    }

    pub async fn get_tx_out_proofs(
        &self,
        txids: &[&str],
        blockhash: Option<&str>,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("gettxoutproofs", txids_and_block(txids, blockhash))
            .await
    }

    pub async fn get_tx_outset_info(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("gettxoutsetinfo", Vec::new()).await
    }

    pub async fn get_tx_pool_ancestors(
        &self,
        txid: &str,
        verbose: bool,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("gettxpoolancestors", vec![json!(txid), json!(verbose)])
            .await
    }

    pub async fn get_tx_pool_descendants(
        &self,
        txid: &str,
        verbose: bool,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("gettxpooldescendants", vec![json!(txid), json!(verbose)])
            .await
    }

    pub async fn get_tx_pool_entry(&self, txid: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("gettxpoolentry", vec![json!(txid)]).await
    }

    pub async fn get_tx_pool_info(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("gettxpoolinfo", Vec::new()).await
    }

    pub async fn save_orphan_pool(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("saveorphanpool", Vec::new()).await
    }

    pub async fn save_tx_pool(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("savetxpool", Vec::new()).await
    }

    /// `action` is e.g. `start`, `abort` or `status`; an empty object list
    /// is left out.
    pub async fn scan_tokens(
        &self,
        action: &str,
        scan_objects: &[&str],
    ) -> Result<Value, CoreError> {
        let mut params = vec![json!(action)];
        if !scan_objects.is_empty() {
            params.push(json!(scan_objects));
        }
        self.rpc.fetch("scantokens", params).await
    }

    /// `check_level` defaults to 3 and `num_blocks` to 6.
    pub async fn verify_chain(
        &self,
        check_level: Option<u32>,
        num_blocks: Option<u64>,
    ) -> Result<bool, CoreError> {
        fetch_as(
            self.rpc,
            "verifychain",
            vec![json!(check_level.unwrap_or(3)), json!(num_blocks.unwrap_or(6))],
        )
        .await
    }

    /// Returns the txids the proof commits to.
    pub async fn verify_tx_out_proof(&self, proof: &str) -> Result<Vec<String>, CoreError> {
        fetch_as(self.rpc, "verifytxoutproof", vec![json!(proof)]).await
    }
}

fn txids_and_block(txids: &[&str], blockhash: Option<&str>) -> Vec<Value> {
    let mut params = vec![json!(txids)];
    if let Some(hash) = blockhash.filter(|hash| !hash.is_empty()) {
        params.push(json!(hash));
    }
    params
}
