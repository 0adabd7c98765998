use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::CoindRpc;

/// Policy overrides for [`RawTransactions::send_raw_transaction`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendRawTransactionOptions {
    pub allow_high_fees: bool,
    pub allow_non_standard: bool,
    pub verbose: bool,
}

/// Policy overrides for [`RawTransactions::validate_raw_transaction`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateRawTransactionOptions {
    pub allow_high_fees: bool,
    pub allow_non_standard: bool,
}

pub struct RawTransactions<'a> {
    rpc: &'a dyn CoindRpc,
}

impl<'a> RawTransactions<'a> {
    pub fn new(rpc: &'a dyn CoindRpc) -> Self {
        Self { rpc }
    }

    /// Build an unsigned transaction; returns its hex encoding.
    pub async fn create_raw_transaction(
        &self,
        inputs: &[Value],
        outputs: &Value,
        locktime: Option<u32>,
    ) -> Result<Value, CoreError> {
        let mut params = vec![json!(inputs), outputs.clone()];
        params.extend(locktime.map(|locktime| json!(locktime)));
        self.rpc.fetch("createrawtransaction", params).await
    }

    pub async fn decode_raw_transaction(&self, hex: &str) -> Result<Value, CoreError> {
        self.rpc
            .fetch("decoderawtransaction", vec![json!(hex)])
            .await
    }

    pub async fn decode_script(&self, hex_script: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("decodescript", vec![json!(hex_script)]).await
    }

    pub async fn enqueue_raw_transaction(
        &self,
        hex: &str,
        options: Option<&str>,
    ) -> Result<Value, CoreError> {
        let mut params = vec![json!(hex)];
        params.extend(options.map(|options| json!(options)));
        self.rpc.fetch("enqueuerawtransaction", params).await
    }

    pub async fn fund_raw_transaction(
        &self,
        hex: &str,
        include_watching: bool,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch(
                "fundrawtransaction",
                vec![json!(hex), json!(include_watching)],
            )
            .await
    }

    pub async fn get_raw_block_transactions(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getrawblocktransactions", Vec::new()).await
    }

    /// Hex string by default, decoded object when `verbose`. `block_hash`
    /// is only sent along with `verbose`.
    pub async fn get_raw_transaction(
        &self,
        txid: &str,
        verbose: bool,
        block_hash: Option<&str>,
    ) -> Result<Value, CoreError> {
        let params = match (verbose, block_hash) {
            (true, Some(block_hash)) => vec![json!(txid), json!(true), json!(block_hash)],
            (true, None) => vec![json!(txid), json!(true)],
            (false, _) => vec![json!(txid)],
        };
        self.rpc.fetch("getrawtransaction", params).await
    }

    pub async fn get_raw_transactions_since(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getrawtransactionssince", Vec::new()).await
    }

    /// Broadcast a signed transaction.
    ///
    /// Flags are positional: the array is cut after the last one that is
    /// set, and any earlier unset flag is sent as `false` to hold its slot.
    pub async fn send_raw_transaction(
        &self,
        hex: &str,
        options: SendRawTransactionOptions,
    ) -> Result<Value, CoreError> {
        let flags = [
            options.allow_high_fees,
            options.allow_non_standard,
            options.verbose,
        ];
        self.rpc
            .fetch("sendrawtransaction", hex_with_flags(hex, &flags))
            .await
    }

    /// `sighash_type` and `sig_type` default to `ALL` and are always sent.
    pub async fn sign_raw_transaction(
        &self,
        hex: &str,
        prev_outputs: &[Value],
        private_keys: &[&str],
        sighash_type: Option<&str>,
        sig_type: Option<&str>,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch(
                "signrawtransaction",
                vec![
                    json!(hex),
                    json!(prev_outputs),
                    json!(private_keys),
                    json!(sighash_type.unwrap_or("ALL")),
                    json!(sig_type.unwrap_or("ALL")),
                ],
            )
            .await
    }

    /// Run mempool acceptance checks without broadcasting. Flags are shaped
    /// as in [`send_raw_transaction`](Self::send_raw_transaction).
    pub async fn validate_raw_transaction(
        &self,
        hex: &str,
        options: ValidateRawTransactionOptions,
    ) -> Result<Value, CoreError> {
        let flags = [options.allow_high_fees, options.allow_non_standard];
        self.rpc
            .fetch("validaterawtransaction", hex_with_flags(hex, &flags))
            .await
    }
}

fn hex_with_flags(hex: &str, flags: &[bool]) -> Vec<Value> {
    let used = flags.iter().rposition(|flag| *flag).map_or(0, |last| last + 1);
    let mut params = Vec::with_capacity(used + 1);
    params.push(json!(hex));
    params.extend(flags[..used].iter().map(|flag| json!(flag)));
    params
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rpc::mock::MockRpc;

    #[tokio::test]
    async fn send_raw_transaction_without_flags_sends_hex_only() {
        let rpc = MockRpc::builder()
            .with_result("sendrawtransaction", json!("txid"))
            .build();
        let txid = rpc
            .raw_transactions()
            .send_raw_transaction("deadbeef", SendRawTransactionOptions::default())
            .await
            .unwrap();
        assert_eq!(txid, json!("txid"));
        assert_eq!(
            rpc.only_call(),
            ("sendrawtransaction".to_owned(), vec![json!("deadbeef")])
        );
    }

    #[tokio::test]
    async fn send_raw_transaction_keeps_flag_positions() {
        let rpc = MockRpc::new();
        let raw = rpc.raw_transactions();
        raw.send_raw_transaction(
            "aa",
            SendRawTransactionOptions {
                allow_high_fees: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        raw.send_raw_transaction(
            "aa",
            SendRawTransactionOptions {
                allow_non_standard: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        raw.send_raw_transaction(
            "aa",
            SendRawTransactionOptions {
                verbose: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let params: Vec<_> = rpc.calls().into_iter().map(|(_, p)| p).collect();
        assert_eq!(params[0], vec![json!("aa"), json!(true)]);
        assert_eq!(params[1], vec![json!("aa"), json!(false), json!(true)]);
        assert_eq!(
            params[2],
            vec![json!("aa"), json!(false), json!(false), json!(true)]
        );
    }

    #[tokio::test]
    async fn send_raw_transaction_surfaces_mempool_conflict() {
        let rpc = MockRpc::builder()
            .with_error("sendrawtransaction", -26, "txn-mempool-conflict")
            .build();
        let err = rpc
            .raw_transactions()
            .send_raw_transaction("deadbeef", SendRawTransactionOptions::default())
            .await
            .expect_err("daemon rejection must surface");
        match err {
            CoreError::Rpc(rpc_err) => {
                assert_eq!(rpc_err.code, -26);
                assert_eq!(rpc_err.message, "txn-mempool-conflict");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn validate_raw_transaction_shapes_flags() {
        let rpc = MockRpc::new();
        rpc.raw_transactions()
            .validate_raw_transaction("aa", ValidateRawTransactionOptions::default())
            .await
            .unwrap();
        rpc.raw_transactions()
            .validate_raw_transaction(
                "aa",
                ValidateRawTransactionOptions {
                    allow_high_fees: true,
                    allow_non_standard: true,
                },
            )
            .await
            .unwrap();
        let params: Vec<_> = rpc.calls().into_iter().map(|(_, p)| p).collect();
        assert_eq!(params[0], vec![json!("aa")]);
        assert_eq!(params[1], vec![json!("aa"), json!(true), json!(true)]);
    }

    #[tokio::test]
    async fn get_raw_transaction_ignores_block_hash_unless_verbose() {
        let rpc = MockRpc::new();
        let raw = rpc.raw_transactions();
        raw.get_raw_transaction("t", false, Some("bh")).await.unwrap();
        raw.get_raw_transaction("t", true, None).await.unwrap();
        raw.get_raw_transaction("t", true, Some("bh")).await.unwrap();
        let params: Vec<_> = rpc.calls().into_iter().map(|(_, p)| p).collect();
        assert_eq!(params[0], vec![json!("t")]);
        assert_eq!(params[1], vec![json!("t"), json!(true)]);
        assert_eq!(params[2], vec![json!("t"), json!(true), json!("bh")]);
    }

    #[tokio::test]
    async fn create_raw_transaction_appends_locktime() {
        let rpc = MockRpc::new();
        let inputs = vec![json!({"outpoint": "op", "amount": 1.0})];
        let outputs = json!({"nexa:addr": 0.5});
        rpc.raw_transactions()
            .create_raw_transaction(&inputs, &outputs, None)
            .await
            .unwrap();
        rpc.raw_transactions()
            .create_raw_transaction(&inputs, &outputs, Some(500))
            .await
            .unwrap();
        let params: Vec<_> = rpc.calls().into_iter().map(|(_, p)| p).collect();
        assert_eq!(params[0], vec![json!(inputs), outputs.clone()]);
        assert_eq!(params[1], vec![json!(inputs), outputs, json!(500)]);
    }

    #[tokio::test]
    async fn sign_raw_transaction_defaults_sighash() {
        let rpc = MockRpc::new();
        rpc.raw_transactions()
            .sign_raw_transaction("aa", &[], &["key"], None, Some("SCHNORR"))
            .await
            .unwrap();
        assert_eq!(
            rpc.only_call().1,
            vec![
                json!("aa"),
                json!([]),
                json!(["key"]),
                json!("ALL"),
                json!("SCHNORR")
            ]
        );
    }

    #[tokio::test]
    async fn enqueue_raw_transaction_appends_options() {
        let rpc = MockRpc::new();
        rpc.raw_transactions()
            .enqueue_raw_transaction("aa", Some("flush"))
            .await
            .unwrap();
        assert_eq!(rpc.only_call().1, vec![json!("aa"), json!("flush")]);
    }
}
