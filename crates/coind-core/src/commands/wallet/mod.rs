//! Wallet, account and key management calls.

mod options;

pub use options::{
    GetBalanceOptions, ImportAddressOptions, ImportKeyOptions, ListReceivedOptions,
    ListSinceBlockOptions, ListTransactionsOptions, ListUnspentOptions, MoveOptions,
    NewAddressOptions, SendFromOptions, SendManyOptions, SendToAddressOptions,
};

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::{fetch_as, CoindRpc};

pub struct Wallet<'a> {
    rpc: &'a dyn CoindRpc,
}

impl<'a> Wallet<'a> {
    pub fn new(rpc: &'a dyn CoindRpc) -> Self {
        Self { rpc }
    }

    pub async fn abandon_transaction(&self, txid: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("abandontransaction", vec![json!(txid)]).await
    }

    /// `account` defaults to the empty account.
    pub async fn add_multisig_address(
        &self,
        n_required: u32,
        keys: &[&str],
        account: Option<&str>,
    ) -> Result<String, CoreError> {
        fetch_as(
            self.rpc,
            "addmultisigaddress",
            vec![json!(n_required), json!(keys), json!(account.unwrap_or(""))],
        )
        .await
    }

    pub async fn backup_wallet(&self, destination: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("backupwallet", vec![json!(destination)]).await
    }

    pub async fn dump_private_key(&self, address: &str) -> Result<String, CoreError> {
        fetch_as(self.rpc, "dumpprivkey", vec![json!(address)]).await
    }

    pub async fn dump_wallet(&self, filename: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("dumpwallet", vec![json!(filename)]).await
    }

    pub async fn encrypt_wallet(&self, passphrase: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("encryptwallet", vec![json!(passphrase)]).await
    }

    pub async fn get_account(&self, address: &str) -> Result<String, CoreError> {
        fetch_as(self.rpc, "getaccount", vec![json!(address)]).await
    }

    pub async fn get_account_address(&self, account: &str) -> Result<String, CoreError> {
        fetch_as(self.rpc, "getaccountaddress", vec![json!(account)]).await
    }

    pub async fn get_addresses_by_account(&self, account: &str) -> Result<Vec<String>, CoreError> {
        fetch_as(self.rpc, "getaddressesbyaccount", vec![json!(account)]).await
    }

    pub async fn get_balance(&self, options: GetBalanceOptions) -> Result<f64, CoreError> {
        let mut params = Vec::with_capacity(3);
        params.extend(options.account.map(|account| json!(account)));
        params.push(json!(options.min_conf));
        params.push(json!(options.include_watch_only));
        fetch_as(self.rpc, "getbalance", params).await
    }

    pub async fn get_new_address(&self, options: NewAddressOptions) -> Result<String, CoreError> {
        let mut params = Vec::with_capacity(2);
        params.extend(options.address_type.map(|kind| json!(kind)));
        params.push(json!(options.account));
        fetch_as(self.rpc, "getnewaddress", params).await
    }

    pub async fn get_raw_change_address(&self) -> Result<String, CoreError> {
        fetch_as(self.rpc, "getrawchangeaddress", Vec::new()).await
    }

    /// `min_conf` defaults to 1.
    pub async fn get_received_by_account(
        &self,
        account: &str,
        min_conf: Option<u32>,
    ) -> Result<f64, CoreError> {
        fetch_as(
            self.rpc,
            "getreceivedbyaccount",
            vec![json!(account), json!(min_conf.unwrap_or(1))],
        )
        .await
    }

    /// `min_conf` defaults to 1.
    pub async fn get_received_by_address(
        &self,
        address: &str,
        min_conf: Option<u32>,
    ) -> Result<f64, CoreError> {
        fetch_as(
            self.rpc,
            "getreceivedbyaddress",
            vec![json!(address), json!(min_conf.unwrap_or(1))],
        )
        .await
    }

    pub async fn get_transaction(
        &self,
        txid: &str,
        include_watch_only: bool,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("gettransaction", vec![json!(txid), json!(include_watch_only)])
            .await
    }

    pub async fn get_unconfirmed_balance(&self) -> Result<f64, CoreError> {
        fetch_as(self.rpc, "getunconfirmedbalance", Vec::new()).await
    }

    pub async fn get_wallet_info(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getwalletinfo", Vec::new()).await
    }

    pub async fn import_address(
        &self,
        address: &str,
        options: ImportAddressOptions,
    ) -> Result<Value, CoreError> {
        let mut params = vec![json!(address)];
        params.extend(options.label.map(|label| json!(label)));
        params.push(json!(options.rescan));
        params.push(json!(options.p2sh));
        self.rpc.fetch("importaddress", params).await
    }

    /// `rescan` is `rescan` or `no-rescan`; addresses follow it as
    /// individual parameters rather than as one array.
    pub async fn import_addresses(
        &self,
        rescan: &str,
        addresses: &[&str],
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("importaddresses", flattened(rescan, addresses))
            .await
    }

    /// Same shape as [`import_addresses`](Self::import_addresses).
    pub async fn import_private_keys(
        &self,
        rescan: &str,
        private_keys: &[&str],
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("importprivatekeys", flattened(rescan, private_keys))
            .await
    }

    pub async fn import_priv_key(
        &self,
        private_key: &str,
        options: ImportKeyOptions,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("importprivkey", key_import_params(private_key, options))
            .await
    }

    pub async fn import_pruned_funds(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("importprunedfunds", Vec::new()).await
    }

    pub async fn import_pubkey(
        &self,
        pubkey: &str,
        options: ImportKeyOptions,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("importpubkey", key_import_params(pubkey, options))
            .await
    }

    pub async fn import_wallet(&self, filename: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("importwallet", vec![json!(filename)]).await
    }

    /// `new_size` defaults to 100.
    pub async fn keypool_refill(&self, new_size: Option<u32>) -> Result<Value, CoreError> {
        self.rpc
            .fetch("keypoolrefill", vec![json!(new_size.unwrap_or(100))])
            .await
    }

    /// Account name → balance. `min_conf` defaults to 1.
    pub async fn list_accounts(
        &self,
        min_conf: Option<u32>,
        include_watch_only: bool,
    ) -> Result<BTreeMap<String, f64>, CoreError> {
        fetch_as(
            self.rpc,
            "listaccounts",
            vec![json!(min_conf.unwrap_or(1)), json!(include_watch_only)],
        )
        .await
    }

    pub async fn list_active_addresses(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("listactiveaddresses", Vec::new()).await
    }

    pub async fn list_address_groupings(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("listaddressgroupings", Vec::new()).await
    }

    pub async fn list_lock_unspent(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("listlockunspent", Vec::new()).await
    }

    pub async fn list_received_by_account(
        &self,
        options: ListReceivedOptions,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("listreceivedbyaccount", list_received_params(options))
            .await
    }

    pub async fn list_received_by_address(
        &self,
        options: ListReceivedOptions,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("listreceivedbyaddress", list_received_params(options))
            .await
    }

    pub async fn list_since_block(
        &self,
        options: ListSinceBlockOptions,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch(
                "listsinceblock",
                vec![
                    json!(options.block_hash),
                    json!(options.target_confirmations),
                    json!(options.include_watch_only),
                ],
            )
            .await
    }

    pub async fn list_transactions(
        &self,
        options: ListTransactionsOptions,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("listtransactions", list_transactions_params(options))
            .await
    }

    pub async fn list_transactions_from(
        &self,
        options: ListTransactionsOptions,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("listtransactionsfrom", list_transactions_params(options))
            .await
    }

    pub async fn list_unspent(&self, options: ListUnspentOptions) -> Result<Value, CoreError> {
        let mut params = vec![json!(options.min_conf), json!(options.max_conf)];
        params.extend(options.addresses.map(|addresses| json!(addresses)));
        self.rpc.fetch("listunspent", params).await
    }

    /// `unlock = true` releases the listed outputs, `false` locks them.
    pub async fn lock_unspent(&self, unlock: bool, outputs: &[Value]) -> Result<bool, CoreError> {
        fetch_as(self.rpc, "lockunspent", vec![json!(unlock), json!(outputs)]).await
    }

    pub async fn move_funds(
        &self,
        from_account: &str,
        to_account: &str,
        amount: f64,
        options: MoveOptions,
    ) -> Result<bool, CoreError> {
        fetch_as(
            self.rpc,
            "move",
            vec![
                json!(from_account),
                json!(to_account),
                json!(amount),
                json!(options.min_conf),
                json!(options.comment),
            ],
        )
        .await
    }

    pub async fn remove_pruned_funds(&self, txid: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("removeprunedfunds", vec![json!(txid)]).await
    }

    /// Returns the txid.
    pub async fn send_from(
        &self,
        from_account: &str,
        to_address: &str,
        amount: f64,
        options: SendFromOptions,
    ) -> Result<String, CoreError> {
        fetch_as(
            self.rpc,
            "sendfrom",
            vec![
                json!(from_account),
                json!(to_address),
                json!(amount),
                json!(options.min_conf),
                json!(options.comment),
                json!(options.comment_to),
            ],
        )
        .await
    }

    /// Returns the txid.
    pub async fn send_many(
        &self,
        from_account: &str,
        amounts: &BTreeMap<String, f64>,
        options: SendManyOptions,
    ) -> Result<String, CoreError> {
        fetch_as(
            self.rpc,
            "sendmany",
            vec![
                json!(from_account),
                json!(amounts),
                json!(options.min_conf),
                json!(options.comment),
                json!(options.subtract_fee_from),
            ],
        )
        .await
    }

    /// Returns the txid.
    pub async fn send_to_address(
        &self,
        address: &str,
        amount: f64,
        options: SendToAddressOptions,
    ) -> Result<String, CoreError> {
        fetch_as(
            self.rpc,
            "sendtoaddress",
            vec![
                json!(address),
                json!(amount),
                json!(options.comment),
                json!(options.comment_to),
                json!(options.subtract_fee_from_amount),
            ],
        )
        .await
    }

    pub async fn set_account(&self, address: &str, account: &str) -> Result<Value, CoreError> {
        self.rpc
            .fetch("setaccount", vec![json!(address), json!(account)])
            .await
    }

    pub async fn sign_data(
        &self,
        address: &str,
        msg_format: &str,
        message: &str,
    ) -> Result<String, CoreError> {
        fetch_as(
            self.rpc,
            "signdata",
            vec![json!(address), json!(msg_format), json!(message)],
        )
        .await
    }

    pub async fn sign_message(&self, address: &str, message: &str) -> Result<String, CoreError> {
        fetch_as(
            self.rpc,
            "signmessage",
            vec![json!(address), json!(message)],
        )
        .await
    }

    pub async fn token_info(&self) -> Result<Value, CoreError> {
        self.token("info").await
    }

    pub async fn token_new(&self) -> Result<Value, CoreError> {
        self.token("new").await
    }

    pub async fn token_mint(&self) -> Result<Value, CoreError> {
        self.token("mint").await
    }

    pub async fn token_melt(&self) -> Result<Value, CoreError> {
        self.token("melt").await
    }

    pub async fn token_send(&self) -> Result<Value, CoreError> {
        self.token("send").await
    }

    async fn token(&self, subcommand: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("token", vec![json!(subcommand)]).await
    }
}

fn flattened(head: &str, rest: &[&str]) -> Vec<Value> {
    std::iter::once(head)
        .chain(rest.iter().copied())
        .map(|item| json!(item))
        .collect()
}

fn key_import_params(key: &str, options: ImportKeyOptions) -> Vec<Value> {
    let mut params = vec![json!(key)];
    params.extend(options.label.map(|label| json!(label)));
    params.push(json!(options.rescan));
    params
}

fn list_received_params(options: ListReceivedOptions) -> Vec<Value> {
    vec![
        json!(options.min_conf),
        json!(options.include_empty),
        json!(options.include_watch_only),
    ]
}

fn list_transactions_params(options: ListTransactionsOptions) -> Vec<Value> {
    vec![
        json!(options.account),
        json!(options.count),
        json!(options.from),
        json!(options.include_watch_only),
    ]
}
