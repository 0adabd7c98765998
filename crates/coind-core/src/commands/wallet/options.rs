//! Optional-argument sets for wallet calls with several trailing defaults.
//!
//! `Default` reproduces what the daemon is sent when the caller does not
//! override anything; fields typed `Option` are left out of the parameter
//! array entirely when `None`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetBalanceOptions {
    /// `None` drops the account slot, so `min_conf` moves into first place.
    pub account: Option<String>,
    pub min_conf: u32,
    pub include_watch_only: bool,
}

impl Default for GetBalanceOptions {
    fn default() -> Self {
        Self {
            account: Some("*".to_owned()),
            min_conf: 1,
            include_watch_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddressOptions {
    /// `legacy`, `p2sh-segwit` or `bech32`; `None` drops the slot.
    pub address_type: Option<String>,
    pub account: String,
}

impl Default for NewAddressOptions {
    fn default() -> Self {
        Self {
            address_type: Some("legacy".to_owned()),
            account: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAddressOptions {
    pub label: Option<String>,
    pub rescan: bool,
    pub p2sh: bool,
}

impl Default for ImportAddressOptions {
    fn default() -> Self {
        Self {
            label: Some(String::new()),
            rescan: true,
            p2sh: false,
        }
    }
}

/// Shared by `importprivkey` and `importpubkey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportKeyOptions {
    pub label: Option<String>,
    pub rescan: bool,
}

impl Default for ImportKeyOptions {
    fn default() -> Self {
        Self {
            label: Some(String::new()),
            rescan: true,
        }
    }
}

/// Shared by `listreceivedbyaccount` and `listreceivedbyaddress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListReceivedOptions {
    pub min_conf: u32,
    pub include_empty: bool,
    pub include_watch_only: bool,
}

impl Default for ListReceivedOptions {
    fn default() -> Self {
        Self {
            min_conf: 1,
            include_empty: false,
            include_watch_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSinceBlockOptions {
    pub block_hash: String,
    pub target_confirmations: u32,
    pub include_watch_only: bool,
}

impl Default for ListSinceBlockOptions {
    fn default() -> Self {
        Self {
            block_hash: String::new(),
            target_confirmations: 1,
            include_watch_only: false,
        }
    }
}

/// Shared by `listtransactions` and `listtransactionsfrom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTransactionsOptions {
    pub account: String,
    pub count: u32,
    pub from: u32,
    pub include_watch_only: bool,
}

impl Default for ListTransactionsOptions {
    fn default() -> Self {
        Self {
            account: "*".to_owned(),
            count: 10,
            from: 0,
            include_watch_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUnspentOptions {
    pub min_conf: u32,
    pub max_conf: u32,
    pub addresses: Option<Vec<String>>,
}

impl Default for ListUnspentOptions {
    fn default() -> Self {
        Self {
            min_conf: 1,
            max_conf: 9_999_999,
            addresses: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOptions {
    pub min_conf: u32,
    pub comment: String,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            min_conf: 1,
            comment: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendFromOptions {
    pub min_conf: u32,
    pub comment: String,
    pub comment_to: String,
}

impl Default for SendFromOptions {
    fn default() -> Self {
        Self {
            min_conf: 1,
            comment: String::new(),
            comment_to: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendManyOptions {
    pub min_conf: u32,
    pub comment: String,
    /// Sent as `null` when `None`; the slot is always present.
    pub subtract_fee_from: Option<Vec<String>>,
}

impl Default for SendManyOptions {
    fn default() -> Self {
        Self {
            min_conf: 1,
            comment: String::new(),
            subtract_fee_from: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendToAddressOptions {
    pub comment: String,
    pub comment_to: String,
    pub subtract_fee_from_amount: bool,
}
