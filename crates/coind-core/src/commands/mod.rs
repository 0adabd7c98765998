//! Typed wrappers for the daemon's commands, one type per command category.
//!
//! Each wrapper borrows a [`CoindRpc`](crate::rpc::CoindRpc) and turns its
//! arguments into the exact positional array the daemon expects. Trailing
//! optional arguments are shaped per command: some are always sent with a
//! default, some are dropped when absent, and a few are padded with `null`.

mod blockchain;
mod control;
mod generating;
mod mining;
mod network;
mod raw_transactions;
mod util;
mod wallet;
mod zmq;

pub use blockchain::Blockchain;
pub use control::Control;
pub use generating::Generating;
pub use mining::Mining;
pub use network::Network;
pub use raw_transactions::{
    RawTransactions, SendRawTransactionOptions, ValidateRawTransactionOptions,
};
pub use util::Util;
pub use wallet::{
    GetBalanceOptions, ImportAddressOptions, ImportKeyOptions, ListReceivedOptions,
    ListSinceBlockOptions, ListTransactionsOptions, ListUnspentOptions, MoveOptions,
    NewAddressOptions, SendFromOptions, SendManyOptions, SendToAddressOptions, Wallet,
};
pub use zmq::Zmq;
