//! Async JSON-RPC client for coin full-node daemons.
//!
//! Open a [`CoindSession`](rpc::CoindSession) against an
//! [`Endpoint`](rpc::Endpoint), then reach the daemon's commands through the
//! namespace accessors on [`CoindRpc`](rpc::CoindRpc) (`blockchain()`,
//! `wallet()`, `mining()`, ...) or call any method directly with
//! [`Coind::fetch`](rpc::Coind::fetch).

pub mod commands;
pub mod error;
pub mod rpc;

pub use error::{CoreError, RpcError, SessionError, TransportError};
pub use rpc::{Coind, CoindRpc, CoindSession, Endpoint, SessionConfig};
