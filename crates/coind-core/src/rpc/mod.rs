//! Coin daemon RPC abstraction layer.
//!
//! Defines the [`CoindRpc`] trait and provides an HTTP JSON-RPC
//! implementation ([`Coind`], opened from a [`CoindSession`]) plus a test
//! mock (`mock::MockRpc`).

mod http_adapter;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use http_adapter::{
    Coind, CoindSession, Endpoint, HttpTransport, SessionConfig, SessionHandle, DEFAULT_HOST,
    DEFAULT_PORT,
};
pub use types::HashOrHeight;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::commands::{
    Blockchain, Control, Generating, Mining, Network, RawTransactions, Util, Wallet, Zmq,
};
use crate::error::{CoreError, TransportError};

/// The one path to the daemon: a method name plus positional parameters.
///
/// Implementations handle request IDs, the HTTP session, and error mapping.
/// The namespace accessors group the daemon's commands the way its own help
/// output does.
#[async_trait]
pub trait CoindRpc: Send + Sync {
    async fn fetch(&self, method: &str, params: Vec<Value>) -> Result<Value, CoreError>;

    fn blockchain(&self) -> Blockchain<'_>
    where
        Self: Sized,
    {
        Blockchain::new(self)
    }

    fn control(&self) -> Control<'_>
    where
        Self: Sized,
    {
        Control::new(self)
    }

    fn generating(&self) -> Generating<'_>
    where
        Self: Sized,
    {
        Generating::new(self)
    }

    fn mining(&self) -> Mining<'_>
    where
        Self: Sized,
    {
        Mining::new(self)
    }

    fn network(&self) -> Network<'_>
    where
        Self: Sized,
    {
        Network::new(self)
    }

    fn raw_transactions(&self) -> RawTransactions<'_>
    where
        Self: Sized,
    {
        RawTransactions::new(self)
    }

    fn util(&self) -> Util<'_>
    where
        Self: Sized,
    {
        Util::new(self)
    }

    fn wallet(&self) -> Wallet<'_>
    where
        Self: Sized,
    {
        Wallet::new(self)
    }

    fn zmq(&self) -> Zmq<'_>
    where
        Self: Sized,
    {
        Zmq::new(self)
    }
}

/// Fetch and decode a typed result.
pub(crate) async fn fetch_as<T: DeserializeOwned>(
    rpc: &dyn CoindRpc,
    method: &str,
    params: Vec<Value>,
) -> Result<T, CoreError> {
    let raw = rpc.fetch(method, params).await?;
    decode_result(method, raw)
}

pub(crate) fn decode_result<T: DeserializeOwned>(method: &str, raw: Value) -> Result<T, CoreError> {
    serde_json::from_value(raw).map_err(|e| {
        TransportError::InvalidResponse(format!("invalid {method} result: {e}")).into()
    })
}
