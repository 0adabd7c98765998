use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CoreError;

use super::super::{decode_result, CoindRpc};
use super::session::SessionHandle;
use super::transport::HttpTransport;

/// Client bound to one open daemon session.
///
/// Every namespace method ends up in [`Coind::fetch`], which stamps the
/// request with the next ID and hands it to the transport together with
/// this client's session. Safe to share across tasks; concurrent calls get
/// distinct IDs and independent round trips.
pub struct Coind {
    transport: Arc<HttpTransport>,
    session: SessionHandle,
    next_id: AtomicU64,
}

impl Coind {
    pub(crate) fn new(transport: Arc<HttpTransport>, session: SessionHandle) -> Self {
        Self {
            transport,
            session,
            next_id: AtomicU64::new(0),
        }
    }

    /// IDs start at 1: the counter is bumped before the request goes out.
    fn reserve_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The ID the most recent call was sent with, or 0 before any call.
    pub fn last_request_id(&self) -> u64 {
        self.next_id.load(Ordering::Relaxed)
    }

    pub async fn fetch(&self, method: &str, params: Vec<Value>) -> Result<Value, CoreError> {
        let id = self.reserve_request_id();
        self.transport
            .send(method, params, id, Some(&self.session))
            .await
    }

    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, CoreError> {
        let raw = self.fetch(method, params).await?;
        decode_result(method, raw)
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Release the session. Consumes the client so nothing can be sent
    /// through it afterwards.
    pub fn close(self) -> Result<(), CoreError> {
        self.session.close()?;
        debug!(rpc.requests = self.last_request_id(), "rpc session closed");
        Ok(())
    }
}

impl Drop for Coind {
    fn drop(&mut self) {
        if self.session.close().is_ok() {
            warn!(
                rpc.requests = self.last_request_id(),
                "rpc session released on drop without an explicit close"
            );
        }
    }
}

#[async_trait]
impl CoindRpc for Coind {
    async fn fetch(&self, method: &str, params: Vec<Value>) -> Result<Value, CoreError> {
        Coind::fetch(self, method, params).await
    }
}
