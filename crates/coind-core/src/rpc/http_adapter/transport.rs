use reqwest::{header, Url};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{CoreError, TransportError};

use super::connection::{Endpoint, SessionConfig};
use super::protocol::{into_result, JsonRpcRequest, JsonRpcResponse};
use super::session::SessionHandle;

/// Single-shot JSON-RPC 2.0 over HTTP POST.
///
/// Holds the target URL and credentials resolved from an [`Endpoint`]; the
/// HTTP session itself is supplied per call.
pub struct HttpTransport {
    url: Url,
    redacted_url: String,
    auth: Option<(String, String)>,
    config: SessionConfig,
}

impl HttpTransport {
    pub fn new(endpoint: &Endpoint, config: SessionConfig) -> Result<Self, CoreError> {
        // Validate the credential-bearing form too, so a username the URL
        // grammar cannot carry is rejected up front.
        endpoint.url()?;
        let url = endpoint.base_url()?;
        let auth = endpoint
            .has_credentials()
            .then(|| (endpoint.username().to_owned(), endpoint.password().to_owned()));

        Ok(Self {
            url,
            redacted_url: endpoint.redacted_url(),
            auth,
            config,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send one request and return the daemon's `result`.
    ///
    /// With `session = None` a throwaway session is opened for this call and
    /// closed before returning.
    pub async fn send(
        &self,
        method: &str,
        params: Vec<Value>,
        id: u64,
        session: Option<&SessionHandle>,
    ) -> Result<Value, CoreError> {
        match session {
            Some(session) => self.send_with(session, method, params, id).await,
            None => {
                let session = SessionHandle::open(&self.config)?;
                let outcome = self.send_with(&session, method, params, id).await;
                session.close()?;
                outcome
            }
        }
    }

    async fn send_with(
        &self,
        session: &SessionHandle,
        method: &str,
        params: Vec<Value>,
        id: u64,
    ) -> Result<Value, CoreError> {
        let client = session.client()?;
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.params = params.len(),
            rpc.url = %self.redacted_url,
            "rpc call"
        );
        let req = JsonRpcRequest {
            method,
            params,
            id,
            jsonrpc: "2.0",
        };

        let mut builder = client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder.send().await.map_err(TransportError::Http)?;
        let status = response.status();

        let body = response.text().await.map_err(TransportError::Http)?;
        debug!(rpc.id = id, rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.id = id, rpc.method = method, body = %body, "rpc response body");

        let decoded: JsonRpcResponse = serde_json::from_str(&body).map_err(|e| {
            TransportError::InvalidResponse(format!(
                "decode JSON-RPC response (HTTP {status}): {e}; body={body}"
            ))
        })?;

        into_result(decoded)
    }
}
