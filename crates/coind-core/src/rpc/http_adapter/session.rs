use std::sync::{Arc, PoisonError, RwLock};

use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::error::{CoreError, SessionError};

use super::client::Coind;
use super::connection::{Endpoint, SessionConfig};
use super::transport::HttpTransport;

/// A live HTTP session: one pooled `reqwest::Client`, released exactly once.
///
/// Cloning the handle shares the same session. Requests already in flight
/// keep their own reference to the pool and finish normally after `close`;
/// new requests on a closed handle fail with [`SessionError::AlreadyClosed`].
#[derive(Clone)]
pub struct SessionHandle {
    client: Arc<RwLock<Option<reqwest::Client>>>,
}

impl SessionHandle {
    pub(crate) fn open(config: &SessionConfig) -> Result<Self, CoreError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .tcp_nodelay(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(RwLock::new(Some(client))),
        })
    }

    pub(crate) fn client(&self) -> Result<reqwest::Client, SessionError> {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(SessionError::AlreadyClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Release the underlying connection pool. A second call reports
    /// [`SessionError::AlreadyClosed`] instead of releasing again.
    pub fn close(&self) -> Result<(), SessionError> {
        self.client
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .map(drop)
            .ok_or(SessionError::AlreadyClosed)
    }
}

/// Scoped owner of a daemon connection.
///
/// Holds the endpoint for its whole lifetime; every [`open`](Self::open)
/// creates one fresh HTTP session and binds it to a new [`Coind`] client.
pub struct CoindSession {
    endpoint: Endpoint,
    config: SessionConfig,
    transport: Arc<HttpTransport>,
}

impl CoindSession {
    pub fn new(endpoint: Endpoint) -> Result<Self, CoreError> {
        Self::with_config(endpoint, SessionConfig::default())
    }

    pub fn with_config(endpoint: Endpoint, config: SessionConfig) -> Result<Self, CoreError> {
        let transport = Arc::new(HttpTransport::new(&endpoint, config)?);
        Ok(Self {
            endpoint,
            config,
            transport,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Open a session and return the client bound to it. The session is
    /// released by [`Coind::close`], or implicitly when the client is dropped.
    pub fn open(&self) -> Result<Coind, CoreError> {
        let session = SessionHandle::open(&self.config)?;
        debug!(rpc.url = %self.endpoint.redacted_url(), "rpc session opened");
        Ok(Coind::new(Arc::clone(&self.transport), session))
    }

    /// Run `body` against a freshly opened client and close the session on
    /// the way out, whether the body succeeded or not.
    ///
    /// A body error takes precedence over a close error; a close error after
    /// a successful body is returned as the outcome.
    ///
    /// ```no_run
    /// # async fn demo() -> Result<(), coind_core::CoreError> {
    /// use coind_core::rpc::{CoindRpc, CoindSession, Endpoint};
    ///
    /// let session = CoindSession::new(Endpoint::new("user", "pass"))?;
    /// let height = session
    ///     .scope(|coind| Box::pin(async move { coind.blockchain().get_block_count().await }))
    ///     .await?;
    /// # let _ = height;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scope<T, F>(&self, body: F) -> Result<T, CoreError>
    where
        F: for<'c> FnOnce(&'c Coind) -> BoxFuture<'c, Result<T, CoreError>>,
    {
        let coind = self.open()?;
        let outcome = body(&coind).await;
        let closed = coind.close();

        match (outcome, closed) {
            (Err(err), Err(close_err)) => {
                warn!(error = %close_err, "rpc session close failed after body error");
                Err(err)
            }
            (Err(err), Ok(())) => Err(err),
            (Ok(_), Err(close_err)) => Err(close_err),
            (Ok(value), Ok(())) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_closes_exactly_once() {
        let handle = SessionHandle::open(&SessionConfig::default()).expect("session must open");
        assert!(!handle.is_closed());
        assert!(handle.client().is_ok());

        handle.close().expect("first close must succeed");
        assert!(handle.is_closed());
        assert_eq!(handle.close(), Err(SessionError::AlreadyClosed));
        assert!(matches!(handle.client(), Err(SessionError::AlreadyClosed)));
    }

    #[test]
    fn clones_share_one_session() {
        let handle = SessionHandle::open(&SessionConfig::default()).expect("session must open");
        let shared = handle.clone();
        handle.close().expect("close must succeed");
        assert!(shared.is_closed());
        assert_eq!(shared.close(), Err(SessionError::AlreadyClosed));
    }

    #[test]
    fn session_manager_keeps_endpoint() {
        let endpoint = Endpoint::new("alice", "secret").with_port(18332);
        let session = CoindSession::new(endpoint.clone()).expect("session manager must build");
        assert_eq!(session.endpoint(), &endpoint);
    }

    #[test]
    fn session_manager_rejects_bad_endpoint() {
        let result = CoindSession::new(Endpoint::new("u", "p").with_host(""));
        assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
    }
}
