/// Failures reaching the daemon or making sense of what it sent back.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),
}

/// A structured error object returned by the daemon's JSON-RPC layer.
///
/// `code` and `message` are carried verbatim so callers can tell, say,
/// `txn-mempool-conflict` apart from an insufficient-funds rejection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("daemon returned error {code}: {message}")]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session is already closed")]
    AlreadyClosed,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("RPC transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("session lifecycle error: {0}")]
    Session(#[from] SessionError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// The daemon error code, when this is an RPC-level failure.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            Self::Rpc(err) => Some(err.code),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Http(err)) if err.is_timeout())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportError::Http(err))
    }
}
