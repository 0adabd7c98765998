use std::fmt;
use std::time::Duration;

use reqwest::Url;

use crate::error::CoreError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5996;

/// Where the daemon lives and how to authenticate against it.
///
/// Built once and handed to a [`CoindSession`](super::CoindSession), which
/// derives the request URL from it exactly once.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    username: String,
    password: String,
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// A password alone still counts: it goes out as `:<password>`.
    pub(crate) fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    /// `http://<user>:<password>@<host>:<port>/`, credentials percent-encoded.
    pub fn url(&self) -> Result<Url, CoreError> {
        let mut url = self.base_url()?;
        if self.has_credentials() {
            url.set_username(&self.username).map_err(|()| {
                CoreError::InvalidConfig(format!("cannot embed username in `{url}`"))
            })?;
            if !self.password.is_empty() {
                url.set_password(Some(&self.password)).map_err(|()| {
                    CoreError::InvalidConfig(format!("cannot embed password in `{url}`"))
                })?;
            }
        }
        Ok(url)
    }

    /// The same URL with the password masked, for logs and error messages.
    pub fn redacted_url(&self) -> String {
        let authority = format!("{}:{}", bracket_ipv6(&self.host), self.port);
        if !self.has_credentials() {
            format!("http://{authority}/")
        } else if self.password.is_empty() {
            format!("http://{}@{authority}/", self.username)
        } else {
            format!("http://{}:***@{authority}/", self.username)
        }
    }

    /// The URL without userinfo; credentials travel in the `Authorization`
    /// header instead.
    pub(crate) fn base_url(&self) -> Result<Url, CoreError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(CoreError::InvalidConfig("rpc host must not be empty".to_owned()));
        }
        let raw = format!("http://{}:{}/", bracket_ipv6(host), self.port);
        let url = Url::parse(&raw).map_err(|e| {
            CoreError::InvalidConfig(format!("invalid rpc host `{host}`: {e}"))
        })?;
        if url.host_str().is_none() {
            return Err(CoreError::InvalidConfig(format!(
                "rpc host `{host}` does not form a valid URL authority"
            )));
        }
        Ok(url)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("username", &self.username)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

fn bracket_ipv6(host: &str) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_owned()
    }
}

/// HTTP client settings applied to every session opened from a
/// [`CoindSession`](super::CoindSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub connect_timeout: Duration,
    /// Whole-request deadline. `None`, the default, leaves calls unbounded,
    /// since rescans and wallet imports can run for minutes.
    pub request_timeout: Option<Duration>,
    pub pool_max_idle_per_host: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            pool_max_idle_per_host: 32,
        }
    }
}
