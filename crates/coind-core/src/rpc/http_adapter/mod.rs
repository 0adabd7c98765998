//! HTTP JSON-RPC client for coin daemons.
//!
//! [`HttpTransport`] does one request/response round trip, [`CoindSession`]
//! owns the lifetime of the pooled HTTP session, and [`Coind`] is the
//! dispatch facade every namespace method goes through.

mod client;
mod connection;
mod protocol;
mod session;
mod transport;

pub use client::Coind;
pub use connection::{Endpoint, SessionConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use session::{CoindSession, SessionHandle};
pub use transport::HttpTransport;
