//! Parameter types shared by several namespaces.

use serde::Serialize;

/// Blocks can be addressed either by hash or by height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HashOrHeight {
    Hash(String),
    Height(u64),
}

impl From<&str> for HashOrHeight {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_owned())
    }
}

impl From<String> for HashOrHeight {
    fn from(hash: String) -> Self {
        Self::Hash(hash)
    }
}

impl From<u64> for HashOrHeight {
    fn from(height: u64) -> Self {
        Self::Height(height)
    }
}

impl From<u32> for HashOrHeight {
    fn from(height: u32) -> Self {
        Self::Height(height.into())
    }
}
