use serde::{Deserialize, Serialize};
use std::fmt;

/// 网络地址（host:port）
///
/// Kept as the operator wrote it. Resolution and binding happen in the
/// listener layer, so no parsing is done here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(addr: &str) -> Self {
        Self(addr.to_string())
    }
}

impl From<String> for Address {
    fn from(addr: String) -> Self {
        Self(addr)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
