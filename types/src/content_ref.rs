//! Opaque content references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, content-derived handle standing in for externally stored
/// content (e.g. an IPFS CID or a hex-encoded digest).
///
/// The engine never interprets the contents — it only stores and compares
/// references handed back by a [content addressor].
///
/// [content addressor]: https://docs.ipfs.tech/concepts/content-addressing/
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRef(String);

impl ContentRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
