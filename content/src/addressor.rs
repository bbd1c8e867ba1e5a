//! The content-addressor boundary.
//!
//! Content bodies are stored outside the engine (an IPFS-like store in
//! production). The engine only ever sees the opaque, content-derived
//! reference handed back by `put`.

use agora_types::ContentRef;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressorError {
    #[error("content addressor unavailable: {0}")]
    Unavailable(String),

    #[error("content upload timed out after {0}s")]
    Timeout(u64),
}

/// Capability trait for content-addressed storage.
///
/// Implementations must bound their own I/O — a `put` call may fail but may
/// not block the caller indefinitely.
pub trait ContentAddressor: Send + Sync {
    /// Store `content` and return its reference.
    fn put(&self, content: &[u8]) -> Result<ContentRef, AddressorError>;

    /// Human-readable name of this addressor.
    fn name(&self) -> &str;
}

/// In-memory addressor: the reference is the hex-encoded Blake2b-256 digest
/// of the content. Used in tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryAddressor;

impl ContentAddressor for MemoryAddressor {
    fn put(&self, content: &[u8]) -> Result<ContentRef, AddressorError> {
        let digest = Blake2b::<U32>::digest(content);
        Ok(ContentRef::new(hex::encode(digest)))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
