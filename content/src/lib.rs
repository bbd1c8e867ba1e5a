//! Content store for the Agora governance engine.
//!
//! Owns posts and comments, their tag sets, and the comment-to-post linkage.
//! Deleting a post cascades to every comment on its list; deleting a comment
//! unlinks it from its owning post. Content bodies live behind an opaque
//! [`ContentAddressor`] — the store only records content references.

pub mod addressor;
pub mod error;
pub mod model;
pub mod store;

pub use addressor::{AddressorError, ContentAddressor, MemoryAddressor};
pub use error::ContentError;
pub use model::{Comment, Post};
pub use store::ContentStore;
