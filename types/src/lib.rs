//! Fundamental types for the Agora governance engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: identifiers, timestamps, content references, protocol
//! parameters, and the quorum arithmetic used by both voting engines.

pub mod content_ref;
pub mod id;
pub mod params;
pub mod quorum;
pub mod time;

pub use content_ref::ContentRef;
pub use id::{CommentId, DisputeId, PostId, ProposalId, UserId};
pub use params::{Action, ProtocolParams};
pub use quorum::quorum_threshold;
pub use time::Timestamp;
