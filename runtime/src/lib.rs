//! Runtime executor for the Agora governance engine.
//!
//! Wires the identity registry, content store, proposal engine, and dispute
//! engine behind one facade. Every mutating operation passes the identity
//! gate first, then mutates exactly one engine, then emits one event to the
//! ledger collaborator — best-effort: an emission or reward failure is
//! logged and never rolls back the state transition that triggered it.

pub mod config;
pub mod error;
pub mod executor;

pub use config::RuntimeConfig;
pub use error::RuntimeError;
pub use executor::{CommentCreated, DisputeCreated, Executor, PostCreated};
