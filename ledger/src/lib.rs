//! Ledger collaborator boundary for the Agora governance engine.
//!
//! Token accounting lives in an external system; the engine only needs the
//! narrow surface defined by [`Ledger`]: accounts, eligibility flags, capped
//! reward deposits, named membership pools, and an append-only event log.
//! The engine emits one event per state transition, best-effort — an
//! emission failure never rolls back the transition that triggered it.

pub mod error;
pub mod event;
pub mod memory;

pub use error::LedgerError;
pub use event::{Event, EventKind};
pub use memory::MemoryLedger;

use agora_types::UserId;

/// The opaque ledger/reward collaborator.
pub trait Ledger: Send + Sync {
    /// Create an account for a newly registered user.
    fn create_account(&self, user: &UserId) -> Result<(), LedgerError>;

    /// Mark an account eligible (or not) for rewards.
    fn set_eligible(&self, user: &UserId, eligible: bool) -> Result<(), LedgerError>;

    /// Mint `amount` to `user`. Returns `false` when the mint was refused
    /// (e.g. a supply cap) — distinct from a collaborator failure.
    fn deposit(&self, user: &UserId, amount: u64) -> Result<bool, LedgerError>;

    /// Add `user` to a named membership pool.
    fn add_to_pool(&self, pool: &str, user: &UserId) -> Result<(), LedgerError>;

    /// Append an event with a stable kind string and a JSON payload.
    fn add_event(&self, kind: EventKind, payload: serde_json::Value) -> Result<(), LedgerError>;

    /// The most recent `count` events (all of them when `None`), oldest
    /// first.
    fn list_events(&self, count: Option<usize>) -> Result<Vec<Event>, LedgerError>;
}
