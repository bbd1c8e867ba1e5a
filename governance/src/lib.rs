//! Proposal engine for the Agora governance system.
//!
//! Proposals move `open → closed` exactly once: either by an explicit tally
//! or automatically inside `vote` the moment distinct-voter participation
//! reaches quorum. Votes are reputation-weighted (square root) and the tally
//! reports the full per-option weight distribution — the engine never picks
//! a single winner.

pub mod engine;
pub mod error;
pub mod proposal;

pub use engine::{ProposalEngine, VoteOutcome};
pub use error::GovernanceError;
pub use proposal::{Ballot, Proposal, ProposalStatus, Tally};
