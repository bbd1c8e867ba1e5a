//! Governance proposals and their lifecycle state.

use agora_types::{ProposalId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-option summed vote weight. The caller interprets the distribution;
/// ties come back as equal sums, not as a picked winner.
pub type Tally = HashMap<String, f64>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Open,
    Closed,
}

/// One voter's recorded ballot. Re-voting overwrites the entry — last vote
/// wins, weights do not accumulate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ballot {
    pub option: String,
    pub weight: f64,
}

/// A governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: UserId,
    pub title: String,
    pub description: String,
    /// Opaque reference to the artifact being voted on.
    pub external_ref: String,
    /// One entry per voter.
    pub votes: HashMap<UserId, Ballot>,
    pub status: ProposalStatus,
    /// Once true, the stored tally never changes.
    pub finalized: bool,
    pub tally: Option<Tally>,
    pub created_at: Timestamp,
}

impl Proposal {
    /// Number of distinct voters — the quantity quorum is measured against.
    pub fn distinct_voters(&self) -> u32 {
        self.votes.len() as u32
    }
}
