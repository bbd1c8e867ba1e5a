//! Engine events — one per state transition, with stable kind strings.

use agora_types::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every event kind the engine emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    UserRegister,
    Proposal,
    Vote,
    Reputation,
    Post,
    Comment,
    DisputeCreate,
    JurorsAssigned,
    JurorVote,
    DisputeResolution,
    Reward,
    RewardFailed,
}

impl EventKind {
    /// The stable wire string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserRegister => "user_register",
            Self::Proposal => "proposal",
            Self::Vote => "vote",
            Self::Reputation => "reputation",
            Self::Post => "post",
            Self::Comment => "comment",
            Self::DisputeCreate => "dispute_create",
            Self::JurorsAssigned => "jurors_assigned",
            Self::JurorVote => "juror_vote",
            Self::DisputeResolution => "dispute_resolution",
            Self::Reward => "reward",
            Self::RewardFailed => "reward_failed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub payload: serde_json::Value,
    pub at: Timestamp,
}
