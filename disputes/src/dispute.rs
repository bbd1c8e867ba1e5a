//! Dispute entities and verdict types.

use agora_types::{CommentId, ContentRef, DisputeId, PostId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// What a dispute is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Subject {
    Post(PostId),
    Comment(CommentId),
}

impl Subject {
    /// Stable kind string for event payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Post(_) => "post",
            Self::Comment(_) => "comment",
        }
    }

    pub fn id_value(&self) -> u64 {
        match self {
            Self::Post(id) => id.as_u64(),
            Self::Comment(id) => id.as_u64(),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id_value())
    }
}

/// A single juror's ballot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JurorBallot {
    /// The complaint is justified — the content should be removed.
    Valid,
    /// The complaint is unjustified.
    Invalid,
}

/// The verdict of a closed dispute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Complaint upheld — the subject is removed.
    Valid,
    /// Complaint rejected — the subject stays.
    Invalid,
    /// The jury split evenly — no content action is taken.
    Tie,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Tie => "tie",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    Open,
    Closed,
}

/// A dispute over a piece of content.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dispute {
    pub id: DisputeId,
    pub subject: Subject,
    pub complainant: UserId,
    /// Content reference of the complaint description.
    pub description: ContentRef,
    pub status: DisputeStatus,
    /// Jurors sampled once at creation; never resampled.
    pub jurors: Vec<UserId>,
    /// One ballot per juror; re-voting overwrites.
    pub votes: HashMap<UserId, JurorBallot>,
    /// The configured jury size at creation (the actual jury may be smaller
    /// when the candidate pool was short).
    pub jury_size: u32,
    /// The verdict, set exactly once when the dispute closes.
    pub decision: Option<Decision>,
    pub created_at: Timestamp,
}

impl Dispute {
    pub fn is_juror(&self, user: &UserId) -> bool {
        self.jurors.contains(user)
    }
}
