//! Protocol parameters — every operator-tunable value in one place.
//!
//! Ratios are expressed in basis points (6000 = 60%) so quorum arithmetic
//! stays in integers; see [`crate::quorum::quorum_threshold`].

use serde::{Deserialize, Serialize};

/// Gated actions, each with a required verification level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Propose,
    Vote,
    Post,
    Comment,
    Report,
    Dispute,
    Juror,
}

impl Action {
    /// Stable snake_case name of this action, used as the config-table key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Propose => "propose",
            Self::Vote => "vote",
            Self::Post => "post",
            Self::Comment => "comment",
            Self::Report => "report",
            Self::Dispute => "dispute",
            Self::Juror => "juror",
        }
    }

    /// Parse an action from its snake_case name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "propose" => Some(Self::Propose),
            "vote" => Some(Self::Vote),
            "post" => Some(Self::Post),
            "comment" => Some(Self::Comment),
            "report" => Some(Self::Report),
            "dispute" => Some(Self::Dispute),
            "juror" => Some(Self::Juror),
            _ => None,
        }
    }
}

/// All tunable parameters of the governance and dispute engines.
///
/// Fields missing from a deserialized config fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParams {
    // ── Governance ───────────────────────────────────────────────────────
    /// Fraction of the eligible-voter population (basis points) whose
    /// participation auto-finalizes a proposal. Default: 6000 (60%).
    pub quorum_ratio_bps: u32,

    // ── Disputes ─────────────────────────────────────────────────────────
    /// Number of jurors sampled per dispute. Default: 7.
    pub jury_size: u32,

    /// Fraction of the jury (basis points) whose votes trigger resolution.
    /// Applied against the actually-selected juror count, so a degraded
    /// jury (candidate pool smaller than `jury_size`) can still resolve.
    /// Default: 5000 (50%).
    pub jury_quorum_ratio_bps: u32,

    // ── Identity gate ────────────────────────────────────────────────────
    /// Verification level required to submit a proposal.
    pub propose_level: u32,
    /// Verification level required to vote on a proposal.
    pub vote_level: u32,
    /// Verification level required to create a post.
    pub post_level: u32,
    /// Verification level required to create a comment.
    pub comment_level: u32,
    /// Verification level required to report content.
    pub report_level: u32,
    /// Verification level required to open a dispute directly.
    pub dispute_level: u32,
    /// Verification level required to sit on a jury.
    /// Strictly higher than `dispute_level` by default — reporters and
    /// adjudicators are distinct eligibility tiers.
    pub juror_level: u32,

    // ── Rewards ──────────────────────────────────────────────────────────
    /// Tokens minted to an author per post.
    pub post_reward: u64,
    /// Tokens minted to an author per comment.
    pub comment_reward: u64,
    /// Tokens minted to a complainant per accepted dispute.
    pub dispute_bounty: u64,
}

impl ProtocolParams {
    /// The intended live configuration.
    pub fn agora_defaults() -> Self {
        Self {
            quorum_ratio_bps: 6000,      // 60%
            jury_size: 7,
            jury_quorum_ratio_bps: 5000, // 50%

            propose_level: 1,
            vote_level: 1,
            post_level: 1,
            comment_level: 1,
            report_level: 2,
            dispute_level: 2,
            juror_level: 3,

            post_reward: 10,
            comment_reward: 5,
            dispute_bounty: 15,
        }
    }

    /// Verification level required for `action`.
    pub fn required_level(&self, action: Action) -> u32 {
        match action {
            Action::Propose => self.propose_level,
            Action::Vote => self.vote_level,
            Action::Post => self.post_level,
            Action::Comment => self.comment_level,
            Action::Report => self.report_level,
            Action::Dispute => self.dispute_level,
            Action::Juror => self.juror_level,
        }
    }

    /// Override the level for a single action.
    pub fn set_level(&mut self, action: Action, level: u32) {
        match action {
            Action::Propose => self.propose_level = level,
            Action::Vote => self.vote_level = level,
            Action::Post => self.post_level = level,
            Action::Comment => self.comment_level = level,
            Action::Report => self.report_level = level,
            Action::Dispute => self.dispute_level = level,
            Action::Juror => self.juror_level = level,
        }
    }
}

/// Default is the live Agora configuration.
impl Default for ProtocolParams {
    fn default() -> Self {
        Self::agora_defaults()
    }
}
