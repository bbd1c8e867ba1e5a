use agora_content::{AddressorError, ContentError};
use agora_disputes::DisputeError;
use agora_governance::GovernanceError;
use agora_identity::IdentityError;
use agora_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("user {user} does not meet verification level {required} for {action}")]
    InsufficientLevel {
        user: String,
        action: &'static str,
        required: u32,
    },

    #[error("content upload failed: {0}")]
    Upload(#[from] AddressorError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Dispute(#[from] DisputeError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("config error: {0}")]
    Config(String),
}

impl RuntimeError {
    /// Stable error code for response payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientLevel { .. } => "insufficient_level",
            Self::Upload(_) => "upload_failed",
            Self::Identity(IdentityError::AlreadyRegistered(_)) => "already_registered",
            Self::Identity(IdentityError::NotRegistered(_)) => "not_found",
            Self::Content(ContentError::CommentIdInUse(_)) => "id_in_use",
            Self::Content(_) => "not_found",
            Self::Governance(GovernanceError::NotFound(_)) => "not_found",
            Self::Governance(GovernanceError::Closed(_)) => "closed",
            Self::Governance(GovernanceError::Finalized(_)) => "finalized",
            Self::Governance(GovernanceError::NoVotes(_)) => "no_votes",
            Self::Dispute(DisputeError::NotFound(_)) => "not_found",
            Self::Dispute(DisputeError::Closed(_)) => "closed",
            Self::Dispute(DisputeError::NotJuror { .. }) => "not_juror",
            Self::Dispute(DisputeError::NoCandidates) => "no_jurors",
            Self::Ledger(_) => "ledger_error",
            Self::Config(_) => "config_error",
        }
    }
}
