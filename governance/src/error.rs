use agora_types::ProposalId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    NotFound(ProposalId),

    #[error("proposal {0} is closed")]
    Closed(ProposalId),

    #[error("proposal {0} is already finalized")]
    Finalized(ProposalId),

    #[error("proposal {0} has no votes to tally")]
    NoVotes(ProposalId),
}
