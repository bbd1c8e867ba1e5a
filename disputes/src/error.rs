use agora_types::DisputeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisputeError {
    #[error("dispute {0} not found")]
    NotFound(DisputeId),

    #[error("dispute {0} is closed")]
    Closed(DisputeId),

    #[error("{juror} is not a juror on dispute {dispute}")]
    NotJuror { dispute: DisputeId, juror: String },

    #[error("no juror candidates available")]
    NoCandidates,
}
