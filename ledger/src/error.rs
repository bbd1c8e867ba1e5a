use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger account {0} does not exist")]
    UnknownAccount(String),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}
