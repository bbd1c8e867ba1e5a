use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("user {0} is already registered")]
    AlreadyRegistered(String),

    #[error("user {0} is not registered")]
    NotRegistered(String),
}
