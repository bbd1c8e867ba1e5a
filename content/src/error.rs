use agora_types::{CommentId, PostId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("post {0} not found")]
    PostNotFound(PostId),

    #[error("comment {0} not found")]
    CommentNotFound(CommentId),

    #[error("comment id {0} is already in use")]
    CommentIdInUse(CommentId),
}
