//! Post and comment entities.

use agora_types::{CommentId, ContentRef, PostId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// A post: the root content unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: UserId,
    pub content: ContentRef,
    pub tags: Vec<String>,
    /// Ids of attached comments, in creation order.
    pub comments: Vec<CommentId>,
    pub created_at: Timestamp,
    /// Tombstone. Set under the entity lock at deletion so an in-flight
    /// comment creation holding a stale handle cannot attach to a dead post.
    #[serde(skip)]
    pub(crate) deleted: bool,
}

/// A comment, always attached to a live post.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: UserId,
    pub content: ContentRef,
    pub tags: Vec<String>,
    /// The owning post. Refers to a live post for as long as the comment
    /// exists — cascade delete enforces this.
    pub post_id: PostId,
    pub created_at: Timestamp,
    #[serde(skip)]
    pub(crate) deleted: bool,
}
