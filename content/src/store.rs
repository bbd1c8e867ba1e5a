//! The concurrent content store.
//!
//! Posts and comments are independently lockable units: each collection is a
//! map of `Arc<Mutex<entity>>` handles behind a `RwLock`, so operations on
//! different entities never block each other and the map locks are only held
//! for lookups and insert/remove.
//!
//! Lock order (coarse to fine): posts map, post entity, comments map,
//! comment entity. Every path acquires locks in this order, never the
//! reverse.

use crate::error::ContentError;
use crate::model::{Comment, Post};
use agora_types::{CommentId, ContentRef, PostId, Timestamp, UserId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::debug;

type EntityMap<K, V> = RwLock<HashMap<K, Arc<Mutex<V>>>>;

fn lock<T>(entity: &Mutex<T>) -> MutexGuard<'_, T> {
    entity.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Concurrent store of posts and comments with cascade rules.
#[derive(Debug, Default)]
pub struct ContentStore {
    posts: EntityMap<PostId, Post>,
    comments: EntityMap<CommentId, Comment>,
    /// Next auto-generated ids. Advanced with `fetch_max` when the caller
    /// supplies a comment id, so the next generated id is always strictly
    /// greater than the highest id ever seen.
    next_post_id: AtomicU64,
    next_comment_id: AtomicU64,
}

impl ContentStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
            comments: RwLock::new(HashMap::new()),
            next_post_id: AtomicU64::new(1),
            next_comment_id: AtomicU64::new(1),
        }
    }

    fn post_handle(&self, id: PostId) -> Option<Arc<Mutex<Post>>> {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn comment_handle(&self, id: CommentId) -> Option<Arc<Mutex<Comment>>> {
        self.comments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    // ── Posts ────────────────────────────────────────────────────────────

    /// Create a post. The content has already been uploaded; the store only
    /// records its reference.
    pub fn create_post(&self, author: UserId, content: ContentRef, tags: Vec<String>) -> PostId {
        let id = PostId::new(self.next_post_id.fetch_add(1, Ordering::SeqCst));
        let post = Post {
            id,
            author,
            content,
            tags,
            comments: Vec::new(),
            created_at: Timestamp::now(),
            deleted: false,
        };
        self.posts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(post)));
        debug!(post = %id, "created post");
        id
    }

    /// Partial update: `None` leaves the corresponding field untouched.
    pub fn edit_post(
        &self,
        id: PostId,
        content: Option<ContentRef>,
        tags: Option<Vec<String>>,
    ) -> Result<(), ContentError> {
        let handle = self.post_handle(id).ok_or(ContentError::PostNotFound(id))?;
        let mut post = lock(&handle);
        if post.deleted {
            return Err(ContentError::PostNotFound(id));
        }
        if let Some(content) = content {
            post.content = content;
        }
        if let Some(tags) = tags {
            post.tags = tags;
        }
        Ok(())
    }

    /// Delete a post, cascading to every comment on its list.
    ///
    /// Returns the ids of the cascaded comments.
    pub fn delete_post(&self, id: PostId) -> Result<Vec<CommentId>, ContentError> {
        let handle = self
            .posts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .ok_or(ContentError::PostNotFound(id))?;

        // Tombstone under the entity lock: a comment creation that grabbed a
        // handle before the removal either finished (its id is on the list
        // and cascades below) or will observe the tombstone and fail.
        let attached = {
            let mut post = lock(&handle);
            post.deleted = true;
            std::mem::take(&mut post.comments)
        };

        let mut comments = self.comments.write().unwrap_or_else(PoisonError::into_inner);
        for cid in &attached {
            if let Some(comment) = comments.remove(cid) {
                lock(&comment).deleted = true;
            }
        }
        debug!(post = %id, cascaded = attached.len(), "deleted post");
        Ok(attached)
    }

    /// Snapshot of a post, if it exists.
    pub fn post(&self, id: PostId) -> Option<Post> {
        let handle = self.post_handle(id)?;
        let post = lock(&handle);
        (!post.deleted).then(|| post.clone())
    }

    pub fn post_exists(&self, id: PostId) -> bool {
        self.post(id).is_some()
    }

    // ── Comments ─────────────────────────────────────────────────────────

    /// Create a comment attached to `post_id`.
    ///
    /// A caller-supplied id must be unused; either way the auto-id counter
    /// is advanced past it so counter monotonicity is preserved.
    pub fn create_comment(
        &self,
        author: UserId,
        post_id: PostId,
        content: ContentRef,
        tags: Vec<String>,
        supplied_id: Option<CommentId>,
    ) -> Result<CommentId, ContentError> {
        let handle = self
            .post_handle(post_id)
            .ok_or(ContentError::PostNotFound(post_id))?;

        let id = match supplied_id {
            Some(cid) => {
                self.next_comment_id
                    .fetch_max(cid.as_u64() + 1, Ordering::SeqCst);
                cid
            }
            None => CommentId::new(self.next_comment_id.fetch_add(1, Ordering::SeqCst)),
        };

        // Hold the post lock across insert + link so a concurrent cascade
        // delete either sees this comment on the list or we see the
        // tombstone.
        let mut post = lock(&handle);
        if post.deleted {
            return Err(ContentError::PostNotFound(post_id));
        }
        let comment = Comment {
            id,
            author,
            content,
            tags,
            post_id,
            created_at: Timestamp::now(),
            deleted: false,
        };
        {
            let mut comments = self.comments.write().unwrap_or_else(PoisonError::into_inner);
            if comments.contains_key(&id) {
                return Err(ContentError::CommentIdInUse(id));
            }
            comments.insert(id, Arc::new(Mutex::new(comment)));
        }
        post.comments.push(id);
        debug!(comment = %id, post = %post_id, "created comment");
        Ok(id)
    }

    /// Partial update: `None` leaves the corresponding field untouched.
    pub fn edit_comment(
        &self,
        id: CommentId,
        content: Option<ContentRef>,
        tags: Option<Vec<String>>,
    ) -> Result<(), ContentError> {
        let handle = self
            .comment_handle(id)
            .ok_or(ContentError::CommentNotFound(id))?;
        let mut comment = lock(&handle);
        if comment.deleted {
            return Err(ContentError::CommentNotFound(id));
        }
        if let Some(content) = content {
            comment.content = content;
        }
        if let Some(tags) = tags {
            comment.tags = tags;
        }
        Ok(())
    }

    /// Delete a single comment, unlinking it from its owning post's list
    /// if still linked.
    pub fn delete_comment(&self, id: CommentId) -> Result<(), ContentError> {
        let handle = self
            .comments
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .ok_or(ContentError::CommentNotFound(id))?;

        let post_id = {
            let mut comment = lock(&handle);
            comment.deleted = true;
            comment.post_id
        };

        if let Some(post) = self.post_handle(post_id) {
            lock(&post).comments.retain(|cid| *cid != id);
        }
        debug!(comment = %id, "deleted comment");
        Ok(())
    }

    /// Snapshot of a comment, if it exists.
    pub fn comment(&self, id: CommentId) -> Option<Comment> {
        let handle = self.comment_handle(id)?;
        let comment = lock(&handle);
        (!comment.deleted).then(|| comment.clone())
    }

    pub fn comment_exists(&self, id: CommentId) -> bool {
        self.comment(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::ContentRef;

    fn uid(s: &str) -> UserId {
        UserId::new(s)
    }

    fn cref(s: &str) -> ContentRef {
        ContentRef::new(s)
    }

    fn store_with_post() -> (ContentStore, PostId) {
        let store = ContentStore::new();
        let id = store.create_post(uid("alice"), cref("p1"), vec!["tag".into()]);
        (store, id)
    }

    #[test]
    fn post_ids_are_monotonic() {
        let store = ContentStore::new();
        let a = store.create_post(uid("a"), cref("x"), vec![]);
        let b = store.create_post(uid("a"), cref("y"), vec![]);
        assert!(b.as_u64() > a.as_u64());
    }

    #[test]
    fn edit_post_is_partial() {
        let (store, id) = store_with_post();
        store.edit_post(id, Some(cref("p2")), None).unwrap();
        let post = store.post(id).unwrap();
        assert_eq!(post.content, cref("p2"));
        assert_eq!(post.tags, vec!["tag".to_string()]);

        store.edit_post(id, None, Some(vec![])).unwrap();
        let post = store.post(id).unwrap();
        assert_eq!(post.content, cref("p2"));
        assert!(post.tags.is_empty());
    }

    #[test]
    fn edit_missing_post_fails() {
        let store = ContentStore::new();
        assert!(matches!(
            store.edit_post(PostId::new(9), None, None),
            Err(ContentError::PostNotFound(_))
        ));
    }

    #[test]
    fn comment_requires_live_post() {
        let store = ContentStore::new();
        let err = store
            .create_comment(uid("bob"), PostId::new(1), cref("c"), vec![], None)
            .unwrap_err();
        assert!(matches!(err, ContentError::PostNotFound(_)));
    }

    #[test]
    fn comment_links_to_post() {
        let (store, post_id) = store_with_post();
        let c1 = store
            .create_comment(uid("bob"), post_id, cref("c1"), vec![], None)
            .unwrap();
        let c2 = store
            .create_comment(uid("carol"), post_id, cref("c2"), vec![], None)
            .unwrap();
        assert_eq!(store.post(post_id).unwrap().comments, vec![c1, c2]);
        assert_eq!(store.comment(c1).unwrap().post_id, post_id);
    }

    #[test]
    fn delete_post_cascades_to_comments() {
        let (store, post_id) = store_with_post();
        let c1 = store
            .create_comment(uid("bob"), post_id, cref("c1"), vec![], None)
            .unwrap();
        let other = store.create_post(uid("dan"), cref("p2"), vec![]);
        let kept = store
            .create_comment(uid("bob"), other, cref("c3"), vec![], None)
            .unwrap();

        let cascaded = store.delete_post(post_id).unwrap();
        assert_eq!(cascaded, vec![c1]);
        assert!(store.post(post_id).is_none());
        assert!(store.comment(c1).is_none());
        // unrelated entities untouched
        assert!(store.post_exists(other));
        assert!(store.comment_exists(kept));
    }

    #[test]
    fn delete_comment_unlinks_from_post() {
        let (store, post_id) = store_with_post();
        let c1 = store
            .create_comment(uid("bob"), post_id, cref("c1"), vec![], None)
            .unwrap();
        let c2 = store
            .create_comment(uid("bob"), post_id, cref("c2"), vec![], None)
            .unwrap();

        store.delete_comment(c1).unwrap();
        assert!(store.comment(c1).is_none());
        assert_eq!(store.post(post_id).unwrap().comments, vec![c2]);
    }

    #[test]
    fn supplied_comment_id_keeps_counter_monotonic() {
        let (store, post_id) = store_with_post();
        let supplied = store
            .create_comment(
                uid("bob"),
                post_id,
                cref("c"),
                vec![],
                Some(CommentId::new(100)),
            )
            .unwrap();
        assert_eq!(supplied, CommentId::new(100));

        let next = store
            .create_comment(uid("bob"), post_id, cref("c"), vec![], None)
            .unwrap();
        assert_eq!(next, CommentId::new(101));
    }

    #[test]
    fn supplied_comment_id_must_be_unused() {
        let (store, post_id) = store_with_post();
        let c1 = store
            .create_comment(uid("bob"), post_id, cref("c"), vec![], None)
            .unwrap();
        let err = store
            .create_comment(uid("bob"), post_id, cref("c"), vec![], Some(c1))
            .unwrap_err();
        assert!(matches!(err, ContentError::CommentIdInUse(_)));
    }

    #[test]
    fn comment_ids_never_reused_after_delete() {
        let (store, post_id) = store_with_post();
        let c1 = store
            .create_comment(uid("bob"), post_id, cref("c"), vec![], None)
            .unwrap();
        store.delete_comment(c1).unwrap();
        let c2 = store
            .create_comment(uid("bob"), post_id, cref("c"), vec![], None)
            .unwrap();
        assert!(c2.as_u64() > c1.as_u64());
    }
}
