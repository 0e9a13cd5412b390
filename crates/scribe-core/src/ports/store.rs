use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostDraft, PostFilter};
use crate::error::RepoError;

/// Post store - abstraction over persistence backends (PostgreSQL, in-memory).
///
/// The store owns identity and timestamps: it assigns `id` and `created_at`
/// on insert and refreshes `updated_at` on every mutation.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a new post.
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// All posts accepted by `filter`, newest first.
    async fn find(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;

    /// Replace the mutable fields of a post.
    ///
    /// Returns [`RepoError::NotFound`] if no post has this id.
    async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Post, RepoError>;

    /// Delete a post by its id.
    ///
    /// Returns [`RepoError::NotFound`] if no post has this id.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
