//! Post repository - validation and id handling in front of a [`PostStore`].

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostDraft, PostFilter, PostInput};
use crate::error::{DomainError, RepoError};
use crate::ports::PostStore;

/// Typed entry point used by the HTTP layer.
///
/// Ids arrive as raw strings. A string that is not a valid id is reported as
/// [`DomainError::NotFound`], exactly like a well-formed id with no post.
#[derive(Clone)]
pub struct PostRepository {
    store: Arc<dyn PostStore>,
}

impl PostRepository {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: PostInput) -> Result<Post, DomainError> {
        let draft = PostDraft::validate(input)?;
        let post = self.store.insert(draft).await.map_err(DomainError::Store)?;
        tracing::debug!(post_id = %post.id, "Post created");
        Ok(post)
    }

    pub async fn list(&self, term: Option<String>) -> Result<Vec<Post>, DomainError> {
        let filter = PostFilter::new(term);
        self.store.find(&filter).await.map_err(DomainError::Store)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Post, DomainError> {
        let uuid = parse_id(id)?;
        self.store
            .find_by_id(uuid)
            .await
            .map_err(DomainError::Store)?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Validation runs before the lookup, so a bad body on a missing post is
    /// still a validation error.
    pub async fn update(&self, id: &str, input: PostInput) -> Result<Post, DomainError> {
        let draft = PostDraft::validate(input)?;
        let uuid = parse_id(id)?;
        self.store
            .update(uuid, draft)
            .await
            .map_err(|e| not_found_or_store(e, id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let uuid = parse_id(id)?;
        self.store
            .delete(uuid)
            .await
            .map_err(|e| not_found_or_store(e, id))?;
        tracing::debug!(post_id = %uuid, "Post deleted");
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(id).map_err(|_| DomainError::post_not_found(id))
}

fn not_found_or_store(err: RepoError, id: &str) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => DomainError::Store(other),
    }
}
