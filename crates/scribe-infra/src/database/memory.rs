//! In-memory post store - used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Post, PostDraft, PostFilter};
use scribe_core::error::RepoError;
use scribe_core::ports::PostStore;

struct StoredPost {
    /// Insertion order, breaks `created_at` ties.
    seq: u64,
    post: Post,
}

#[derive(Default)]
struct Inner {
    posts: HashMap<Uuid, StoredPost>,
    next_seq: u64,
}

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    inner: RwLock<Inner>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// A timestamp strictly after `previous`, so `updated_at` always advances.
    fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = Utc::now();
        if now > previous {
            now
        } else {
            previous + TimeDelta::microseconds(1)
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            category: draft.category,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        };

        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.posts.insert(
            post.id,
            StoredPost {
                seq,
                post: post.clone(),
            },
        );

        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.get(&id).map(|stored| stored.post.clone()))
    }

    async fn find(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let inner = self.inner.read().await;
        let mut matched: Vec<&StoredPost> = inner
            .posts
            .values()
            .filter(|stored| filter.matches(&stored.post))
            .collect();

        matched.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(matched.into_iter().map(|stored| stored.post.clone()).collect())
    }

    async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Post, RepoError> {
        let mut inner = self.inner.write().await;
        let stored = inner.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        let post = &mut stored.post;
        post.title = draft.title;
        post.content = draft.content;
        post.category = draft.category;
        post.tags = draft.tags;
        post.updated_at = Self::next_timestamp(post.updated_at);

        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        inner
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use scribe_core::domain::PostInput;
    use scribe_core::{DomainError, PostRepository};

    fn repo() -> PostRepository {
        PostRepository::new(Arc::new(InMemoryPostStore::new()))
    }

    fn input(title: &str, content: &str, category: &str, tags: &[&str]) -> PostInput {
        PostInput {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            category: Some(category.to_string()),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        }
    }

    fn sample() -> PostInput {
        input("Test Post", "This is a test post", "Testing", &["test", "api"])
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = repo();
        let created = repo.create(sample()).await.unwrap();
        let fetched = repo.get_by_id(&created.id.to_string()).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Test Post");
        assert_eq!(fetched.tags, vec!["test", "api"]);
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[tokio::test]
    async fn test_create_defaults_tags() {
        let repo = repo();
        let mut raw = sample();
        raw.tags = None;
        let created = repo.create(raw).await.unwrap();
        assert!(created.tags.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields() {
        let repo = repo();
        let raw = PostInput {
            title: Some("Missing Fields".into()),
            ..Default::default()
        };
        assert!(matches!(
            repo.create(raw).await,
            Err(DomainError::Validation(_))
        ));
        assert!(repo.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = repo();
        let first = repo.create(sample()).await.unwrap();
        let second = repo
            .create(input("Another Test Post", "c", "Testing", &[]))
            .await
            .unwrap();

        let posts = repo.list(None).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, second.id);
        assert_eq!(posts[1].id, first.id);
    }

    #[tokio::test]
    async fn test_list_filters_by_term() {
        let repo = repo();
        repo.create(sample()).await.unwrap();
        repo.create(input(
            "Programming Blog",
            "Content about programming",
            "Development",
            &["programming", "code"],
        ))
        .await
        .unwrap();

        let posts = repo.list(Some("programming".into())).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Programming Blog");

        let by_category = repo.list(Some("TESTING".into())).await.unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].title, "Test Post");

        assert!(repo.list(Some("nothing".into())).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = repo();
        let created = repo.create(sample()).await.unwrap();
        let id = created.id.to_string();

        let updated = repo
            .update(&id, input("Updated Title", "New body", "Other", &[]))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Updated Title");
        assert_eq!(updated.content, "New body");
        assert_eq!(updated.category, "Other");
        assert!(updated.tags.is_empty());
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        assert_eq!(repo.get_by_id(&id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let repo = repo();
        let id = Uuid::new_v4().to_string();

        assert!(matches!(
            repo.get_by_id(&id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            repo.update(&id, sample()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(&id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let repo = repo();
        let created = repo.create(sample()).await.unwrap();
        let id = created.id.to_string();

        repo.delete(&id).await.unwrap();

        assert!(matches!(
            repo.get_by_id(&id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(repo.list(None).await.unwrap().is_empty());
    }

    #[test]
    fn test_next_timestamp_always_advances() {
        let future = Utc::now() + TimeDelta::hours(1);
        assert!(InMemoryPostStore::next_timestamp(future) > future);
    }
}
