use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Message returned whenever a required post field is missing or blank.
pub const MISSING_FIELDS_MESSAGE: &str = "Please provide title, content, and category";

/// Post entity - a blog article.
///
/// Serializes with camelCase keys (`createdAt`, `updatedAt`). Only the public
/// `id` is ever exposed; stores keep their own bookkeeping out of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated post fields as received from a client.
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// The mutable fields of a post, after validation.
///
/// `title` and `category` are trimmed, and `title`, `content`, `category`
/// are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl PostDraft {
    /// Validate raw input into a draft.
    pub fn validate(input: PostInput) -> Result<Self, DomainError> {
        let title = input.title.map(|t| t.trim().to_string());
        let category = input.category.map(|c| c.trim().to_string());

        match (title, input.content, category) {
            (Some(title), Some(content), Some(category))
                if !title.is_empty() && !content.is_empty() && !category.is_empty() =>
            {
                Ok(Self {
                    title,
                    content,
                    category,
                    tags: input.tags.unwrap_or_default(),
                })
            }
            _ => Err(DomainError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

/// Listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    term: Option<String>,
}

impl PostFilter {
    /// An empty term means "no filter".
    pub fn new(term: Option<String>) -> Self {
        Self {
            term: term.filter(|t| !t.is_empty()),
        }
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// Case-insensitive literal substring match on title, content or category.
    pub fn matches(&self, post: &Post) -> bool {
        let Some(term) = &self.term else {
            return true;
        };
        let needle = term.to_lowercase();
        [&post.title, &post.content, &post.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, content: &str, category: &str) -> PostInput {
        PostInput {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            category: Some(category.to_string()),
            tags: None,
        }
    }

    fn post(title: &str, content: &str, category: &str) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            tags: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_validate_trims_title_and_category() {
        let draft = PostDraft::validate(input("  Test Post ", " body ", " Testing\n")).unwrap();
        assert_eq!(draft.title, "Test Post");
        assert_eq!(draft.category, "Testing");
        assert_eq!(draft.content, " body ");
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn test_validate_keeps_tags_in_order() {
        let mut raw = input("t", "c", "k");
        raw.tags = Some(vec!["b".into(), "a".into()]);
        let draft = PostDraft::validate(raw).unwrap();
        assert_eq!(draft.tags, vec!["b", "a"]);
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let raw = PostInput {
            title: Some("Missing Fields".into()),
            ..Default::default()
        };
        let err = PostDraft::validate(raw).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m == MISSING_FIELDS_MESSAGE));
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(PostDraft::validate(input("   ", "c", "k")).is_err());
        assert!(PostDraft::validate(input("t", "", "k")).is_err());
        assert!(PostDraft::validate(input("t", "c", " ")).is_err());
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let filter = PostFilter::new(Some("programming".into()));
        assert!(filter.matches(&post("Programming Blog", "x", "y")));
        assert!(filter.matches(&post("x", "all about PROGRAMMING here", "y")));
        assert!(filter.matches(&post("x", "y", "Programming")));
        assert!(!filter.matches(&post("Test Post", "This is a test post", "Testing")));
    }

    #[test]
    fn test_filter_treats_term_literally() {
        let filter = PostFilter::new(Some("c++".into()));
        assert!(filter.matches(&post("Learning C++", "x", "y")));
        assert!(!filter.matches(&post("Learning C", "x", "y")));
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let filter = PostFilter::new(Some(String::new()));
        assert_eq!(filter.term(), None);
        assert!(filter.matches(&post("a", "b", "c")));
    }

    #[test]
    fn test_serialized_post_exposes_only_public_fields() {
        let json = serde_json::to_value(post("Test Post", "c", "k")).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("createdAt"));
        assert!(obj.contains_key("updatedAt"));
        assert!(!obj.contains_key("_id"));
        assert!(!obj.contains_key("__v"));
        assert_eq!(obj.len(), 7);
    }
}
