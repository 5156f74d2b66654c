// Comment data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Represents a comment on an article
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Comment {
    #[schema(example = 1)]
    pub id: i32,
    pub content: String,
    #[schema(example = 1)]
    pub article_id: i32,
    /// User id of the commenter
    #[schema(example = 1)]
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a comment
///
/// The commenter is stamped from the authenticated identity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    #[validate(length(min = 1))]
    pub content: String,
    pub article_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_comment_deserialization() {
        let json = r#"{"content": "nice post", "article_id": 7}"#;
        let payload: CreateComment = serde_json::from_str(json).unwrap();
        assert_eq!(payload.content, "nice post");
        assert_eq!(payload.article_id, 7);
    }

    #[test]
    fn test_empty_comment_rejected() {
        let payload = CreateComment {
            content: String::new(),
            article_id: 7,
        };
        assert!(payload.validate().is_err());
    }
}
