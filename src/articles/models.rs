// Article data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Represents an article in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Article {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Hello World")]
    pub title: String,
    pub content: String,
    /// User id of the author
    #[schema(example = 1)]
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a new article
///
/// The author is stamped from the authenticated identity, never taken from
/// the payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateArticle {
    #[validate(length(min = 1, max = 256))]
    #[schema(example = "Hello World")]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

/// Patch DTO for updating an existing article
///
/// Omitted fields keep their stored values; the merge is explicit per field.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateArticle {
    #[schema(example = 1)]
    pub id: i32,
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
}

/// Query parameters for the article listing
#[derive(Debug, Deserialize)]
pub struct ArticleListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    5
}

/// Response payload for the article listing: one page plus the total row count
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleListResponse {
    pub articles: Vec<Article>,
    #[schema(example = 42)]
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_article_partial_fields() {
        let json = r#"{"id": 3, "title": "New title"}"#;

        let patch: UpdateArticle = serde_json::from_str(json).unwrap();
        assert_eq!(patch.id, 3);
        assert_eq!(patch.title, Some("New title".to_string()));
        assert_eq!(patch.content, None);
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ArticleListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.size, 5);
    }

    #[test]
    fn test_create_article_requires_nonempty_title() {
        use validator::Validate;

        let payload = CreateArticle {
            title: String::new(),
            content: "body".to_string(),
        };
        assert!(payload.validate().is_err());
    }
}
