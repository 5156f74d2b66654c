// HTTP handlers for comment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::comments::models::CreateComment;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;

/// Handler for POST /api/comments (any authenticated user)
/// The referenced article must exist; the commenter is stamped from identity
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateComment>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    payload.validate()?;

    state
        .article_repo
        .find_by_id(payload.article_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Article".to_string(),
            id: payload.article_id.to_string(),
        })?;

    let comment = state
        .comment_repo
        .create(&payload.content, payload.article_id, user.user_id)
        .await?;

    tracing::info!(
        "Created comment id={} on article id={} by user id={}",
        comment.id,
        comment.article_id,
        user.user_id
    );
    Ok(Json(ApiResponse::code_only(StatusCode::OK)))
}

/// Handler for DELETE /api/comments/:id (admin only)
/// Idempotent: deleting a missing comment still answers 200
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.comment_repo.delete(id).await?;

    tracing::debug!("Deleted comment id={}", id);
    Ok(Json(ApiResponse::code_only(StatusCode::OK)))
}
