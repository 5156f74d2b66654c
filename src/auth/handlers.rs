// HTTP handlers for user registration, login and user queries

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse},
};
use crate::response::ApiResponse;
use crate::AppState;

/// Register a new user
/// POST /api/users/register
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    state
        .auth_service
        .register(&request.username, &request.password, &request.nickname)
        .await?;

    // No token on registration; login is a separate step
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::code_only(StatusCode::CREATED)),
    ))
}

/// Login a user, returning a token and the sanitized identity
/// POST /api/users/login
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AuthError> {
    let response = state
        .auth_service
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(ApiResponse::ok(response)))
}

/// List all users, sans password hashes (any authenticated user)
/// GET /api/users
pub async fn get_all_users_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AuthError> {
    let users = state.auth_service.list_users().await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// Fetch a single user by id
/// GET /api/users/:id
pub async fn get_user_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserResponse>>, AuthError> {
    let user = state.auth_service.get_user(id).await?;
    Ok(Json(ApiResponse::ok(user)))
}
