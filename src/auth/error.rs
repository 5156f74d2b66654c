// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::fmt;
use tracing::{error, warn};

use crate::auth::models::Role;
use crate::response::ApiResponse;

/// Authentication and authorization error types
#[derive(Debug)]
pub enum AuthError {
    // Authentication errors
    ValidationError(String),
    /// Login failure; unknown username and wrong password are deliberately
    /// indistinguishable
    InvalidCredentials,
    /// Signature does not match the process signing key
    InvalidToken,
    /// Token is past its expiry
    ExpiredToken,
    /// Token structure cannot be parsed
    MalformedToken,
    /// Authorization header absent or not a bearer scheme
    MissingToken,
    /// Token subject no longer exists in the user table
    UnknownSubject,
    UsernameTaken,
    UserNotFound,
    DatabaseError(String),
    PasswordHashError,
    TokenGenerationError(String),

    // Authorization errors
    /// Valid identity whose role is not in the route's allowed set
    InsufficientPermissions {
        required: &'static [Role],
        actual: Role,
    },
}

fn role_list(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthError::InvalidToken => write!(f, "Invalid token"),
            AuthError::ExpiredToken => write!(f, "Token has expired"),
            AuthError::MalformedToken => write!(f, "Malformed token"),
            AuthError::MissingToken => write!(f, "Missing authentication token"),
            AuthError::UnknownSubject => write!(f, "Unknown token subject"),
            AuthError::UsernameTaken => write!(f, "Username already exists"),
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AuthError::PasswordHashError => write!(f, "Password hashing error"),
            AuthError::TokenGenerationError(msg) => write!(f, "Token generation error: {}", msg),
            AuthError::InsufficientPermissions { required, actual } => {
                write!(
                    f,
                    "Insufficient permissions: allowed roles [{}], but user has role '{}'",
                    role_list(required),
                    actual
                )
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            // The login contract answers 400 for both unknown-user and
            // wrong-password
            AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::MalformedToken
            | AuthError::MissingToken
            | AuthError::UnknownSubject => StatusCode::UNAUTHORIZED,
            AuthError::UsernameTaken => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::InsufficientPermissions { .. } => StatusCode::FORBIDDEN,
        }
    }

    /// Client-facing message for this error (no sensitive data)
    pub fn client_message(&self) -> String {
        match self {
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => "Internal server error".to_string(),
            // Token subject resolution failures look identical to any other
            // rejected token
            AuthError::UnknownSubject => "Invalid token".to_string(),
            AuthError::InsufficientPermissions { required, .. } => {
                format!(
                    "Insufficient permissions: allowed roles [{}]",
                    role_list(required)
                )
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::InvalidToken => warn!("Invalid token attempt"),
            AuthError::ExpiredToken => warn!("Expired token attempt"),
            AuthError::MalformedToken => warn!("Malformed token attempt"),
            AuthError::MissingToken => warn!("Missing token in request"),
            AuthError::UnknownSubject => {
                warn!("Token subject no longer exists")
            }
            AuthError::InsufficientPermissions { required, actual } => warn!(
                "Authorization failed: allowed roles [{}], user has role '{}'",
                role_list(required),
                actual
            ),
            AuthError::DatabaseError(msg) => error!("Database error in auth: {}", msg),
            AuthError::PasswordHashError => error!("Password hashing error"),
            AuthError::TokenGenerationError(msg) => error!("Token generation error: {}", msg),
            _ => {}
        }

        let status = self.status_code();
        let body = Json(ApiResponse::error(status, self.client_message()));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::DatabaseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures_are_unauthorized() {
        for err in [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::ExpiredToken,
            AuthError::MalformedToken,
            AuthError::UnknownSubject,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_invalid_credentials_is_bad_request() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_insufficient_permissions_is_forbidden() {
        let err = AuthError::InsufficientPermissions {
            required: &[Role::Admin],
            actual: Role::User,
        };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert!(err.client_message().contains("admin"));
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let err = AuthError::DatabaseError("connection reset by peer".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_unknown_subject_indistinguishable_from_invalid_token() {
        assert_eq!(
            AuthError::UnknownSubject.client_message(),
            AuthError::InvalidToken.client_message()
        );
    }
}
