// Authentication filter for protected routes
//
// Route protection is declared per route group at router assembly; routes
// without a RouteRoles layer are public and never enter this filter.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{error::AuthError, models::Role};
use crate::AppState;

/// Identity resolved by the auth filter, attached to request extensions for
/// downstream handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The filter ran before the handler on every guarded route; a missing
        // identity means the route was never guarded
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)?;

    Ok(token.trim())
}

/// Static per-route declaration of which roles may invoke it
///
/// Wraps a route group as an axum middleware layer. Per request the filter
/// runs: bearer extraction, token validation, subject lookup, role-set check;
/// any failure terminates the pipeline before the handler.
#[derive(Debug, Clone, Copy)]
pub struct RouteRoles {
    allowed: &'static [Role],
}

impl RouteRoles {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    /// Routes only admins may invoke
    pub const fn admin() -> Self {
        Self::new(&[Role::Admin])
    }

    /// Routes any authenticated user may invoke
    pub const fn any_user() -> Self {
        Self::new(&[Role::User, Role::Admin])
    }

    /// Whether the given role is in the allowed set
    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    /// Middleware entry point enforcing this route's role requirement
    pub async fn enforce(
        self,
        state: AppState,
        mut request: Request<Body>,
        next: Next,
    ) -> Result<Response, AuthError> {
        let endpoint = request.uri().path().to_string();

        let token = bearer_token(request.headers()).map_err(|err| {
            warn!(
                "Rejected request to protected endpoint {}: {}",
                endpoint, err
            );
            err
        })?;

        let user_id = state.token_service.validate(token)?;

        // The subject may have been deleted since the token was issued;
        // reject rather than proceed with a dangling identity
        let user = state.auth_service.resolve_subject(user_id).await?;

        if !self.allows(user.role) {
            warn!(
                "Authorization failed: user_id={}, role={}, endpoint={}",
                user.id, user.role, endpoint
            );
            return Err(AuthError::InsufficientPermissions {
                required: self.allowed,
                actual: user.role,
            });
        }

        debug!(
            "Authorization successful: user_id={}, role={}, endpoint={}",
            user.id, user.role, endpoint
        );

        request.extensions_mut().insert(AuthenticatedUser {
            user_id: user.id,
            role: user.role,
        });

        Ok(next.run(request).await)
    }
}
