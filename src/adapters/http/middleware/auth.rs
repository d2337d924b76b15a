//! Authentication middleware and extractor for axum.
//!
//! The middleware resolves a Bearer token through the `IdentityResolver`
//! port and stores the resulting [`AuthenticatedActor`] in the request
//! extensions. Handlers pull it back out with [`RequireAuth`] and pass the
//! actor id into commands explicitly.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedActor into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedActor};
use crate::ports::IdentityResolver;

/// Auth middleware state - wraps the identity resolver.
pub type AuthState = Arc<dyn IdentityResolver>;

/// Validates the Bearer token, if one is present.
///
/// A request without an `Authorization` header passes through untouched so
/// that `RequireAuth` can reject it with 401. A present but invalid token
/// is rejected here.
pub async fn auth_middleware(
    State(resolver): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return next.run(request).await;
    };

    match resolver.resolve(token).await {
        Ok(actor) => {
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        Err(e) => auth_error_response(&e),
    }
}

fn auth_error_response(error: &AuthError) -> Response {
    let (status, message) = match error {
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!(error = %msg, "identity resolution unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
            )
        }
    };

    (
        status,
        Json(serde_json::json!({
            "code": "AUTH_ERROR",
            "message": message
        })),
    )
        .into_response()
}

/// Extractor that requires an authenticated actor.
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth(pub AuthenticatedActor);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedActor>()
            .copied()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "code": "UNAUTHENTICATED",
                    "message": "Authentication required"
                })),
            )
                .into_response(),
        }
    }
}
