use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthConfig, UserInfo};
use crate::error::ApiError;

/// Identity attached to a request admitted through the access gate.
///
/// `user` mirrors the token's `UserInfo` claim exactly: a token issued
/// without one admits the request with `user: None`, and any endpoint that
/// needs identity fields has to handle that case itself.
#[derive(Clone, Debug)]
pub struct RequestIdentity {
    pub user: Option<UserInfo>,
}

/// Why the gate turned a request away.
///
/// The two kinds stay distinct all the way to the boundary: a request with
/// no usable bearer token maps to 401, a token that failed verification
/// maps to 403.
#[derive(Debug)]
pub enum AuthRejection {
    MissingCredential(String),
    InvalidCredential(String),
}

/// Access gate middleware: validates the bearer token and attaches
/// `RequestIdentity` to the request, or rejects it.
pub async fn require_auth(
    State(auth): State<AuthConfig>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Malformed requests are rejected before any verification attempt
    let token = extract_bearer_token(&headers)?;

    let claims = auth.verify(token).map_err(|e| {
        AuthRejection::InvalidCredential(format!("Invalid or expired token: {}", e))
    })?;

    request.extensions_mut().insert(RequestIdentity {
        user: claims.user_info,
    });

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// Header-name lookup is case-insensitive; the `"Bearer "` prefix match is
/// case-sensitive. An empty token after the prefix is passed through to the
/// verifier, which rejects it as an invalid credential.
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthRejection> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AuthRejection::MissingCredential("Missing Authorization header".to_string()))?;

    let auth_str = auth_header.to_str().map_err(|_| {
        AuthRejection::MissingCredential("Invalid Authorization header format".to_string())
    })?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        AuthRejection::MissingCredential(
            "Authorization header must use Bearer token format".to_string(),
        )
    })
}
