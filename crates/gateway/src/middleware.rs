//! Middleware for authentication and other cross-cutting concerns

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use estate_auth::Role;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ErrorCode, ErrorReport, GatewayError};
use crate::policy::required_role;
use crate::state::GatewayState;

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Cookie holding the session token
pub const TOKEN_COOKIE: &str = "token";

/// Caller identity established by [`auth_middleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: Role,
}

/// Correlation id of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Access guard: validates the `token` cookie and enforces the route policy.
///
/// The token's role is trusted until expiry; storage is never consulted.
pub async fn auth_middleware(
    State(state): State<Arc<GatewayState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or_else(GatewayError::not_authorized)?;

    let claims = state.tokens.verify(token).map_err(|error| {
        debug!(%error, "token rejected");
        GatewayError::not_authorized()
    })?;

    let role = claims
        .role()
        .map_err(|error| GatewayError::internal(ErrorCode::ExtractRoleFromToken, error))?;
    let user_id = claims
        .user_id()
        .map_err(|error| GatewayError::internal(ErrorCode::ExtractRoleFromToken, error))?;

    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str())
        .unwrap_or_else(|| request.uri().path());
    if let Some(required) = required_role(path) {
        if role != required {
            warn!(%user_id, %role, %required, path, "access denied");
            return Err(GatewayError::Forbidden);
        }
    }

    request.extensions_mut().insert(AuthContext { user_id, role });
    Ok(next.run(request).await)
}

/// Assign a request id, echo it back and stamp it into error bodies.
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Some(report) = response.extensions_mut().remove::<ErrorReport>() {
        response = (response.status(), Json(report.into_body(&request_id))).into_response();
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        status = %response.status(),
        duration_ms = duration.as_millis() as u64,
        "Request completed"
    );

    response
}
