//! Registration, login and dummy login endpoints

use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::extract::{ApiJson, ApiQuery};
use crate::error::{ErrorCode, GatewayError, GatewayResult};
use crate::middleware::TOKEN_COOKIE;
use crate::state::GatewayState;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DummyLoginQuery {
    /// `client` or `moderator`
    pub user_type: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub user_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub id: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// The cookie outlives the token it carries; the guard still rejects the
/// token once it expires.
fn session_cookie(token: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

#[utoipa::path(
    get,
    path = "/dummyLogin",
    tag = "Auth",
    params(DummyLoginQuery),
    responses(
        (status = 200, description = "Token issued for a throwaway identity", body = TokenResponse),
        (status = 400, description = "Unknown user type", body = crate::error::ErrorResponse)
    )
)]
pub async fn dummy_login(
    State(state): State<Arc<GatewayState>>,
    jar: CookieJar,
    ApiQuery(query): ApiQuery<DummyLoginQuery>,
) -> GatewayResult<(CookieJar, Json<TokenResponse>)> {
    let token = state
        .bounded(async {
            state
                .user_service
                .dummy_login(&query.user_type)
                .await
                .map_err(|error| GatewayError::from_user(ErrorCode::DummyLogin, error))
        })
        .await?;

    let jar = jar.add(session_cookie(token.clone(), state.cookie_max_age));
    Ok((jar, Json(TokenResponse { token })))
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid email, password or user type", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> GatewayResult<Json<RegisterResponse>> {
    let user_id = state
        .bounded(async {
            state
                .user_service
                .register(&payload.email, &payload.password, &payload.user_type)
                .await
                .map_err(|error| GatewayError::from_user(ErrorCode::RegisterUser, error))
        })
        .await?;

    Ok(Json(RegisterResponse { user_id }))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued and stored in the `token` cookie", body = TokenResponse),
        (status = 400, description = "Malformed user id", body = crate::error::ErrorResponse),
        (status = 401, description = "Wrong password", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown user", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<GatewayState>>,
    jar: CookieJar,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> GatewayResult<(CookieJar, Json<TokenResponse>)> {
    let user_id = Uuid::parse_str(&payload.id)
        .map_err(|_| GatewayError::bad_request(ErrorCode::LoginUser, "invalid user id"))?;

    let token = state
        .bounded(async {
            state
                .user_service
                .login(user_id, &payload.password)
                .await
                .map_err(|error| GatewayError::from_user(ErrorCode::LoginUser, error))
        })
        .await?;

    let jar = jar.add(session_cookie(token.clone(), state.cookie_max_age));
    Ok((jar, Json(TokenResponse { token })))
}
