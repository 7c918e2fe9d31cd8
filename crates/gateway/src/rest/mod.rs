//! REST API endpoints for the gateway

pub mod auth;
pub mod extract;
pub mod flat;
pub mod health;
pub mod house;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::error::{ErrorCode, GatewayError};
use crate::middleware::auth_middleware;
use crate::policy::{FLAT_CREATE, FLAT_UPDATE, HOUSE_CREATE, HOUSE_FLATS, HOUSE_SUBSCRIBE};
use crate::state::GatewayState;

/// Routes reachable without a token
pub fn create_public_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/dummyLogin", get(auth::dummy_login))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/health", get(health::health_check))
}

/// Routes behind the access guard
pub fn create_protected_routes(state: Arc<GatewayState>) -> Router<Arc<GatewayState>> {
    Router::new()
        .route(HOUSE_CREATE, post(house::create_house))
        .route(HOUSE_FLATS, get(house::get_house_flats))
        .route(HOUSE_SUBSCRIBE, post(house::subscribe))
        .route(FLAT_CREATE, post(flat::create_flat))
        .route(FLAT_UPDATE, post(flat::update_flat))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

pub async fn route_not_found() -> GatewayError {
    GatewayError::NotFound {
        code: ErrorCode::ParseUrl,
        message: "route not found".to_string(),
    }
}
