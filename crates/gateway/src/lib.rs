//! # Estate Gateway Crate
//!
//! HTTP surface of the estate backend. Routes requests through the request
//! context and access guard middleware to the user, house and flat services.
//!
//! ## Architecture
//!
//! - **REST**: HTTP API endpoints with OpenAPI documentation
//! - **State**: Shared services, token verification and request limits
//! - **Policy**: Which role each guarded route requires
//! - **Middleware**: Access guard, request ids, logging
//!
//! ## Usage
//!
//! ```rust,ignore
//! use estate_gateway::{create_router, GatewayState};
//!
//! let state = GatewayState::new(pool, tokens, hasher, &config);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod middleware;
pub mod policy;
pub mod rest;
pub mod state;

pub use error::{ErrorCode, ErrorResponse, GatewayError, GatewayResult};
pub use middleware::{auth_middleware, AuthContext, RequestId, REQUEST_ID_HEADER, TOKEN_COOKIE};
pub use state::GatewayState;

use std::sync::Arc;

use axum::{http::Method, middleware as axum_middleware, Router};
use tower_http::cors::{Any, CorsLayer};

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);

    #[allow(unused_mut)]
    let mut router = Router::new()
        .merge(rest::create_public_routes())
        .merge(rest::create_protected_routes(arc_state.clone()))
        .fallback(rest::route_not_found)
        .with_state(arc_state);

    // Add Swagger UI if in debug mode
    #[cfg(debug_assertions)]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            paths(
                rest::auth::dummy_login,
                rest::auth::register,
                rest::auth::login,
                rest::house::create_house,
                rest::house::get_house_flats,
                rest::house::subscribe,
                rest::flat::create_flat,
                rest::flat::update_flat,
                rest::health::health_check,
            ),
            components(
                schemas(
                    rest::auth::DummyLoginQuery,
                    rest::auth::RegisterRequest,
                    rest::auth::RegisterResponse,
                    rest::auth::LoginRequest,
                    rest::auth::TokenResponse,
                    rest::house::CreateHouseRequest,
                    rest::house::HouseResponse,
                    rest::house::FlatResponse,
                    rest::house::HouseFlatsResponse,
                    rest::house::SubscribeResponse,
                    rest::flat::CreateFlatRequest,
                    rest::flat::UpdateFlatRequest,
                    rest::health::HealthResponse,
                    error::ErrorResponse,
                )
            ),
            tags(
                (name = "Auth", description = "Registration and tokens"),
                (name = "Houses", description = "Houses, their flats and subscriptions"),
                (name = "Flats", description = "Flat creation and moderation"),
                (name = "Health", description = "Liveness"),
            )
        )]
        struct ApiDoc;

        router = router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn(middleware::request_context_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
}
