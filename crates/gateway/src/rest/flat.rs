//! Flat endpoints

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use super::extract::ApiJson;
use super::house::FlatResponse;
use crate::error::{ErrorCode, GatewayError, GatewayResult};
use crate::middleware::AuthContext;
use crate::state::GatewayState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFlatRequest {
    pub house_id: i64,
    pub price: i64,
    pub rooms: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFlatRequest {
    pub id: i64,
    pub house_id: i64,
    /// Target status: `on_moderation`, `approved` or `declined`
    #[serde(default)]
    pub status: String,
}

#[utoipa::path(
    post,
    path = "/flat/create",
    tag = "Flats",
    request_body = CreateFlatRequest,
    responses(
        (status = 200, description = "Flat created in status `created`", body = FlatResponse),
        (status = 400, description = "Negative price or no rooms", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing token or not a client", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown house", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_flat(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<CreateFlatRequest>,
) -> GatewayResult<Json<FlatResponse>> {
    let flat = state
        .bounded(async {
            state
                .flat_service
                .create(payload.house_id, payload.price, payload.rooms)
                .await
                .map_err(|error| GatewayError::from_listing(ErrorCode::CreateFlat, error))
        })
        .await?;

    Ok(Json(flat.into()))
}

#[utoipa::path(
    post,
    path = "/flat/update",
    tag = "Flats",
    request_body = UpdateFlatRequest,
    responses(
        (status = 200, description = "Flat moved to the requested status", body = FlatResponse),
        (status = 401, description = "Missing token or not a moderator", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown flat", body = crate::error::ErrorResponse),
        (status = 422, description = "Transition not allowed from the current status", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_flat(
    State(state): State<Arc<GatewayState>>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(payload): ApiJson<UpdateFlatRequest>,
) -> GatewayResult<Json<FlatResponse>> {
    let flat = state
        .bounded(async {
            state
                .flat_service
                .update(auth.user_id, payload.id, payload.house_id, &payload.status)
                .await
                .map_err(|error| GatewayError::from_listing(ErrorCode::UpdateFlat, error))
        })
        .await?;

    Ok(Json(flat.into()))
}
