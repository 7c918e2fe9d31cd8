//! House endpoints

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use estate_listings::{Flat, FlatStatus, House};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::extract::{ApiJson, ApiPath};
use crate::error::{ErrorCode, GatewayError, GatewayResult};
use crate::middleware::AuthContext;
use crate::state::GatewayState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHouseRequest {
    pub address: String,
    pub year: i64,
    #[serde(default)]
    pub developer: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HouseResponse {
    pub id: i64,
    pub address: String,
    pub year: i64,
    pub developer: String,
    pub created_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
}

impl From<House> for HouseResponse {
    fn from(house: House) -> Self {
        Self {
            id: house.id,
            address: house.address,
            year: house.year,
            developer: house.developer,
            created_at: house.created_at,
            update_at: house.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FlatResponse {
    pub id: i64,
    pub house_id: i64,
    pub price: i64,
    pub rooms: i64,
    #[schema(value_type = String, example = "created")]
    pub status: FlatStatus,
}

impl From<Flat> for FlatResponse {
    fn from(flat: Flat) -> Self {
        Self {
            id: flat.id,
            house_id: flat.house_id,
            price: flat.price,
            rooms: flat.rooms,
            status: flat.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HouseFlatsResponse {
    pub flats: Vec<FlatResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscribeResponse {}

#[utoipa::path(
    post,
    path = "/house/create",
    tag = "Houses",
    request_body = CreateHouseRequest,
    responses(
        (status = 200, description = "House created", body = HouseResponse),
        (status = 400, description = "Empty address or negative year", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing token or not a moderator", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_house(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<CreateHouseRequest>,
) -> GatewayResult<Json<HouseResponse>> {
    let house = state
        .bounded(async {
            state
                .house_service
                .create(&payload.address, payload.year, &payload.developer)
                .await
                .map_err(|error| GatewayError::from_listing(ErrorCode::CreateHouse, error))
        })
        .await?;

    Ok(Json(house.into()))
}

#[utoipa::path(
    get,
    path = "/house/{id}",
    tag = "Houses",
    params(("id" = i64, Path, description = "House id")),
    responses(
        (status = 200, description = "Flats of the house, possibly empty", body = HouseFlatsResponse),
        (status = 400, description = "Malformed house id", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_house_flats(
    State(state): State<Arc<GatewayState>>,
    ApiPath(house_id): ApiPath<i64>,
) -> GatewayResult<Json<HouseFlatsResponse>> {
    let flats = state
        .bounded(async {
            state
                .house_service
                .list_flats(house_id)
                .await
                .map_err(|error| GatewayError::from_listing(ErrorCode::GetFlatsByHouseId, error))
        })
        .await?;

    Ok(Json(HouseFlatsResponse {
        flats: flats.into_iter().map(FlatResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/house/{id}/subscribe",
    tag = "Houses",
    params(("id" = i64, Path, description = "House id")),
    responses(
        (status = 200, description = "Subscription recorded", body = SubscribeResponse),
        (status = 401, description = "Missing token or not a client", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown house", body = crate::error::ErrorResponse)
    )
)]
pub async fn subscribe(
    State(state): State<Arc<GatewayState>>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(house_id): ApiPath<i64>,
) -> GatewayResult<Json<SubscribeResponse>> {
    state
        .bounded(async {
            state
                .house_service
                .subscribe(house_id, auth.user_id)
                .await
                .map_err(|error| GatewayError::from_listing(ErrorCode::SubscribeOnHouse, error))
        })
        .await?;

    Ok(Json(SubscribeResponse {}))
}
