//! Extractors that reject with [`GatewayError`] instead of axum's plain-text bodies.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::GatewayError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(GatewayError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(GatewayError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(GatewayError))]
pub struct ApiQuery<T>(pub T);
