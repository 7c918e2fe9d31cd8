//! Error types for the gateway layer

use std::fmt::Display;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use estate_listings::ListingError;
use estate_users::UserError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Machine-readable codes carried in every error body.
///
/// Codes name the operation that failed; the HTTP status tells the caller
/// what kind of failure it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    ReadHttpBody = 1,
    UnmarshalHttpBody = 2,
    CreateHouse = 4,
    ParseUrl = 5,
    GetFlatsByHouseId = 6,
    NotAuthorized = 7,
    RegisterUser = 8,
    LoginUser = 9,
    DummyLogin = 10,
    CreateFlat = 11,
    UpdateFlat = 12,
    SubscribeOnHouse = 13,
    NoAccess = 14,
    ExtractRoleFromToken = 15,
    Timeout = 16,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Generic message used when the cause must not reach the caller.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::ReadHttpBody => "can't read request",
            ErrorCode::UnmarshalHttpBody => "can't unmarshal request",
            ErrorCode::CreateHouse => "can't create house",
            ErrorCode::ParseUrl => "can't parse url",
            ErrorCode::GetFlatsByHouseId => "can't get flats by house id",
            ErrorCode::NotAuthorized => "not authorized",
            ErrorCode::RegisterUser => "can't register user",
            ErrorCode::LoginUser => "can't login user",
            ErrorCode::DummyLogin => "can't dummy login",
            ErrorCode::CreateFlat => "can't create flat",
            ErrorCode::UpdateFlat => "can't update flat",
            ErrorCode::SubscribeOnHouse => "can't subscribe on house",
            ErrorCode::NoAccess => "not enough access rights",
            ErrorCode::ExtractRoleFromToken => "can't extract role",
            ErrorCode::Timeout => "request timed out",
        }
    }
}

/// Error body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub request_id: String,
    pub code: u16,
}

/// Code and message of a failed response, left in the response extensions
/// so the request context middleware can stamp the request id into the body.
#[derive(Debug, Clone)]
pub(crate) struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub(crate) fn into_body(self, request_id: &str) -> ErrorResponse {
        ErrorResponse {
            message: self.message,
            request_id: request_id.to_string(),
            code: self.code.as_u16(),
        }
    }
}

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{message}")]
    BadRequest { code: ErrorCode, message: String },

    #[error("{message}")]
    Unauthorized { code: ErrorCode, message: String },

    #[error("not enough access rights")]
    Forbidden,

    #[error("{message}")]
    NotFound { code: ErrorCode, message: String },

    #[error("{message}")]
    Conflict { code: ErrorCode, message: String },

    #[error("{message}")]
    InvalidTransition { code: ErrorCode, message: String },

    #[error("request timed out")]
    Timeout,

    #[error("{}", .code.message())]
    Internal { code: ErrorCode },
}

impl GatewayError {
    pub fn bad_request(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    /// Missing, malformed or expired token.
    pub fn not_authorized() -> Self {
        Self::Unauthorized {
            code: ErrorCode::NotAuthorized,
            message: ErrorCode::NotAuthorized.message().to_string(),
        }
    }

    /// Log the cause and return an opaque 500 for `code`.
    pub fn internal(code: ErrorCode, cause: impl Display) -> Self {
        error!(code = code.as_u16(), error = %cause, "internal error");
        Self::Internal { code }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            GatewayError::Unauthorized { .. } | GatewayError::Forbidden => StatusCode::UNAUTHORIZED,
            GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::Conflict { .. } => StatusCode::CONFLICT,
            GatewayError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::BadRequest { code, .. }
            | GatewayError::Unauthorized { code, .. }
            | GatewayError::NotFound { code, .. }
            | GatewayError::Conflict { code, .. }
            | GatewayError::InvalidTransition { code, .. }
            | GatewayError::Internal { code } => *code,
            GatewayError::Forbidden => ErrorCode::NoAccess,
            GatewayError::Timeout => ErrorCode::Timeout,
        }
    }

    /// Map a user service failure raised while serving `code`.
    pub fn from_user(code: ErrorCode, error: UserError) -> Self {
        match error {
            UserError::InvalidRole(_) | UserError::InvalidEmail | UserError::InvalidPassword(_) => {
                Self::bad_request(code, error.to_string())
            }
            UserError::UserAlreadyExists => Self::Conflict {
                code,
                message: error.to_string(),
            },
            UserError::UserNotFound => Self::NotFound {
                code,
                message: error.to_string(),
            },
            UserError::InvalidCredentials => Self::Unauthorized {
                code,
                message: error.to_string(),
            },
            UserError::Hashing(_) | UserError::Storage(_) | UserError::Token(_) => {
                Self::internal(code, error)
            }
        }
    }

    /// Map a house or flat service failure raised while serving `code`.
    pub fn from_listing(code: ErrorCode, error: ListingError) -> Self {
        match error {
            ListingError::Validation { message } => Self::bad_request(code, message),
            ListingError::HouseNotFound { .. } | ListingError::FlatNotFound { .. } => {
                Self::NotFound {
                    code,
                    message: error.to_string(),
                }
            }
            ListingError::InvalidStatusTransition { .. } => Self::InvalidTransition {
                code,
                message: error.to_string(),
            },
            ListingError::Storage { .. } => Self::internal(code, error),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let report = ErrorReport {
            code: self.code(),
            message: self.to_string(),
        };

        let mut response = (status, Json(report.clone().into_body(""))).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        let code = match rejection {
            JsonRejection::BytesRejection(_) => ErrorCode::ReadHttpBody,
            _ => ErrorCode::UnmarshalHttpBody,
        };
        Self::bad_request(code, rejection.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(ErrorCode::ParseUrl, rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(ErrorCode::ParseUrl, rejection.body_text())
    }
}
