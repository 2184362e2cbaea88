//! # API v1
//!
//! JSON routes under `/api/v1`, one module per area.

pub mod chat;
pub mod collections;
pub mod config;
pub mod pokemon;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pokedex_core::DexError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

/// Error surfaced to clients with the inline, user-facing message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<DexError> for ApiError {
    fn from(err: DexError) -> Self {
        let status = match &err {
            DexError::Status { status: 404, .. } => StatusCode::NOT_FOUND,
            DexError::ImagesDisabled => StatusCode::BAD_REQUEST,
            DexError::Blocked { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DexError::MissingApiKey { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DexError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DexError::Http { .. }
            | DexError::Status { .. }
            | DexError::Decode { .. }
            | DexError::EmptyResponse => StatusCode::BAD_GATEWAY,
        };
        if status.is_server_error() {
            eprintln!("❌ {}", err);
        }
        Self {
            status,
            message: err.user_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiResponse {
                success: false,
                message: self.message,
            }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Parse a numeric path id
pub(crate) fn parse_id(raw: &str) -> Result<u32, ApiError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid Pokémon id: {}", raw)))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_statuses() {
        let not_found: ApiError = DexError::Status {
            url: "pokemon/99999".to_string(),
            status: 404,
        }
        .into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.message, "Pokémon no encontrado");

        let no_key: ApiError = DexError::MissingApiKey {
            env_var: "GEMINI_API_KEY".to_string(),
        }
        .into();
        assert_eq!(no_key.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(no_key.message, "Falta GEMINI_API_KEY en .env");
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("25").unwrap(), 25);
        assert!(parse_id("0").is_err());
        assert!(parse_id("pikachu").is_err());
    }
}
