//! # Collections API
//!
//! Favorites and captured sets. Each toggle is persisted before it is
//! acknowledged.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use pokedex_core::state::CollectionKind;
use serde::Serialize;
use utoipa::ToSchema;

use super::{parse_id, ApiResult};
use crate::state::SharedState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionResponse {
    pub collection: String,
    pub ids: Vec<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleResponse {
    pub collection: String,
    pub id: u32,
    /// Membership after the toggle
    pub member: bool,
    pub ids: Vec<u32>,
}

pub fn favorites_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_favorites))
        .route("/:id/toggle", post(toggle_favorite))
}

pub fn captured_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_captured))
        .route("/:id/toggle", post(toggle_captured))
}

fn collection(state: &SharedState, kind: CollectionKind) -> CollectionResponse {
    CollectionResponse {
        collection: kind.to_string(),
        ids: state.collections.ids(kind),
    }
}

fn toggle(state: &SharedState, kind: CollectionKind, raw_id: &str) -> ApiResult<ToggleResponse> {
    let id = parse_id(raw_id)?;
    let member = state.collections.toggle(kind, id)?;
    Ok(Json(ToggleResponse {
        collection: kind.to_string(),
        id,
        member,
        ids: state.collections.ids(kind),
    }))
}

/// Favorite ids, ascending
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    tag = "collections",
    responses((status = 200, description = "Favorite ids", body = CollectionResponse))
)]
pub async fn list_favorites(State(state): State<SharedState>) -> Json<CollectionResponse> {
    Json(collection(&state, CollectionKind::Favorites))
}

/// Add or remove a favorite
#[utoipa::path(
    post,
    path = "/api/v1/favorites/{id}/toggle",
    tag = "collections",
    params(("id" = u32, Path, description = "National id")),
    responses(
        (status = 200, description = "New membership", body = ToggleResponse),
        (status = 400, description = "Invalid id", body = super::ApiResponse)
    )
)]
pub async fn toggle_favorite(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<ToggleResponse> {
    toggle(&state, CollectionKind::Favorites, &id)
}

/// Captured ids, ascending
#[utoipa::path(
    get,
    path = "/api/v1/captured",
    tag = "collections",
    responses((status = 200, description = "Captured ids", body = CollectionResponse))
)]
pub async fn list_captured(State(state): State<SharedState>) -> Json<CollectionResponse> {
    Json(collection(&state, CollectionKind::Captured))
}

/// Mark or unmark a Pokémon as captured
#[utoipa::path(
    post,
    path = "/api/v1/captured/{id}/toggle",
    tag = "collections",
    params(("id" = u32, Path, description = "National id")),
    responses(
        (status = 200, description = "New membership", body = ToggleResponse),
        (status = 400, description = "Invalid id", body = super::ApiResponse)
    )
)]
pub async fn toggle_captured(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<ToggleResponse> {
    toggle(&state, CollectionKind::Captured, &id)
}
