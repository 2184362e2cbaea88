//! # Pokémon API
//!
//! List (search + generation + type filters), detail visits and the static
//! catalogs behind the pickers.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use pokedex_core::chat::EXAMPLE_QUESTIONS;
use pokedex_core::dex::generation::generation_options;
use pokedex_core::dex::pokemon::dex_number;
use pokedex_core::dex::stats::{stat_bar_percent, stat_label, stat_total};
use pokedex_core::dex::types::card_color;
use pokedex_core::dex::{ListFilter, PokemonDetail, PokemonSummary, PokemonType};
use pokedex_core::state::CollectionKind;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{ApiError, ApiResult};
use crate::state::{AppState, SharedState};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Name or id substring
    pub q: Option<String>,
    pub generation: Option<u8>,
    /// Lowercase API type name, e.g. "fire"
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    /// Re-fetch instead of using the cached list
    #[serde(default)]
    pub refresh: bool,
}

impl ListQuery {
    fn filter(&self) -> ListFilter {
        ListFilter {
            query: self.q.clone(),
            generation: self.generation,
            type_name: self.type_name.as_ref().map(|t| t.to_lowercase()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListItem {
    pub id: u32,
    pub dex_number: String,
    pub name: String,
    pub types: Vec<String>,
    pub sprite: Option<String>,
    pub generation: u8,
    pub card_color: String,
    pub favorite: bool,
    pub captured: bool,
}

impl ListItem {
    fn new(summary: &PokemonSummary, state: &AppState) -> Self {
        Self {
            id: summary.id,
            dex_number: dex_number(summary.id),
            name: summary.name.clone(),
            types: summary.types.clone(),
            sprite: summary.sprite.clone(),
            generation: summary.generation,
            card_color: card_color(&summary.types).to_string(),
            favorite: state.collections.contains(CollectionKind::Favorites, summary.id),
            captured: state.collections.contains(CollectionKind::Captured, summary.id),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse {
    /// Size of the unfiltered list
    pub total: usize,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatView {
    pub name: String,
    pub label: String,
    pub base_stat: u32,
    pub percent: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DetailResponse {
    #[schema(value_type = Object)]
    pub pokemon: PokemonDetail,
    pub dex_number: String,
    pub card_color: String,
    pub stats: Vec<StatView>,
    pub stat_total: u32,
    pub has_evolutions: bool,
    pub favorite: bool,
    pub captured: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TypeInfo {
    pub name: String,
    pub display_name: String,
    pub badge_color: String,
    pub card_color: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerationInfo {
    pub generation: Option<u8>,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub types: Vec<TypeInfo>,
    pub generations: Vec<GenerationInfo>,
    pub example_questions: Vec<String>,
}

pub fn pokemon_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_pokemon))
        .route("/:id", get(get_pokemon))
}

/// Filtered Pokémon list
#[utoipa::path(
    get,
    path = "/api/v1/pokemon",
    tag = "pokemon",
    params(ListQuery),
    responses(
        (status = 200, description = "Filtered list in national order", body = ListResponse),
        (status = 502, description = "PokeAPI unreachable", body = super::ApiResponse)
    )
)]
pub async fn list_pokemon(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<ListResponse> {
    let all = state.summaries(query.refresh).await?;
    let filter = query.filter();
    let items = filter
        .apply(&all)
        .into_iter()
        .map(|summary| ListItem::new(summary, &state))
        .collect();

    Ok(Json(ListResponse {
        total: all.len(),
        items,
    }))
}

/// Pokémon detail; also becomes the chat context
#[utoipa::path(
    get,
    path = "/api/v1/pokemon/{id}",
    tag = "pokemon",
    params(("id" = String, Path, description = "National id or API name")),
    responses(
        (status = 200, description = "Full detail", body = DetailResponse),
        (status = 404, description = "Unknown Pokémon", body = super::ApiResponse)
    )
)]
pub async fn get_pokemon(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<DetailResponse> {
    let key = id.trim().to_lowercase();
    if key.is_empty() {
        return Err(ApiError::bad_request("Missing Pokémon id"));
    }

    let detail = state.visit(&key).await?;
    Ok(Json(detail_response(detail, &state)))
}

pub(crate) fn detail_response(detail: PokemonDetail, state: &AppState) -> DetailResponse {
    let stats = detail
        .stats
        .iter()
        .map(|s| StatView {
            name: s.name.clone(),
            label: stat_label(&s.name).to_string(),
            base_stat: s.base_stat,
            percent: stat_bar_percent(s.base_stat),
        })
        .collect();

    DetailResponse {
        dex_number: dex_number(detail.id),
        card_color: card_color(&detail.types).to_string(),
        stats,
        stat_total: stat_total(&detail.stats),
        has_evolutions: detail.has_evolutions(),
        favorite: state.collections.contains(CollectionKind::Favorites, detail.id),
        captured: state.collections.contains(CollectionKind::Captured, detail.id),
        pokemon: detail,
    }
}

/// Type and generation pickers
#[utoipa::path(
    get,
    path = "/api/v1/catalog",
    tag = "pokemon",
    responses(
        (status = 200, description = "Picker catalogs", body = CatalogResponse)
    )
)]
pub async fn get_catalog() -> Json<CatalogResponse> {
    let types = PokemonType::all()
        .iter()
        .map(|t| TypeInfo {
            name: t.as_str().to_string(),
            display_name: t.display_name().to_string(),
            badge_color: t.badge_color().to_string(),
            card_color: t.card_color().to_string(),
        })
        .collect();

    let generations = generation_options()
        .into_iter()
        .map(|g| GenerationInfo {
            generation: g.generation,
            label: g.label,
        })
        .collect();

    Json(CatalogResponse {
        types,
        generations,
        example_questions: EXAMPLE_QUESTIONS.iter().map(|q| q.to_string()).collect(),
    })
}
