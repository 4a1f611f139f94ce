//! Handlers for the `/api/pokemons` resource.

use axum::Json;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use pokedex_core::Catalog;
use pokedex_core::CatalogError;
use pokedex_core::ListPage;
use pokedex_core::ListParams;
use pokedex_core::NewPokemon;
use pokedex_core::Pokemon;
use pokedex_core::PokemonDetail;
use pokedex_core::ValidationError;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::error::MessageResponse;

pub const CREATED_MESSAGE: &str = "New Pokémon added successfully.";
pub const DELETED_MESSAGE: &str = "Pokemon deleted successfully";

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub data: PokemonDetail,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub pokemon: Pokemon,
}

/// Ids that are not unsigned integers can never match an entry.
fn parse_id(raw: &str) -> Result<u32, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::from(CatalogError::NotFound))
}

/// `GET /` with `page`, `limit`, `search` and `type` query parameters.
pub async fn list_pokemons(
    State(catalog): State<Catalog>,
    Query(params): Query<ListParams>,
) -> Json<ListPage> {
    Json(catalog.list(&params))
}

/// `GET /{id}`
pub async fn get_pokemon(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<DetailResponse>, ApiError> {
    let data = catalog.detail(parse_id(&id)?)?;
    Ok(Json(DetailResponse { data }))
}

/// `POST /`
pub async fn create_pokemon(
    State(catalog): State<Catalog>,
    payload: Result<Json<NewPokemon>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected create body");
        ValidationError::MalformedBody
    })?;
    let pokemon = catalog.create(request)?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: CREATED_MESSAGE.to_string(),
            pokemon,
        }),
    ))
}

/// `DELETE /{id}`
pub async fn delete_pokemon(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    catalog.delete(parse_id(&id)?)?;
    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}
