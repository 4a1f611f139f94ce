use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use pokedex_core::Catalog;
use tower_http::trace::TraceLayer;

use crate::error::MessageResponse;
use crate::routes;

/// Mount point of the catalog resource.
pub const API_PREFIX: &str = "/api/pokemons";

pub fn pokemon_routes() -> Router<Catalog> {
    Router::new()
        .route("/", get(routes::list_pokemons).post(routes::create_pokemon))
        .route(
            "/{id}",
            get(routes::get_pokemon).delete(routes::delete_pokemon),
        )
}

pub fn app_router(catalog: Catalog) -> Router {
    Router::new()
        .nest(API_PREFIX, pokemon_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(catalog)
}

async fn not_found() -> (StatusCode, Json<MessageResponse>) {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new("Not found")))
}
