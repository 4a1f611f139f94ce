//! In-memory Pokemon catalog: CSV ingestion with PokeAPI enrichment, list
//! queries, circular detail navigation, and create/delete.

pub mod catalog;
pub mod config;
pub mod enrich;
pub mod error;
pub mod ingest;
pub mod model;
pub mod mutation;
pub mod neighbors;
pub mod query;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use catalog::Catalog;
pub use catalog::IngestHandle;
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use error::ValidationError;
pub use model::Pokemon;
pub use model::PokemonSummary;
pub use model::PokemonType;
pub use mutation::NewPokemon;
pub use neighbors::PokemonDetail;
pub use query::ListPage;
pub use query::ListParams;
pub use store::PokemonStore;
