use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_PATH: &str = "assets/pokemons.csv";
pub const DEFAULT_ASSET_BASE_URL: &str = "http://localhost:8000/images";
pub const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Settings for loading and enriching the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// CSV file with `id`, `Name`, `Type1`, `Type2` columns.
    pub data_path: PathBuf,
    /// Prefix for synthesized image urls; `{id}.png` is appended.
    pub asset_base_url: String,
    pub pokeapi_base_url: String,
    /// Per-request timeout for enrichment lookups. `None` waits indefinitely.
    pub enrichment_timeout: Option<Duration>,
    /// Skip enrichment entirely and synthesize every entry.
    pub offline: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            pokeapi_base_url: DEFAULT_POKEAPI_BASE_URL.to_string(),
            enrichment_timeout: None,
            offline: false,
        }
    }
}
