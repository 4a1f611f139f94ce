use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pokedex_core::CatalogConfig;
use pokedex_core::config::DEFAULT_ASSET_BASE_URL;
use pokedex_core::config::DEFAULT_DATA_PATH;
use pokedex_core::config::DEFAULT_POKEAPI_BASE_URL;

#[derive(Debug, Clone, Parser)]
#[command(name = "pokedex-server", version, about = "Serve the Pokemon catalog over HTTP")]
pub struct ServerArgs {
    /// Address to listen on.
    #[arg(long, env = "POKEDEX_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// CSV dataset with `id`, `Name`, `Type1`, `Type2` columns.
    #[arg(long = "data", env = "POKEDEX_DATA", value_name = "FILE", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Prefix for image urls; `{id}.png` is appended.
    #[arg(long, env = "POKEDEX_ASSET_BASE_URL", value_name = "URL", default_value = DEFAULT_ASSET_BASE_URL)]
    pub asset_base_url: String,

    #[arg(long, env = "POKEDEX_POKEAPI_BASE_URL", value_name = "URL", default_value = DEFAULT_POKEAPI_BASE_URL)]
    pub pokeapi_base_url: String,

    /// Per-request timeout for enrichment lookups. Unbounded when unset.
    #[arg(long, env = "POKEDEX_ENRICHMENT_TIMEOUT_SECS", value_name = "SECS")]
    pub enrichment_timeout_secs: Option<u64>,

    /// Skip PokeAPI and synthesize secondary fields for every entry.
    #[arg(long, env = "POKEDEX_OFFLINE")]
    pub offline: bool,

    /// Finish loading the dataset before accepting connections.
    #[arg(long, env = "POKEDEX_WAIT_FOR_INGEST")]
    pub wait_for_ingest: bool,
}

impl ServerArgs {
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            data_path: self.data.clone(),
            asset_base_url: self.asset_base_url.clone(),
            pokeapi_base_url: self.pokeapi_base_url.clone(),
            enrichment_timeout: self.enrichment_timeout_secs.map(Duration::from_secs),
            offline: self.offline,
        }
    }
}
