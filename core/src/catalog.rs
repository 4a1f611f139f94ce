use std::sync::Arc;

use pokedex_utils_readiness::Readiness;
use pokedex_utils_readiness::ReadinessFlag;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::CatalogConfig;
use crate::enrich::EnrichError;
use crate::enrich::Enricher;
use crate::enrich::OfflineEnricher;
use crate::enrich::PokeApiClient;
use crate::error::CatalogError;
use crate::ingest::IngestError;
use crate::ingest::IngestReport;
use crate::ingest::spawn_ingestion;
use crate::model::Pokemon;
use crate::mutation;
use crate::mutation::NewPokemon;
use crate::neighbors;
use crate::neighbors::PokemonDetail;
use crate::query;
use crate::query::ListPage;
use crate::query::ListParams;
use crate::store::PokemonStore;

pub type IngestHandle = JoinHandle<Result<IngestReport, IngestError>>;

/// The store plus its load state; this is what request handlers hold.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: PokemonStore,
    readiness: ReadinessFlag,
}

impl Catalog {
    /// A catalog over an already populated store, marked ready.
    pub fn from_store(store: PokemonStore) -> Self {
        let readiness = ReadinessFlag::new();
        readiness.mark_ready();
        Self { store, readiness }
    }

    /// Starts background ingestion per `config` and returns immediately with
    /// an empty catalog that fills as rows complete.
    pub fn load(config: &CatalogConfig) -> Result<(Self, IngestHandle), EnrichError> {
        let enricher: Arc<dyn Enricher> = if config.offline {
            info!("enrichment disabled; every entry gets synthesized values");
            Arc::new(OfflineEnricher)
        } else {
            Arc::new(PokeApiClient::new(
                config.pokeapi_base_url.clone(),
                config.enrichment_timeout,
            )?)
        };
        Ok(Self::load_with(config, enricher))
    }

    pub fn load_with(config: &CatalogConfig, enricher: Arc<dyn Enricher>) -> (Self, IngestHandle) {
        let catalog = Self {
            store: PokemonStore::new(),
            readiness: ReadinessFlag::new(),
        };
        let handle = spawn_ingestion(
            config.data_path.clone(),
            catalog.store.clone(),
            enricher,
            config.asset_base_url.clone(),
            catalog.readiness.clone(),
        );
        (catalog, handle)
    }

    pub fn store(&self) -> &PokemonStore {
        &self.store
    }

    pub fn readiness(&self) -> &ReadinessFlag {
        &self.readiness
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    pub fn list(&self, params: &ListParams) -> ListPage {
        query::list(&self.store, &params.filter(), params.pagination())
    }

    pub fn detail(&self, id: u32) -> Result<PokemonDetail, CatalogError> {
        neighbors::detail(&self.store, id)
    }

    pub fn create(&self, request: NewPokemon) -> Result<Pokemon, CatalogError> {
        mutation::create(&self.store, request)
    }

    pub fn delete(&self, id: u32) -> Result<Pokemon, CatalogError> {
        mutation::delete(&self.store, id)
    }
}
