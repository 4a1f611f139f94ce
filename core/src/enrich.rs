//! Secondary-field lookup against PokeAPI and the fallback used when it fails.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::model::Enrichment;
use crate::model::NO_DATA_DESCRIPTION;
use crate::model::round2;

const ENGLISH: &str = "en";

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("unexpected payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("enrichment disabled")]
    Disabled,
}

/// Source of secondary fields keyed by lowercase name.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich(&self, name: &str) -> Result<Enrichment, EnrichError>;
}

/// Always fails, so every entry gets synthesized values.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineEnricher;

#[async_trait]
impl Enricher for OfflineEnricher {
    async fn enrich(&self, _name: &str) -> Result<Enrichment, EnrichError> {
        Err(EnrichError::Disabled)
    }
}

/// Placeholder secondary fields: height in [0, 10) m, weight in [0, 100) kg,
/// both with two decimals.
pub fn synthesize() -> Enrichment {
    let mut rng = rand::rng();
    Enrichment {
        height: hundredths(rng.random_range(0..1_000)),
        weight: hundredths(rng.random_range(0..10_000)),
        abilities: Vec::new(),
        description: NO_DATA_DESCRIPTION.to_string(),
    }
}

// Drawing whole hundredths keeps the rounded value inside the half-open range.
fn hundredths(value: u32) -> f64 {
    f64::from(value) / 100.0
}

/// Replaces line feeds, carriage returns and form feeds with single spaces.
pub fn clean_flavor_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{000C}' => ' ',
            other => other,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct PokemonResource {
    /// Decimeters.
    height: f64,
    /// Hectograms.
    weight: f64,
    abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Debug, Deserialize)]
struct SpeciesResource {
    flavor_text_entries: Vec<FlavorTextEntry>,
}

impl SpeciesResource {
    fn english_description(&self) -> String {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == ENGLISH)
            .map(|entry| clean_flavor_text(&entry.flavor_text))
            .unwrap_or_else(|| NO_DATA_DESCRIPTION.to_string())
    }
}

/// HTTP client for the `pokemon` and `pokemon-species` resources.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, EnrichError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(EnrichError::Client)?;
        Ok(Self::with_client(client, base_url))
    }

    fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str, name: &str) -> Result<T, EnrichError> {
        let url = format!("{}/{resource}/{name}", self.base_url);
        debug!(%url, "fetching enrichment resource");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| EnrichError::Transport {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(EnrichError::Status { url, status });
        }
        response
            .json::<T>()
            .await
            .map_err(|source| EnrichError::Decode { url, source })
    }
}

#[async_trait]
impl Enricher for PokeApiClient {
    async fn enrich(&self, name: &str) -> Result<Enrichment, EnrichError> {
        let pokemon: PokemonResource = self.fetch("pokemon", name).await?;
        let species: SpeciesResource = self.fetch("pokemon-species", name).await?;
        Ok(Enrichment {
            height: round2(pokemon.height * 0.1),
            weight: round2(pokemon.weight * 0.1),
            abilities: pokemon
                .abilities
                .into_iter()
                .map(|slot| slot.ability.name)
                .collect(),
            description: species.english_description(),
        })
    }
}

/// Enriches `name`, falling back to synthesized values on any failure.
/// Returns whether the lookup succeeded alongside the fields.
pub async fn enrich_or_synthesize(enricher: &dyn Enricher, name: &str) -> (Enrichment, bool) {
    match enricher.enrich(name).await {
        Ok(enrichment) => (enrichment, true),
        Err(EnrichError::Disabled) => (synthesize(), false),
        Err(err) => {
            warn!(%name, error = %err, "enrichment failed; using synthesized values");
            (synthesize(), false)
        }
    }
}
