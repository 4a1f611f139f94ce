use serde::Deserialize;
use tracing::info;

use crate::enrich::synthesize;
use crate::error::CatalogError;
use crate::error::ValidationError;
use crate::model::Pokemon;
use crate::model::PokemonDraft;
use crate::model::PokemonType;
use crate::store::PokemonStore;

/// Body of a create request. Every field is required; absence is checked
/// explicitly rather than by value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPokemon {
    pub name: Option<String>,
    pub id: Option<u32>,
    pub types: Option<Vec<String>>,
    pub url: Option<String>,
}

impl NewPokemon {
    fn validate_shape(self) -> Result<PokemonDraft, ValidationError> {
        let (Some(name), Some(id), Some(types), Some(url)) =
            (self.name, self.id, self.types, self.url)
        else {
            return Err(ValidationError::MissingFields);
        };
        if id == 0 {
            return Err(ValidationError::InvalidId);
        }
        Ok(PokemonDraft {
            id,
            name: name.to_lowercase(),
            types,
            url,
        })
    }
}

fn validate_types(types: &[String]) -> Result<Vec<String>, ValidationError> {
    if !(1..=2).contains(&types.len()) {
        return Err(ValidationError::TypeCount);
    }
    types
        .iter()
        .map(|raw| {
            PokemonType::parse_folded(raw)
                .map(|t| t.to_string())
                .ok_or(ValidationError::InvalidType)
        })
        .collect()
}

/// Validates `request` and appends the new entry with synthesized secondary
/// fields. Checks run in order: presence, uniqueness, type count, type values.
pub fn create(store: &PokemonStore, request: NewPokemon) -> Result<Pokemon, CatalogError> {
    let mut draft = request.validate_shape()?;
    store.write(|entries| {
        let exists = entries
            .iter()
            .any(|p| p.id == draft.id || p.name == draft.name);
        if exists {
            return Err(ValidationError::AlreadyExists.into());
        }
        draft.types = validate_types(&draft.types)?;

        let pokemon = draft.finish(synthesize());
        entries.push(pokemon.clone());
        info!(id = pokemon.id, name = %pokemon.name, "pokemon created");
        Ok(pokemon)
    })
}

pub fn delete(store: &PokemonStore, id: u32) -> Result<Pokemon, CatalogError> {
    let removed = store.remove(id).ok_or(CatalogError::NotFound)?;
    info!(id, name = %removed.name, "pokemon deleted");
    Ok(removed)
}
