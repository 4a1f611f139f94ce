use serde::Deserialize;
use serde::Serialize;
use strum_macros::AsRefStr;
use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;

/// Placeholder used whenever no English description could be obtained.
pub const NO_DATA_DESCRIPTION: &str = "No data available";

/// The only category value the catalog ever assigns.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Category tags accepted on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PokemonType {
    Bug,
    Dragon,
    Fairy,
    Fire,
    Ghost,
    Ground,
    Normal,
    Psychic,
    Steel,
    Dark,
    Electric,
    Fighting,
    Flying,
    Grass,
    Ice,
    Poison,
    Rock,
    Water,
}

impl PokemonType {
    /// Case-insensitive lookup against the fixed enumeration.
    pub fn parse_folded(raw: &str) -> Option<Self> {
        raw.to_lowercase().parse().ok()
    }
}

/// A fully built catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub url: String,
    pub height: f64,
    pub weight: f64,
    pub abilities: Vec<String>,
    pub description: String,
    pub category: String,
}

impl Pokemon {
    pub fn has_type_folded(&self, wanted: &str) -> bool {
        self.types.iter().any(|t| t.to_lowercase() == wanted)
    }

    pub fn normalize_types(&mut self) {
        for t in &mut self.types {
            *t = t.to_lowercase();
        }
    }
}

/// Reduced projection returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub url: String,
}

impl From<&Pokemon> for PokemonSummary {
    fn from(pokemon: &Pokemon) -> Self {
        Self {
            id: pokemon.id,
            name: pokemon.name.clone(),
            types: pokemon.types.clone(),
            url: pokemon.url.clone(),
        }
    }
}

/// Identity fields of an entry before its secondary fields are known.
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonDraft {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub url: String,
}

/// Secondary fields, either looked up or synthesized.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub height: f64,
    pub weight: f64,
    pub abilities: Vec<String>,
    pub description: String,
}

impl PokemonDraft {
    pub fn finish(self, enrichment: Enrichment) -> Pokemon {
        Pokemon {
            id: self.id,
            name: self.name,
            types: self.types,
            url: self.url,
            height: enrichment.height,
            weight: enrichment.weight,
            abilities: enrichment.abilities,
            description: enrichment.description,
            category: UNKNOWN_CATEGORY.to_string(),
        }
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
