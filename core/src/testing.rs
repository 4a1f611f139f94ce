//! Fixture builders shared by unit and integration tests.

use crate::model::NO_DATA_DESCRIPTION;
use crate::model::Pokemon;
use crate::model::UNKNOWN_CATEGORY;
use crate::store::PokemonStore;

pub fn pokemon(id: u32, name: &str, types: &[&str]) -> Pokemon {
    Pokemon {
        id,
        name: name.to_string(),
        types: types.iter().map(|t| (*t).to_string()).collect(),
        url: format!("http://localhost:8000/images/{id}.png"),
        height: 1.0,
        weight: 10.0,
        abilities: Vec::new(),
        description: NO_DATA_DESCRIPTION.to_string(),
        category: UNKNOWN_CATEGORY.to_string(),
    }
}

/// Eight entries with a gap between 7 and 25, inserted out of id order.
pub fn sample_store() -> PokemonStore {
    PokemonStore::from_entries(vec![
        pokemon(1, "bulbasaur", &["Grass", "Poison"]),
        pokemon(2, "ivysaur", &["Grass", "Poison"]),
        pokemon(4, "charmander", &["Fire"]),
        pokemon(3, "venusaur", &["Grass", "Poison"]),
        pokemon(5, "charmeleon", &["Fire"]),
        pokemon(6, "charizard", &["Fire", "Flying"]),
        pokemon(7, "squirtle", &["Water"]),
        pokemon(25, "pikachu", &["Electric"]),
    ])
}
