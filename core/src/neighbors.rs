//! Detail lookup with circular previous/next navigation.

use serde::Deserialize;
use serde::Serialize;

use crate::error::CatalogError;
use crate::model::Pokemon;
use crate::store::PokemonStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDetail {
    pub pokemon: Pokemon,
    pub previous_pokemon: Option<Pokemon>,
    pub next_pokemon: Option<Pokemon>,
}

/// Previous and next ids around `id`.
///
/// Going back from 1 wraps to `max_id`. Going forward wraps to 1 once `id`
/// reaches `count`, the number of entries, which differs from `max_id` when
/// ids are sparse.
pub fn neighbor_ids(id: u32, max_id: u32, count: usize) -> (u32, u32) {
    let previous = if id == 1 { max_id } else { id.saturating_sub(1) };
    let next = if u64::from(id) >= count as u64 {
        1
    } else {
        id + 1
    };
    (previous, next)
}

/// Looks up `id` together with its neighbors.
///
/// The target's types are lowercased in the store as part of the lookup, so
/// later reads observe the normalized value.
pub fn detail(store: &PokemonStore, id: u32) -> Result<PokemonDetail, CatalogError> {
    store.write(|entries| {
        let index = entries
            .iter()
            .position(|p| p.id == id)
            .ok_or(CatalogError::NotFound)?;
        let max_id = entries.iter().map(|p| p.id).max().unwrap_or(id);
        let (previous_id, next_id) = neighbor_ids(id, max_id, entries.len());

        entries[index].normalize_types();

        let find = |target: u32| entries.iter().find(|p| p.id == target).cloned();
        Ok(PokemonDetail {
            pokemon: entries[index].clone(),
            previous_pokemon: find(previous_id),
            next_pokemon: find(next_id),
        })
    })
}
