//! Filtering and pagination for the list endpoint.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Pokemon;
use crate::model::PokemonSummary;
use crate::store::PokemonStore;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Raw list parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
}

/// Case-folded filter criteria. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    search: Option<String>,
    type_name: Option<String>,
}

impl Filter {
    pub fn new(search: Option<&str>, type_name: Option<&str>) -> Self {
        let fold = |value: Option<&str>| {
            value
                .filter(|v| !v.is_empty())
                .map(str::to_lowercase)
        };
        Self {
            search: fold(search),
            type_name: fold(type_name),
        }
    }

    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        let matches_type = self
            .type_name
            .as_deref()
            .is_none_or(|wanted| pokemon.has_type_folded(wanted));
        let matches_name = self
            .search
            .as_deref()
            .is_none_or(|needle| pokemon.name.to_lowercase().contains(needle));
        matches_type && matches_name
    }
}

/// Page coordinates. `None` marks a value that was supplied but is not an
/// integer; such a page is always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: Some(DEFAULT_PAGE),
            limit: Some(DEFAULT_LIMIT),
        }
    }
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Index range of the requested page within a set of `len` items.
    ///
    /// Windows that start before the first item, have a non-positive limit, or
    /// come from non-numeric input are empty.
    pub fn window(&self, len: usize) -> Range<usize> {
        let (Some(page), Some(limit)) = (self.page, self.limit) else {
            return 0..0;
        };
        let Some(start) = page.checked_sub(1).and_then(|p| p.checked_mul(limit)) else {
            return 0..0;
        };
        let (Ok(start), Ok(limit)) = (usize::try_from(start), usize::try_from(limit)) else {
            return 0..0;
        };
        let start = start.min(len);
        let end = start.saturating_add(limit).min(len);
        start..end
    }
}

impl ListParams {
    pub fn filter(&self) -> Filter {
        Filter::new(self.search.as_deref(), self.type_filter.as_deref())
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: parse_int(self.page.as_deref(), DEFAULT_PAGE),
            limit: parse_int(self.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

/// Reads the leading integer of `raw`: optional sign, then digits, ignoring
/// whatever follows (`"2abc"` is 2, `"3.0"` is 3). No digits means `None`.
fn parse_int(raw: Option<&str>, default: i64) -> Option<i64> {
    let Some(value) = raw else {
        return Some(default);
    };
    let value = value.trim_start();
    let unsigned = value.trim_start_matches(['+', '-']);
    let sign_len = value.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    value[..sign_len + digits].parse().ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    pub data: Vec<PokemonSummary>,
    #[serde(rename = "totalPokemons")]
    pub total_pokemons: usize,
}

/// Filters the current store contents and returns one page of summaries.
/// `total_pokemons` counts the filtered set, not the page.
pub fn list(store: &PokemonStore, filter: &Filter, pagination: Pagination) -> ListPage {
    store.read(|entries| {
        let matching: Vec<&Pokemon> = entries.iter().filter(|p| filter.matches(p)).collect();
        let window = pagination.window(matching.len());
        ListPage {
            data: matching[window]
                .iter()
                .map(|p| PokemonSummary::from(*p))
                .collect(),
            total_pokemons: matching.len(),
        }
    })
}
