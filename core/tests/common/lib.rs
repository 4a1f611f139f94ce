use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;

pub use pokedex_core::testing::sample_store;

/// Writes `rows` under the dataset header into a fresh temp dir.
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn write_dataset(rows: &[&str]) -> anyhow::Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("pokemons.csv");
    let mut contents = String::from("id,Name,Type1,Type2\n");
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    std::fs::write(&path, contents)?;
    Ok((dir, path))
}

/// Canned PokeAPI data for one name.
pub struct PokeApiFixture<'a> {
    pub name: &'a str,
    pub height_dm: u32,
    pub weight_hg: u32,
    pub abilities: &'a [&'a str],
    pub english_text: Option<&'a str>,
}

/// Serves `fixture` from `server` under `/pokemon/{name}` and
/// `/pokemon-species/{name}`.
pub async fn mount_pokeapi(server: &MockServer, fixture: &PokeApiFixture<'_>) {
    let abilities: Vec<_> = fixture
        .abilities
        .iter()
        .map(|name| json!({"ability": {"name": name}}))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/pokemon/{}", fixture.name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "height": fixture.height_dm,
            "weight": fixture.weight_hg,
            "abilities": abilities,
        })))
        .mount(server)
        .await;

    let mut entries = vec![json!({"flavor_text": "Texte", "language": {"name": "fr"}})];
    if let Some(text) = fixture.english_text {
        entries.push(json!({"flavor_text": text, "language": {"name": "en"}}));
    }
    Mock::given(method("GET"))
        .and(path(format!("/pokemon-species/{}", fixture.name)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"flavor_text_entries": entries})),
        )
        .mount(server)
        .await;
}
