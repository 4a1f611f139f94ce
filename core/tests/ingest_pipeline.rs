use std::sync::Arc;
use std::time::Duration;

use core_test_support::PokeApiFixture;
use core_test_support::mount_pokeapi;
use core_test_support::write_dataset;
use pokedex_core::Catalog;
use pokedex_core::CatalogConfig;
use pokedex_core::ListParams;
use pokedex_core::enrich::PokeApiClient;
use pokedex_core::model::NO_DATA_DESCRIPTION;
use pokedex_utils_readiness::Readiness;
use pretty_assertions::assert_eq;
use wiremock::MockServer;

fn config(data_path: std::path::PathBuf, server: &MockServer) -> CatalogConfig {
    CatalogConfig {
        data_path,
        asset_base_url: "http://assets.test/images".to_string(),
        pokeapi_base_url: server.uri(),
        enrichment_timeout: Some(Duration::from_secs(5)),
        offline: false,
    }
}

#[tokio::test]
async fn enriched_and_fallback_rows_both_land_in_the_store() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_pokeapi(
        &server,
        &PokeApiFixture {
            name: "bulbasaur",
            height_dm: 7,
            weight_hg: 69,
            abilities: &["overgrow", "chlorophyll"],
            english_text: Some("A strange seed was\nplanted on its\u{000C}back at birth."),
        },
    )
    .await;
    mount_pokeapi(
        &server,
        &PokeApiFixture {
            name: "ditto",
            height_dm: 3,
            weight_hg: 40,
            abilities: &["limber"],
            english_text: None,
        },
    )
    .await;

    let (_dir, path) = write_dataset(&[
        "1,Bulbasaur,Grass,Poison",
        "132,Ditto,Normal,",
        "999,Missingno,Bird,",
    ])?;
    let (catalog, handle) = Catalog::load(&config(path, &server))?;
    let report = handle.await??;
    assert!(catalog.is_ready());
    assert_eq!((report.enriched, report.synthesized), (2, 1));

    let bulbasaur = catalog.store().get(1).expect("bulbasaur");
    assert_eq!(bulbasaur.name, "bulbasaur");
    assert_eq!(bulbasaur.types, vec!["Grass", "Poison"]);
    assert_eq!(bulbasaur.url, "http://assets.test/images/1.png");
    assert_eq!((bulbasaur.height, bulbasaur.weight), (0.7, 6.9));
    assert_eq!(bulbasaur.abilities, vec!["overgrow", "chlorophyll"]);
    assert_eq!(
        bulbasaur.description,
        "A strange seed was planted on its back at birth."
    );
    assert_eq!(bulbasaur.category, "unknown");

    // Lookup succeeded but there is no English text.
    let ditto = catalog.store().get(132).expect("ditto");
    assert_eq!(ditto.abilities, vec!["limber"]);
    assert_eq!(ditto.description, NO_DATA_DESCRIPTION);

    // Lookup failed: synthesized fields, identity fields untouched.
    let missingno = catalog.store().get(999).expect("missingno");
    assert_eq!(missingno.types, vec!["Bird"]);
    assert!(missingno.abilities.is_empty());
    assert_eq!(missingno.description, NO_DATA_DESCRIPTION);
    assert!((0.0..10.0).contains(&missingno.height));
    assert!((0.0..100.0).contains(&missingno.weight));
    Ok(())
}

#[tokio::test]
async fn store_order_follows_enrichment_completion() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    // Only the second row has a working lookup, and it is delayed, so the
    // failing first row settles first.
    let slow = wiremock::ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({"height": 4, "weight": 60, "abilities": []}))
        .set_delay(Duration::from_millis(300));
    wiremock::Mock::given(wiremock::matchers::path("/pokemon/pikachu"))
        .respond_with(slow)
        .mount(&server)
        .await;
    wiremock::Mock::given(wiremock::matchers::path("/pokemon-species/pikachu"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"flavor_text_entries": []})),
        )
        .mount(&server)
        .await;

    let (_dir, path) = write_dataset(&["25,Pikachu,Electric,", "26,Raichu,Electric,"])?;
    let (catalog, handle) = Catalog::load(&config(path, &server))?;
    handle.await??;

    let ids: Vec<u32> = catalog.store().list().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![26, 25]);
    Ok(())
}

#[tokio::test]
async fn requests_see_partial_data_before_readiness() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let slow = wiremock::ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({"height": 4, "weight": 60, "abilities": []}))
        .set_delay(Duration::from_millis(500));
    wiremock::Mock::given(wiremock::matchers::path("/pokemon/pikachu"))
        .respond_with(slow)
        .mount(&server)
        .await;

    let (_dir, path) = write_dataset(&["25,Pikachu,Electric,", "26,Raichu,Electric,"])?;
    let client = PokeApiClient::new(server.uri(), None)?;
    let (catalog, handle) = Catalog::load_with(&config(path, &server), Arc::new(client));

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(!catalog.is_ready());
    let page = catalog.list(&ListParams::default());
    assert_eq!(page.total_pokemons, 1);

    catalog
        .readiness()
        .wait_ready_timeout(Duration::from_secs(5))
        .await?;
    handle.await??;
    assert_eq!(catalog.list(&ListParams::default()).total_pokemons, 2);
    Ok(())
}

#[tokio::test]
async fn unreadable_dataset_still_marks_ready() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let cfg = config("/nonexistent/pokemons.csv".into(), &server);
    let (catalog, handle) = Catalog::load(&cfg)?;
    assert!(handle.await?.is_err());
    assert!(catalog.readiness().is_ready());
    assert!(catalog.store().is_empty());
    Ok(())
}
