//! Integration tests for the catalog backends against on-disk files.

use std::path::PathBuf;

use intake_core::matching::search;
use intake_core::{CatalogConfig, CatalogError, CatalogSource, Station};
use intake_data::{CatalogLoader, default_registry, demo_records};
use pretty_assertions::assert_eq;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("found_items.csv")
}

fn csv_config(location: &str) -> CatalogConfig {
    CatalogConfig {
        backend: "csv".to_string(),
        location: location.to_string(),
    }
}

#[test]
fn test_load_fixture_file() {
    let records = CatalogLoader::load_file(&fixture_path()).expect("fixture should load");

    assert_eq!(records.len(), 4);
    assert_eq!(records[2].location, Station::Tverskaya);
    assert!(records[2].photo_ref.is_empty());
}

#[test]
fn test_fixture_starts_with_the_demo_records() {
    let records = CatalogLoader::load_file(&fixture_path()).unwrap();

    assert_eq!(records[..2], demo_records()[..]);
}

#[tokio::test]
async fn test_registry_knows_both_backends() {
    assert_eq!(default_registry().available_backends(), vec!["builtin", "csv"]);
}

#[tokio::test]
async fn test_csv_backend_reads_fixture() {
    let registry = default_registry();
    let location = fixture_path().display().to_string();

    let source = registry
        .create(&csv_config(&location))
        .await
        .expect("csv backend is registered");
    let records = source.records().await.expect("fixture should load");

    let hits: Vec<_> = search("ключ", &records).iter().map(|r| r.id).collect();
    assert_eq!(hits, vec![4]);
}

#[tokio::test]
async fn test_csv_backend_requires_location() {
    let registry = default_registry();

    match registry.create(&csv_config("  ")).await {
        Err(CatalogError::Configuration(_)) => {}
        Err(other) => panic!("expected Configuration error, got {other:?}"),
        Ok(_) => panic!("expected Configuration error, got a source"),
    }
}

#[tokio::test]
async fn test_missing_csv_file_is_not_found() {
    let registry = default_registry();
    let source = registry
        .create(&csv_config("/definitely/not/here.csv"))
        .await
        .expect("the file is only opened on read");

    assert!(matches!(
        source.records().await,
        Err(CatalogError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_builtin_backend_is_the_demo_catalog() {
    let source = default_registry()
        .create(&CatalogConfig::default())
        .await
        .unwrap();

    assert_eq!(source.records().await.unwrap(), demo_records());
}
