#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Loading persisted catalog documents from disk.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use towerstats::catalog::{Catalog, CatalogSource, FileSource};
use towerstats::runtime_config::ServiceConfig;
use towerstats::CatalogError;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("loader_test_{}_{}", std::process::id(), nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_json_and_yaml_documents_load_the_same_catalog() {
    let json = FileSource::new(fixture("mini_catalog.json")).load().unwrap();
    let yaml = FileSource::new(fixture("mini_catalog.yaml")).load().unwrap();
    assert_eq!(json, yaml);

    let catalog = Catalog::from_document(&json).unwrap();
    assert_eq!(catalog.tower_count(), 3);
    assert_eq!(catalog.hero_count(), 2);
}

#[test]
fn test_missing_stats_take_defaults() {
    let catalog = Catalog::load(&FileSource::new(fixture("mini_catalog.json"))).unwrap();
    let sniper = catalog.get_tower("sniper_monkey").unwrap();
    assert_eq!(sniper.base_stats.pierce, 1);
    assert_eq!(sniper.base_stats.attack_speed, 1.0);
    assert!(sniper.base_stats.lead_popping);
    assert!(!sniper.base_stats.frozen_popping);
    assert!(sniper.upgrades.is_empty());
    assert_eq!(sniper.hotkey, None);

    let dart = catalog.get_tower("dart_monkey").unwrap();
    assert!(dart.base_stats.frozen_popping);
    assert_eq!(dart.base_stats.projectile_speed, Some(100));
}

#[test]
fn test_unknown_stat_keys_become_extra_stats() {
    let catalog = Catalog::load(&FileSource::new(fixture("mini_catalog.yaml"))).unwrap();
    let farm = catalog.get_tower("banana_farm").unwrap();
    assert_eq!(farm.base_stats.extra.get("money_per_round"), Some(&80.0));
    assert_eq!(farm.base_stats.extra.get("bananas_per_round"), Some(&4.0));
    assert_eq!(farm.base_stats.range, 0);
}

#[test]
fn test_ids_are_derived_from_names() {
    let catalog = Catalog::load(&FileSource::new(fixture("mini_catalog.json"))).unwrap();
    let obyn = catalog.get_hero("obyn_greenfoot").unwrap();
    assert_eq!(obyn.name, "Obyn Greenfoot");
    assert!(obyn.level_requirements.is_empty());
}

#[test]
fn test_missing_file_is_io_error_naming_path() {
    let path = temp_dir().join("absent.json");
    let err = Catalog::load(&FileSource::new(&path)).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_malformed_document_is_parse_error() {
    let path = temp_dir().join("broken.json");
    fs::write(&path, r#"{"towers": [{"name": "Dart Monkey""#).unwrap();
    let err = Catalog::load(&FileSource::new(&path)).unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_unknown_category_is_rejected() {
    let text = fs::read_to_string(fixture("mini_catalog.json"))
        .unwrap()
        .replace("\"Military\"", "\"Naval\"");
    let path = temp_dir().join("naval.json");
    fs::write(&path, text).unwrap();
    let err = Catalog::load(&FileSource::new(&path)).unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[test]
fn test_duplicate_ids_reject_the_whole_load() {
    let text = fs::read_to_string(fixture("mini_catalog.yaml"))
        .unwrap()
        .replace("name: Sniper Monkey", "name: Dart-Monkey");
    let path = temp_dir().join("dupes.yaml");
    fs::write(&path, text).unwrap();
    let err = Catalog::load(&FileSource::new(&path)).unwrap_err();
    match err {
        CatalogError::Validation { record, message } => {
            assert_eq!(record, "dart_monkey");
            assert_eq!(message, "duplicate tower id");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn test_service_config_loads_existing_file() {
    let config = ServiceConfig::default().with_data(Some(fixture("mini_catalog.yaml")));
    let catalog = Catalog::load(config.source().as_ref()).unwrap();
    assert_eq!(catalog.tower_count(), 3);
}

#[test]
fn test_service_config_missing_named_file_is_io_error() {
    let config = ServiceConfig::default().with_data(Some(temp_dir().join("missing.json")));
    let err = Catalog::load(config.source().as_ref()).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("missing.json"));
}
