use std::fs;

use assert_matches::assert_matches;

use flyrnai_screens::config::{Config, ConfigLoader, ConfigOverrides};
use flyrnai_screens::error::ScreenError;
use flyrnai_screens::screen::DuplicateScreens;

#[test]
fn load_explicit_config_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("flyrnai-screens.json");
    fs::write(
        &path,
        r#"{
            "screen_details": "data/screen_details.tsv",
            "hits": "data/hits.tsv.gz",
            "gene_identifiers": "data/genes.tsv",
            "output": "out/items.jsonl",
            "data_source": "DRSC",
            "data_set": "DRSC RNAi screens",
            "reject_duplicate_screens": true
        }"#,
    )
    .unwrap();

    let resolved =
        ConfigLoader::resolve(path.to_str(), ConfigOverrides::default()).unwrap();
    assert_eq!(resolved.schema_version, 1);
    assert_eq!(resolved.hits.as_str(), "data/hits.tsv.gz");
    assert_eq!(resolved.output.as_str(), "out/items.jsonl");
    assert_eq!(resolved.provenance.data_source, "DRSC");
    assert_eq!(resolved.provenance.data_set, "DRSC RNAi screens");
    assert_eq!(resolved.duplicate_screens, DuplicateScreens::Reject);
}

#[test]
fn explicit_config_must_exist() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("absent.json");
    let err = ConfigLoader::load(path.to_str()).unwrap_err();
    assert_matches!(err, ScreenError::ConfigRead(_));
}

#[test]
fn invalid_json_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ \"hits\": ").unwrap();
    let err = ConfigLoader::load(path.to_str()).unwrap_err();
    assert_matches!(err, ScreenError::ConfigParse(_));
}

#[test]
fn every_input_path_is_required() {
    let overrides = ConfigOverrides {
        screen_details: Some("details.tsv".to_string()),
        gene_identifiers: Some("genes.tsv".to_string()),
        output: Some("items.jsonl".to_string()),
        ..ConfigOverrides::default()
    };
    let err = ConfigLoader::resolve_config(Config::default(), overrides).unwrap_err();
    assert_matches!(err, ScreenError::MissingInput(key) if key == "hits");
}

#[test]
fn flags_alone_are_enough() {
    let overrides = ConfigOverrides {
        screen_details: Some("details.tsv".to_string()),
        hits: Some("hits.tsv".to_string()),
        gene_identifiers: Some("genes.tsv".to_string()),
        output: Some("items.jsonl".to_string()),
        data_set: Some("DRSC 2011".to_string()),
        reject_duplicate_screens: true,
        ..ConfigOverrides::default()
    };
    let resolved = ConfigLoader::resolve_config(Config::default(), overrides).unwrap();
    assert_eq!(resolved.provenance.data_source, "DRSC");
    assert_eq!(resolved.provenance.data_set, "DRSC 2011");
    assert_eq!(resolved.duplicate_screens, DuplicateScreens::Reject);
}
