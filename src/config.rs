use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::emit::Provenance;
use crate::error::ScreenError;
use crate::screen::DuplicateScreens;

pub const DEFAULT_CONFIG_FILE: &str = "flyrnai-screens.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub screen_details: Option<String>,
    #[serde(default)]
    pub hits: Option<String>,
    #[serde(default)]
    pub gene_identifiers: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub data_set: Option<String>,
    #[serde(default)]
    pub reject_duplicate_screens: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub screen_details: Option<String>,
    pub hits: Option<String>,
    pub gene_identifiers: Option<String>,
    pub output: Option<String>,
    pub data_source: Option<String>,
    pub data_set: Option<String>,
    pub reject_duplicate_screens: bool,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub screen_details: Utf8PathBuf,
    pub hits: Utf8PathBuf,
    pub gene_identifiers: Utf8PathBuf,
    pub output: Utf8PathBuf,
    pub provenance: Provenance,
    pub duplicate_screens: DuplicateScreens,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(
        path: Option<&str>,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, ScreenError> {
        let config = Self::load(path)?;
        Self::resolve_config(config, overrides)
    }

    pub fn load(path: Option<&str>) -> Result<Config, ScreenError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| ScreenError::ConfigRead(config_path.clone()))?;
        serde_json::from_str(&content).map_err(|err| ScreenError::ConfigParse(err.to_string()))
    }

    pub fn resolve_config(
        config: Config,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, ScreenError> {
        let schema_version = config.schema_version.unwrap_or(1);
        let required = |value: Option<String>, key: &str| {
            value
                .filter(|value| !value.trim().is_empty())
                .map(Utf8PathBuf::from)
                .ok_or_else(|| ScreenError::MissingInput(key.to_string()))
        };

        let defaults = Provenance::default();
        let provenance = Provenance {
            data_source: overrides
                .data_source
                .or(config.data_source)
                .unwrap_or(defaults.data_source),
            data_set: overrides
                .data_set
                .or(config.data_set)
                .unwrap_or(defaults.data_set),
        };
        let duplicate_screens =
            if overrides.reject_duplicate_screens || config.reject_duplicate_screens {
                DuplicateScreens::Reject
            } else {
                DuplicateScreens::LastWins
            };

        Ok(ResolvedConfig {
            schema_version,
            screen_details: required(
                overrides.screen_details.or(config.screen_details),
                "screen_details",
            )?,
            hits: required(overrides.hits.or(config.hits), "hits")?,
            gene_identifiers: required(
                overrides.gene_identifiers.or(config.gene_identifiers),
                "gene_identifiers",
            )?,
            output: required(overrides.output.or(config.output), "output")?,
            provenance,
            duplicate_screens,
        })
    }
}
