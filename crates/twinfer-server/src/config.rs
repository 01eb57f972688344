use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use twinfer_classifiers::predictor::SchemaCheck;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub random_forest_path: String,
    pub gradient_boosting_path: String,
    pub workers: Option<usize>,
    pub check_feature_schema: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: String::from("0.0.0.0"),
            port: 5000,
            random_forest_path: String::from("best_random_forest_model.json"),
            gradient_boosting_path: String::from("best_gradient_boosting_model.json"),
            workers: None,
            check_feature_schema: true,
        }
    }
}

impl ServerConfig {
    /// Read a JSON config file field by field, keeping defaults for missing or
    /// invalid fields.
    pub fn from_file(config_path: &PathBuf) -> Result<Self> {
        let config_json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let partial: serde_json::Value = serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        let mut config = ServerConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        config.$field = parsed;
                    } else {
                        log::warn!(
                            "Config Invalid value for '{}', using default: {:?}",
                            stringify!($field), config.$field
                        );
                    }
                } else {
                    log::warn!(
                        "Config Missing field '{}', using default: {:?}",
                        stringify!($field), config.$field
                    );
                }
            };
        }

        load_or_default!(host);
        load_or_default!(port);
        load_or_default!(random_forest_path);
        load_or_default!(gradient_boosting_path);
        load_or_default!(workers);
        load_or_default!(check_feature_schema);

        if config.workers == Some(0) {
            log::warn!("Config Invalid value for 'workers', using default: None");
            config.workers = None;
        }

        Ok(config)
    }

    /// Start from the config file (if any) and apply CLI overrides.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(host) = matches.get_one::<String>("host") {
            config.host = host.clone();
        }
        if let Some(port) = matches.get_one::<u16>("port") {
            config.port = *port;
        }
        if let Some(path) = matches.get_one::<String>("random_forest") {
            config.random_forest_path = path.clone();
        }
        if let Some(path) = matches.get_one::<String>("gradient_boosting") {
            config.gradient_boosting_path = path.clone();
        }
        if let Some(workers) = matches.get_one::<usize>("workers") {
            config.workers = Some(*workers);
        }
        if matches.get_flag("no_schema_check") {
            config.check_feature_schema = false;
        }

        Ok(config)
    }

    pub fn schema_check(&self) -> SchemaCheck {
        if self.check_feature_schema {
            SchemaCheck::Strict
        } else {
            SchemaCheck::Unchecked
        }
    }
}
