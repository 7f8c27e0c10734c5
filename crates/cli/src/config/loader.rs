// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use anyhow::{Result, anyhow};
use policy_model::config::{FilterOptions, GenerationConfig};
use serde::Deserialize;
use tracing::debug;

use crate::config::model::Config;

const DEFAULT_CONFIG_FILE: &str = "policygen.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigSer {
    pub generate: Option<GenerateSer>,
}

#[derive(Deserialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct GenerateSer {
    pub use_type_imports: Option<bool>,
    pub require_key_fields: Option<bool>,
    pub require_policies_for_all_types: Option<bool>,
    pub require_policies_for_fields_without_id: Option<FilterOptions>,
}

impl From<ConfigSer> for Config {
    fn from(config: ConfigSer) -> Self {
        Config {
            generate: config.generate.map(GenerationConfig::from).unwrap_or_default(),
        }
    }
}

impl From<GenerateSer> for GenerationConfig {
    fn from(config: GenerateSer) -> Self {
        GenerationConfig {
            use_type_imports: config.use_type_imports.unwrap_or_default(),
            require_key_fields: config.require_key_fields.unwrap_or_default(),
            require_policies_for_all_types: config
                .require_policies_for_all_types
                .unwrap_or_default(),
            require_policies_for_fields_without_id: config
                .require_policies_for_fields_without_id
                .unwrap_or_default(),
        }
    }
}

fn load_config_from_file(path: &Path) -> Result<Config> {
    let toml_str = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read file '{}': {}", path.display(), e))?;
    let config: ConfigSer = toml::from_str(&toml_str)
        .map_err(|e| anyhow!("Failed to parse TOML file '{}': {}", path.display(), e))?;

    Ok(config.into())
}

/// Load the given configuration file, or `policygen.toml` from the current directory if it
/// exists. Without either, the defaults apply.
pub fn load_config(explicit_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit_path {
        return load_config_from_file(path);
    }

    let config_path = Path::new(DEFAULT_CONFIG_FILE);

    if !config_path.exists() {
        debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
        return Ok(Config::default());
    }

    load_config_from_file(config_path)
}
