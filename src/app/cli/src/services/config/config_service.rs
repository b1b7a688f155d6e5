// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use internal_error::*;
use merge::Merge;

use super::models::*;
use crate::error::CLIError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const CONFIG_FILENAME: &str = ".rocrate-uploader.yaml";
pub const CONFIG_PATH_ENV_VAR: &str = "ROCRATE_UPLOADER_CONFIG";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Locates and reads the YAML config file
pub struct ConfigService {
    config_path: PathBuf,
    is_explicit: bool,
}

impl ConfigService {
    /// Uses `explicit_path` when given, otherwise looks for
    /// [`CONFIG_FILENAME`] in `current_dir`
    pub fn new(explicit_path: Option<PathBuf>, current_dir: &Path) -> Self {
        match explicit_path {
            Some(config_path) => Self {
                config_path,
                is_explicit: true,
            },
            None => Self {
                config_path: current_dir.join(CONFIG_FILENAME),
                is_explicit: false,
            },
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the config as written by the user, without defaults
    pub fn load(&self) -> Result<CLIConfig, CLIError> {
        if !self.config_path.exists() {
            if self.is_explicit {
                return Err(CLIError::usage_error(format!(
                    "Config file {} does not exist",
                    self.config_path.display()
                )));
            }
            return Ok(CLIConfig::new());
        }

        let contents = std::fs::read_to_string(&self.config_path).context_int_err(format!(
            "Failed to read config file {}",
            self.config_path.display()
        ))?;

        Self::parse(&contents).map_err(|e| {
            CLIError::usage_error(format!(
                "Invalid config file {}: {e}",
                self.config_path.display()
            ))
        })
    }

    /// Reads the config and fills all unset values with defaults
    pub fn load_with_defaults(&self) -> Result<CLIConfig, CLIError> {
        let mut config = self.load()?;
        config.merge(CLIConfig::default());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<CLIConfig, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(CLIConfig::new());
        }
        serde_yaml::from_str(contents)
    }
}
