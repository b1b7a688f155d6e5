// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;
use std::time::Duration;

use merge::Merge;
use rocrate_uploader_core::*;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Merge, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CLIConfig {
    /// Where zipped crates are written
    #[merge(strategy = merge_recursive)]
    pub archive: Option<ArchiveConfigModel>,

    /// Zenodo connection and upload settings
    #[merge(strategy = merge_recursive)]
    pub zenodo: Option<ZenodoConfigModel>,
}

impl CLIConfig {
    pub fn new() -> Self {
        Self {
            archive: None,
            zenodo: None,
        }
    }
}

impl CLIConfig {
    /// Copy that is safe to write into logs
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if let Some(zenodo) = &mut config.zenodo
            && zenodo.access_token.is_some()
        {
            zenodo.access_token = Some("***".to_string());
        }
        config
    }
}

impl Default for CLIConfig {
    fn default() -> Self {
        Self {
            archive: Some(ArchiveConfigModel::default()),
            zenodo: Some(ZenodoConfigModel::default()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Merge, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ArchiveConfigModel {
    /// Fixed path of the produced archive. When not set the archive goes
    /// into the system temp directory, unless `placeNextToCrate` is enabled.
    pub zip_output_path: Option<PathBuf>,

    /// Write `<crate>.zip` next to the crate directory
    pub place_next_to_crate: Option<bool>,
}

impl ArchiveConfigModel {
    pub fn new() -> Self {
        Self {
            zip_output_path: None,
            place_next_to_crate: None,
        }
    }

    pub fn to_archive_config(&self) -> ArchiveConfig {
        ArchiveConfig::new(
            self.zip_output_path.clone(),
            self.place_next_to_crate.unwrap_or_default(),
        )
    }
}

impl Default for ArchiveConfigModel {
    fn default() -> Self {
        Self {
            zip_output_path: None,
            place_next_to_crate: Some(false),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Merge, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ZenodoConfigModel {
    /// Key under which the deposition ID is cached between runs
    pub cache_key: Option<String>,

    /// Target the Zenodo sandbox instead of the production instance
    pub sandbox: Option<bool>,

    /// Publish the deposition after uploading
    pub publish: Option<bool>,

    /// What to do when a deposition is already cached for the key
    pub on_existing: Option<ExistingDepositionPolicy>,

    pub sandbox_url: Option<Url>,

    pub production_url: Option<Url>,

    /// Personal access token. Falls back to `ZENODO_SANDBOX_API_TOKEN` or
    /// `ZENODO_API_TOKEN` environment variables.
    pub access_token: Option<String>,

    /// Timeout of a single API request in seconds
    pub request_timeout: Option<u64>,

    /// Root directory of the deposition ID cache
    pub cache_dir: Option<PathBuf>,
}

impl ZenodoConfigModel {
    pub fn new() -> Self {
        Self {
            cache_key: None,
            sandbox: None,
            publish: None,
            on_existing: None,
            sandbox_url: None,
            production_url: None,
            access_token: None,
            request_timeout: None,
            cache_dir: None,
        }
    }

    pub fn to_upload_config(&self) -> ZenodoUploadConfig {
        let defaults = ZenodoUploadConfig::default();

        ZenodoUploadConfig {
            cache_key: self.cache_key.clone().unwrap_or(defaults.cache_key),
            sandbox: self.sandbox.unwrap_or(defaults.sandbox),
            publish: self.publish.unwrap_or(defaults.publish),
            on_existing: self.on_existing.unwrap_or(defaults.on_existing),
        }
    }

    pub fn to_client_config(&self) -> ZenodoClientConfig {
        let mut config = ZenodoClientConfig::with_defaults(
            self.cache_dir.clone().unwrap_or_else(default_cache_dir),
        );

        if let Some(url) = &self.sandbox_url {
            config.sandbox_url = url.clone();
        }
        if let Some(url) = &self.production_url {
            config.production_url = url.clone();
        }
        if let Some(secs) = self.request_timeout {
            config.request_timeout = Duration::from_secs(secs);
        }
        config.access_token = self
            .access_token
            .as_ref()
            .map(|t| SecretString::from(t.clone()));

        config
    }
}

impl Default for ZenodoConfigModel {
    fn default() -> Self {
        let client_defaults = ZenodoClientConfig::with_defaults(default_cache_dir());
        let upload_defaults = ZenodoUploadConfig::default();

        Self {
            cache_key: Some(upload_defaults.cache_key),
            sandbox: Some(upload_defaults.sandbox),
            publish: Some(upload_defaults.publish),
            on_existing: Some(upload_defaults.on_existing),
            sandbox_url: Some(client_defaults.sandbox_url),
            production_url: Some(client_defaults.production_url),
            access_token: None,
            request_timeout: Some(client_defaults.request_timeout.as_secs()),
            cache_dir: Some(client_defaults.cache_dir),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(std::env::temp_dir)
}

fn merge_recursive<T: Merge>(left: &mut Option<T>, right: Option<T>) {
    let Some(right) = right else {
        return;
    };

    match left {
        Some(left) => left.merge(right),
        None => *left = Some(right),
    }
}
