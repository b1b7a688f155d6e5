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

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ZenodoEnvironment;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_CACHE_KEY: &str = "ro-crate-uploader";
pub const DEFAULT_SANDBOX_URL: &str = "https://sandbox.zenodo.org";
pub const DEFAULT_PRODUCTION_URL: &str = "https://zenodo.org";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// What to do when the cache already holds a deposition for the upload key
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExistingDepositionPolicy {
    /// Update the draft in place, or open a new version of a published record
    #[default]
    NewVersion,
    /// Disregard the cached deposition and create an unrelated one
    NewDeposition,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Parameters of a crate upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZenodoUploadConfig {
    pub cache_key: String,
    pub sandbox: bool,
    pub publish: bool,
    pub on_existing: ExistingDepositionPolicy,
}

impl Default for ZenodoUploadConfig {
    fn default() -> Self {
        Self {
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            sandbox: true,
            publish: true,
            on_existing: ExistingDepositionPolicy::default(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Connection settings of the Zenodo client
#[derive(Debug, Clone)]
pub struct ZenodoClientConfig {
    pub sandbox_url: Url,
    pub production_url: Url,
    /// When absent the token is read from the environment, see
    /// [`ZenodoEnvironment::token_env_var`]
    pub access_token: Option<SecretString>,
    /// Whether the environment is consulted when `access_token` is absent
    pub token_from_env: bool,
    pub request_timeout: Duration,
    /// Root of the deposition ID cache
    pub cache_dir: PathBuf,
}

impl ZenodoClientConfig {
    pub fn base_url(&self, env: ZenodoEnvironment) -> &Url {
        match env {
            ZenodoEnvironment::Sandbox => &self.sandbox_url,
            ZenodoEnvironment::Production => &self.production_url,
        }
    }

    pub fn with_defaults(cache_dir: PathBuf) -> Self {
        Self {
            sandbox_url: Url::parse(DEFAULT_SANDBOX_URL).unwrap(),
            production_url: Url::parse(DEFAULT_PRODUCTION_URL).unwrap(),
            access_token: None,
            token_from_env: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_dir,
        }
    }
}
