// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;
use std::sync::Arc;

use dill::*;
use internal_error::{ErrorIntoInternal, InternalError, ResultIntoInternal};
use rocrate_uploader_core::*;
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const CACHE_APP_DIR: &str = "rocrate-uploader";

/// Keeps one small JSON file per upload key:
///
/// ```text
/// <cache_dir>/rocrate-uploader/zenodo/<environment>/<key>.json
/// ```
pub struct DepositionIdCacheLocalFs {
    config: Arc<ZenodoClientConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    key: String,
    deposition_id: u64,
}

#[component(pub)]
#[interface(dyn DepositionIdCache)]
impl DepositionIdCacheLocalFs {
    pub fn new(config: Arc<ZenodoClientConfig>) -> Self {
        Self { config }
    }

    pub fn entry_path(&self, env: ZenodoEnvironment, key: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(CACHE_APP_DIR)
            .join("zenodo")
            .join(env.as_str())
            .join(format!("{}.json", Self::sanitize_key(key)))
    }

    fn sanitize_key(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl DepositionIdCache for DepositionIdCacheLocalFs {
    async fn get_deposition_id(
        &self,
        env: ZenodoEnvironment,
        key: &str,
    ) -> Result<Option<u64>, InternalError> {
        let path = self.entry_path(env, key);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.int_err()),
        };

        let entry: CacheEntry = serde_json::from_slice(&bytes)
            .context_int_err(format!("corrupted cache entry {}", path.display()))?;

        // Sanitized keys may collide
        if entry.key != key {
            tracing::warn!(
                path = %path.display(),
                cached_key = %entry.key,
                key,
                "Cache entry belongs to a different key, ignoring"
            );
            return Ok(None);
        }

        Ok(Some(entry.deposition_id))
    }

    async fn set_deposition_id(
        &self,
        env: ZenodoEnvironment,
        key: &str,
        deposition_id: u64,
    ) -> Result<(), InternalError> {
        let path = self.entry_path(env, key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.int_err()?;
        }

        let entry = CacheEntry {
            key: key.to_string(),
            deposition_id,
        };
        tokio::fs::write(&path, serde_json::to_vec_pretty(&entry).int_err()?)
            .await
            .int_err()?;

        tracing::debug!(path = %path.display(), deposition_id, "Cached deposition id");

        Ok(())
    }
}
