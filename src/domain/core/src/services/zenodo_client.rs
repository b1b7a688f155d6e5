// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use internal_error::InternalError;
use thiserror::Error;

use crate::ZenodoMetadata;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Client of the Zenodo deposit API
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait ZenodoClient: Send + Sync {
    /// Makes sure a deposition associated with `key` holds the given metadata
    /// and files.
    ///
    /// The deposition identifier is remembered in a local cache under `key`,
    /// so that repeated calls update the same record instead of creating
    /// unrelated ones. Returns the deposition as reported by Zenodo.
    async fn ensure_deposition(
        &self,
        key: &str,
        metadata: &ZenodoMetadata,
        paths: &[PathBuf],
        sandbox: bool,
    ) -> Result<serde_json::Value, ZenodoClientError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ZenodoClientError {
    #[error(
        "Zenodo access token is not configured, set it in the config file or via the {env_var} \
         environment variable"
    )]
    MissingToken { env_var: &'static str },

    #[error("Zenodo rejected the access token (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("Zenodo API request to {url} failed with HTTP {status}: {body}")]
    Api {
        status: u16,
        url: String,
        body: String,
    },

    #[error("File to upload not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Internal(#[from] InternalError),
}
