// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use internal_error::{BoxedError, InternalError};
use thiserror::Error;

use crate::RoCrate;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait RoCrateLoader: Send + Sync {
    /// Loads a crate from a directory or a zip archive
    async fn load(&self, path: &Path) -> Result<RoCrate, LoadCrateError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum LoadCrateError {
    #[error("Crate not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("No RO-Crate metadata file found in {}", .path.display())]
    NotACrate { path: PathBuf },

    #[error("Invalid RO-Crate metadata in {}: {source}", .path.display())]
    InvalidMetadata {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl LoadCrateError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn not_a_crate(path: impl Into<PathBuf>) -> Self {
        Self::NotACrate { path: path.into() }
    }

    pub fn invalid_metadata(
        path: impl Into<PathBuf>,
        e: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InvalidMetadata {
            path: path.into(),
            source: e.into(),
        }
    }
}
