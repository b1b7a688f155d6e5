// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Loads a crate, converts its metadata, zips it and uploads it to Zenodo
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait UploadCrateUseCase: Send + Sync {
    async fn execute(
        &self,
        crate_path: &Path,
        options: UploadCrateOptions,
    ) -> Result<UploadCrateResult, UploadCrateError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadCrateOptions {
    /// Prepare metadata and archive but skip the upload
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct UploadCrateResult {
    pub metadata: ZenodoMetadata,
    pub crate_zip_path: PathBuf,
    /// Deposition as returned by Zenodo, absent on dry runs
    pub deposition: Option<serde_json::Value>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UploadCrateError {
    #[error(transparent)]
    Load(#[from] LoadCrateError),

    #[error(transparent)]
    Metadata(#[from] BuildZenodoMetadataError),

    #[error(transparent)]
    Archive(#[from] ArchiveCrateError),

    #[error(transparent)]
    Upload(#[from] ZenodoClientError),
}
