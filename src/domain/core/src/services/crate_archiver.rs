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

use crate::RoCrate;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait CrateArchiver: Send + Sync {
    /// Returns a path to a zip archive holding the crate's contents, creating
    /// the archive if the crate is not zipped already
    async fn ensure_crate_zipped(&self, ro_crate: &RoCrate) -> Result<PathBuf, ArchiveCrateError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ArchiveCrateError {
    #[error("Crate contents not found at {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error(transparent)]
    Internal(#[from] InternalError),
}
