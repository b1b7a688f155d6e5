// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use crate::{ZenodoClientError, ZenodoMetadata};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait ZenodoUploader: Send + Sync {
    /// Uploads a zipped crate and its metadata to Zenodo.
    ///
    /// Whether this targets the sandbox and whether the record gets published
    /// is decided by configuration, the default being sandbox.
    async fn upload_crate_to_zenodo(
        &self,
        crate_zip_path: &Path,
        metadata: &ZenodoMetadata,
    ) -> Result<serde_json::Value, ZenodoClientError>;
}
