// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;
use std::sync::Arc;

use dill::*;
use rocrate_uploader_core::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ZenodoUploaderImpl {
    zenodo_client: Arc<dyn ZenodoClient>,
    upload_config: Arc<ZenodoUploadConfig>,
}

#[component(pub)]
#[interface(dyn ZenodoUploader)]
impl ZenodoUploaderImpl {
    pub fn new(zenodo_client: Arc<dyn ZenodoClient>, upload_config: Arc<ZenodoUploadConfig>) -> Self {
        Self {
            zenodo_client,
            upload_config,
        }
    }
}

#[async_trait::async_trait]
impl ZenodoUploader for ZenodoUploaderImpl {
    #[tracing::instrument(level = "info", skip_all, fields(crate_zip_path = %crate_zip_path.display()))]
    async fn upload_crate_to_zenodo(
        &self,
        crate_zip_path: &Path,
        metadata: &ZenodoMetadata,
    ) -> Result<serde_json::Value, ZenodoClientError> {
        self.zenodo_client
            .ensure_deposition(
                &self.upload_config.cache_key,
                metadata,
                &[crate_zip_path.to_path_buf()],
                self.upload_config.sandbox,
            )
            .await
    }
}
