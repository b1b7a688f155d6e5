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

use dill::{component, interface};
use rocrate_uploader_core::{
    CrateArchiver,
    RoCrateLoader,
    UploadCrateError,
    UploadCrateOptions,
    UploadCrateResult,
    UploadCrateUseCase,
    ZenodoUploader,
    build_zenodo_metadata_from_crate,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct UploadCrateUseCaseImpl {
    ro_crate_loader: Arc<dyn RoCrateLoader>,
    crate_archiver: Arc<dyn CrateArchiver>,
    zenodo_uploader: Arc<dyn ZenodoUploader>,
}

#[component(pub)]
#[interface(dyn UploadCrateUseCase)]
impl UploadCrateUseCaseImpl {
    pub fn new(
        ro_crate_loader: Arc<dyn RoCrateLoader>,
        crate_archiver: Arc<dyn CrateArchiver>,
        zenodo_uploader: Arc<dyn ZenodoUploader>,
    ) -> Self {
        Self {
            ro_crate_loader,
            crate_archiver,
            zenodo_uploader,
        }
    }
}

#[async_trait::async_trait]
impl UploadCrateUseCase for UploadCrateUseCaseImpl {
    #[tracing::instrument(level = "info", skip_all, fields(crate_path = %crate_path.display(), ?options))]
    async fn execute(
        &self,
        crate_path: &Path,
        options: UploadCrateOptions,
    ) -> Result<UploadCrateResult, UploadCrateError> {
        let ro_crate = self.ro_crate_loader.load(crate_path).await?;

        let metadata = build_zenodo_metadata_from_crate(&ro_crate)?;
        tracing::info!(
            title = metadata.title(),
            num_creators = metadata.creators().len(),
            "Built Zenodo metadata"
        );

        let crate_zip_path = self.crate_archiver.ensure_crate_zipped(&ro_crate).await?;

        if options.dry_run {
            tracing::info!("Dry run, skipping upload");
            return Ok(UploadCrateResult {
                metadata,
                crate_zip_path,
                deposition: None,
            });
        }

        let deposition = self
            .zenodo_uploader
            .upload_crate_to_zenodo(&crate_zip_path, &metadata)
            .await?;

        Ok(UploadCrateResult {
            metadata,
            crate_zip_path,
            deposition: Some(deposition),
        })
    }
}
