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

use rocrate_uploader_core::{UploadCrateOptions, UploadCrateUseCase};

use super::{CLIError, Command};
use crate::{MetadataOutputFormat, render_metadata};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Runs everything up to the upload and prints the archive path followed by
/// the metadata
#[dill::component]
#[dill::interface(dyn Command)]
pub struct PrepareCommand {
    upload_crate_use_case: Arc<dyn UploadCrateUseCase>,

    #[dill::component(explicit)]
    crate_path: PathBuf,
}

#[async_trait::async_trait(?Send)]
impl Command for PrepareCommand {
    async fn run(&self) -> Result<(), CLIError> {
        let result = self
            .upload_crate_use_case
            .execute(&self.crate_path, UploadCrateOptions { dry_run: true })
            .await?;

        println!("{}", result.crate_zip_path.display());
        println!(
            "{}",
            render_metadata(&result.metadata, MetadataOutputFormat::Json)?
        );
        Ok(())
    }
}
