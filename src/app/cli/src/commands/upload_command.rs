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

use internal_error::*;
use rocrate_uploader_core::*;

use super::{CLIError, Command};
use crate::{MetadataOutputFormat, OutputConfig, UploadProgress, render_metadata};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn Command)]
pub struct UploadCommand {
    upload_crate_use_case: Arc<dyn UploadCrateUseCase>,
    upload_config: Arc<ZenodoUploadConfig>,
    output_config: Arc<OutputConfig>,

    #[dill::component(explicit)]
    crate_path: PathBuf,

    #[dill::component(explicit)]
    dry_run: bool,
}

impl UploadCommand {
    fn progress_message(&self) -> String {
        let env = ZenodoEnvironment::from_sandbox_flag(self.upload_config.sandbox);
        if self.dry_run {
            format!("Preparing {}", self.crate_path.display())
        } else {
            format!("Uploading {} to Zenodo {env}", self.crate_path.display())
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Command for UploadCommand {
    async fn run(&self) -> Result<(), CLIError> {
        let progress = UploadProgress::new(&self.output_config, &self.progress_message());

        let result = match self
            .upload_crate_use_case
            .execute(
                &self.crate_path,
                UploadCrateOptions {
                    dry_run: self.dry_run,
                },
            )
            .await
        {
            Ok(result) => result,
            Err(err) => {
                progress.error("Upload failed");
                return Err(err.into());
            }
        };

        match &result.deposition {
            Some(deposition) => {
                let html_url = deposition
                    .pointer("/links/html")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                progress.success(&format!("Uploaded {html_url}"));

                println!("{}", serde_json::to_string_pretty(deposition).int_err()?);
            }
            None => {
                progress.success("Dry run, nothing was uploaded");

                println!("{}", result.crate_zip_path.display());
                println!(
                    "{}",
                    render_metadata(&result.metadata, MetadataOutputFormat::Json)?
                );
            }
        }

        Ok(())
    }
}
