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
use rocrate_uploader_core::{RoCrateLoader, ZenodoMetadata, build_zenodo_metadata_from_crate};

use super::{CLIError, Command};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MetadataOutputFormat {
    Json,
    Yaml,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn Command)]
pub struct MetadataCommand {
    ro_crate_loader: Arc<dyn RoCrateLoader>,

    #[dill::component(explicit)]
    crate_path: PathBuf,

    #[dill::component(explicit)]
    output_format: MetadataOutputFormat,
}

#[async_trait::async_trait(?Send)]
impl Command for MetadataCommand {
    async fn run(&self) -> Result<(), CLIError> {
        let ro_crate = self.ro_crate_loader.load(&self.crate_path).await?;
        let metadata = build_zenodo_metadata_from_crate(&ro_crate)?;

        println!("{}", render_metadata(&metadata, self.output_format)?.trim_end());
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn render_metadata(
    metadata: &ZenodoMetadata,
    format: MetadataOutputFormat,
) -> Result<String, InternalError> {
    match format {
        MetadataOutputFormat::Json => serde_json::to_string_pretty(metadata).int_err(),
        MetadataOutputFormat::Yaml => serde_yaml::to_string(metadata).int_err(),
    }
}
