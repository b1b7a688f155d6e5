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

use rocrate_uploader_core::{CrateArchiver, RoCrateLoader};

use super::{CLIError, Command};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn Command)]
pub struct ZipCommand {
    ro_crate_loader: Arc<dyn RoCrateLoader>,
    crate_archiver: Arc<dyn CrateArchiver>,

    #[dill::component(explicit)]
    crate_path: PathBuf,
}

#[async_trait::async_trait(?Send)]
impl Command for ZipCommand {
    async fn run(&self) -> Result<(), CLIError> {
        let ro_crate = self.ro_crate_loader.load(&self.crate_path).await?;
        let crate_zip_path = self.crate_archiver.ensure_crate_zipped(&ro_crate).await?;

        println!("{}", crate_zip_path.display());
        Ok(())
    }
}
