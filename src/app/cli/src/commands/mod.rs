// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod completions_command;
mod metadata_command;
mod prepare_command;
mod upload_command;
mod zip_command;

pub use completions_command::*;
pub use metadata_command::*;
pub use prepare_command::*;
pub use upload_command::*;
pub use zip_command::*;

pub use crate::error::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait(?Send)]
pub trait Command: Send + Sync {
    /// Will be called before running to perform various argument sanity
    /// checks
    async fn validate_args(&self) -> Result<(), CLIError> {
        Ok(())
    }

    async fn run(&self) -> Result<(), CLIError>;
}
