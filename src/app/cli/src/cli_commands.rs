// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::*;

use crate::cli;
use crate::commands::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn get_command(args: cli::Cli) -> Box<dyn TypedBuilder<dyn Command>> {
    match args.command {
        cli::Command::Completions(c) => Box::new(CompletionsCommand::builder(c.shell).cast()),

        cli::Command::Metadata(c) => {
            Box::new(MetadataCommand::builder(c.crate_path, c.output_format).cast())
        }

        cli::Command::Prepare(c) => Box::new(PrepareCommand::builder(c.crate_path).cast()),

        cli::Command::Upload(c) => {
            Box::new(UploadCommand::builder(c.crate_path, c.dry_run).cast())
        }

        cli::Command::Zip(c) => Box::new(ZipCommand::builder(c.crate_path).cast()),
    }
}
