// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use crate::{CONFIG_PATH_ENV_VAR, MetadataOutputFormat};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, clap::Parser)]
#[command(name = crate::BINARY_NAME)]
#[command(version = crate::VERSION)]
#[command(about = "Publish RO-Crates to Zenodo")]
#[command(after_help = r#"
To get help for individual commands use:
  rocrate-uploader <command> -h
  rocrate-uploader <command> <sub-command> -h

Zenodo access tokens are read from the config file or from the ZENODO_SANDBOX_API_TOKEN and ZENODO_API_TOKEN environment variables.
"#)]
pub struct Cli {
    /// Sets the level of verbosity (repeat for more)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Path to the config file
    #[arg(long, value_name = "PATH", env = CONFIG_PATH_ENV_VAR)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    Completions(Completions),
    Metadata(Metadata),
    Prepare(Prepare),
    Upload(Upload),
    Zip(Zip),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Generate tab-completion scripts for your shell
#[derive(Debug, clap::Args)]
#[command(after_help = r#"
The command outputs to STDOUT, allowing you to re-direct the output to the file of your choosing. Where you place the file will depend on which shell and which operating system you are using. Your particular configuration may also determine where these scripts need to be placed.

Here are some common set ups:

**Bash:**

Append the following to your `~/.bashrc`:

    source <(rocrate-uploader completions bash)

**Zsh:**

Append the following to your `~/.zshrc`:

    source <(rocrate-uploader completions zsh)
"#)]
pub struct Completions {
    #[arg(index = 1)]
    pub shell: clap_complete::Shell,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Print the Zenodo metadata derived from a crate
#[derive(Debug, clap::Args)]
pub struct Metadata {
    /// Crate directory, its metadata file, or a zipped crate
    #[arg(index = 1, value_name = "CRATE")]
    pub crate_path: PathBuf,

    /// Format of the output
    #[arg(long, short = 'o', value_name = "FMT", value_enum, default_value_t = MetadataOutputFormat::Json)]
    pub output_format: MetadataOutputFormat,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Build the metadata and the archive of a crate without uploading anything
#[derive(Debug, clap::Args)]
pub struct Prepare {
    /// Crate directory, its metadata file, or a zipped crate
    #[arg(index = 1, value_name = "CRATE")]
    pub crate_path: PathBuf,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Upload a crate to Zenodo
#[derive(Debug, clap::Args)]
#[command(after_help = r#"
Repeated uploads of crates with the same cache key update the same Zenodo record. Published records receive a new version, drafts are updated in place.

**Examples:**

Upload a crate to the Zenodo sandbox and publish it:

    rocrate-uploader upload ./my_crate

Create a draft on the production instance:

    rocrate-uploader upload ./my_crate --production --no-publish
"#)]
pub struct Upload {
    /// Crate directory, its metadata file, or a zipped crate
    #[arg(index = 1, value_name = "CRATE")]
    pub crate_path: PathBuf,

    /// Target the production Zenodo instance instead of the sandbox
    #[arg(long)]
    pub production: bool,

    /// Key under which the deposition ID is remembered between runs
    #[arg(long, value_name = "KEY")]
    pub cache_key: Option<String>,

    /// Leave the deposition as an unpublished draft
    #[arg(long)]
    pub no_publish: bool,

    /// Build the metadata and the archive but skip the upload
    #[arg(long)]
    pub dry_run: bool,

    /// Create a new deposition even if one is cached for the key
    #[arg(long)]
    pub new_deposition: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Zip a crate directory
#[derive(Debug, clap::Args)]
pub struct Zip {
    /// Crate directory, its metadata file, or a zipped crate
    #[arg(index = 1, value_name = "CRATE")]
    pub crate_path: PathBuf,

    /// Where to write the archive
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
