// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use dill::*;
use rocrate_uploader::*;
use rocrate_uploader_core::ExistingDepositionPolicy;

use crate::error::*;
use crate::output::*;
use crate::{cli, cli_commands, config};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const BINARY_NAME: &str = "rocrate-uploader";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LOGGING_CONFIG: &str = "info";
const VERBOSE_LOGGING_CONFIG: &str = "debug";

const LOG_FILE_NAME: &str = "rocrate-uploader.log";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run(args: cli::Cli) -> Result<(), CLIError> {
    let output_config = configure_output_format(&args);

    // Logging depends on the config, so failures to load it go straight to the
    // terminal
    let mut config = match load_config(args.config.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err.pretty(false));
            return Err(err);
        }
    };
    apply_command_overrides(&mut config, &args.command);

    let guards = configure_logging(&output_config, &run_dir(&config));
    tracing::info!(
        version = VERSION,
        args = ?std::env::args().collect::<Vec<_>>(),
        "Initializing {BINARY_NAME}"
    );
    tracing::info!(config = ?config.redacted(), "Loaded configuration");

    let catalog = {
        let mut catalog_builder = configure_base_catalog();
        register_config_in_catalog(&config, &mut catalog_builder);
        catalog_builder.add_value(output_config.clone());
        catalog_builder.build()
    };

    let result = run_command(&catalog, args).await;

    match &result {
        Ok(()) => {
            tracing::info!("Command successful");
        }
        Err(err) => {
            tracing::error!(
                error_dbg = ?err,
                error = %err.pretty(true),
                "Command failed",
            );

            if output_config.verbosity_level == 0 {
                eprintln!("{}", err.pretty(false));
            }
        }
    }

    // Flush all logging sinks
    drop(guards);

    result
}

async fn run_command(catalog: &Catalog, args: cli::Cli) -> Result<(), CLIError> {
    let command = cli_commands::get_command(args).get(catalog)?;
    command.validate_args().await?;
    command.run().await
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Catalog
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn configure_base_catalog() -> CatalogBuilder {
    let mut b = CatalogBuilder::new();

    b.add::<RoCrateLoaderLocalFs>();
    b.add::<CrateArchiverZip>();
    b.add::<DepositionIdCacheLocalFs>();
    b.add::<ZenodoClientHttp>();
    b.add::<ZenodoUploaderImpl>();
    b.add::<UploadCrateUseCaseImpl>();

    b
}

pub fn register_config_in_catalog(config: &config::CLIConfig, catalog_builder: &mut CatalogBuilder) {
    let archive = config.archive.clone().unwrap_or_default();
    catalog_builder.add_value(archive.to_archive_config());

    let zenodo = config.zenodo.clone().unwrap_or_default();
    catalog_builder.add_value(zenodo.to_upload_config());
    catalog_builder.add_value(zenodo.to_client_config());
}

fn load_config(explicit_path: Option<PathBuf>) -> Result<config::CLIConfig, CLIError> {
    let current_dir = std::env::current_dir()?;
    let config_svc = config::ConfigService::new(explicit_path, &current_dir);
    config_svc.load_with_defaults()
}

/// Command line flags take priority over the config file
pub fn apply_command_overrides(config: &mut config::CLIConfig, command: &cli::Command) {
    match command {
        cli::Command::Upload(c) => {
            let zenodo = config
                .zenodo
                .get_or_insert_with(config::ZenodoConfigModel::new);

            if c.production {
                zenodo.sandbox = Some(false);
            }
            if let Some(cache_key) = &c.cache_key {
                zenodo.cache_key = Some(cache_key.clone());
            }
            if c.no_publish {
                zenodo.publish = Some(false);
            }
            if c.new_deposition {
                zenodo.on_existing = Some(ExistingDepositionPolicy::NewDeposition);
            }
        }
        cli::Command::Zip(c) => {
            if let Some(output) = &c.output {
                config
                    .archive
                    .get_or_insert_with(config::ArchiveConfigModel::new)
                    .zip_output_path = Some(output.clone());
            }
        }
        cli::Command::Completions(_) | cli::Command::Metadata(_) | cli::Command::Prepare(_) => {}
    }
}

fn run_dir(config: &config::CLIConfig) -> PathBuf {
    config
        .zenodo
        .as_ref()
        .and_then(|z| z.cache_dir.clone())
        .unwrap_or_else(config::default_cache_dir)
        .join(CACHE_APP_DIR)
        .join("run")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Logging
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn configure_logging(output_config: &OutputConfig, run_dir: &Path) -> Guards {
    use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
    use tracing_log::LogTracer;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::layer::SubscriberExt;

    configure_panic_hook();

    // Logging may be already initialized when running under tests
    if tracing::dispatcher::has_been_set() {
        return Guards::default();
    }

    // Use configuration from RUST_LOG env var if provided
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match output_config.verbosity_level {
            0 | 1 => EnvFilter::new(DEFAULT_LOGGING_CONFIG),
            _ => EnvFilter::new(VERBOSE_LOGGING_CONFIG),
        },
    };

    if output_config.verbosity_level > 0 {
        // Log to STDERR
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .pretty()
            .init();

        return Guards::default();
    }

    let log_path = run_dir.join(LOG_FILE_NAME);
    let log_file = match std::fs::create_dir_all(run_dir)
        .and_then(|_| std::fs::File::create(&log_path))
    {
        Ok(file) => file,
        // Cache dir is not writable - discard logs
        Err(_) => return Guards::default(),
    };

    // Log to file with JSON formatter
    let (appender, appender_guard) = tracing_appender::non_blocking(log_file);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(BINARY_NAME.to_owned(), appender));

    // Redirect all standard logging to tracing events
    LogTracer::init().expect("Failed to set LogTracer");

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    Guards {
        appender: Some(appender_guard),
    }
}

fn configure_panic_hook() {
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "Panic occurred");
        prev(info);
        eprintln!(
            "\n{}",
            console::style(
                "Oh no, looks like rocrate-uploader has crashed! \n\
                If the issue persists, help us by reporting this problem at \
                https://github.com/kamu-data/rocrate-uploader/issues"
            )
            .bold()
        );
    }));
}

#[allow(dead_code)]
#[derive(Default)]
struct Guards {
    appender: Option<tracing_appender::non_blocking::WorkerGuard>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Output format
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn configure_output_format(args: &cli::Cli) -> OutputConfig {
    let is_tty = console::Term::stdout().features().is_attended();

    OutputConfig {
        quiet: args.quiet,
        verbosity_level: args.verbose,
        is_tty,
    }
}
