// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::error::Error as StdError;
use std::fmt::Display;

use internal_error::{BoxedError, InternalError};
use rocrate_uploader_core::*;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum CLIError {
    /// Indicates that the command was invoked incorrectly or its environment
    /// is not set up properly
    #[error(transparent)]
    UsageError(UsageError),

    /// Indicates that the command ran to completion but the desired outcome
    /// could not be achieved
    #[error(transparent)]
    Failure(BoxedError),

    /// Unexpected error that prevented the command from completing
    #[error(transparent)]
    CriticalFailure(BoxedError),
}

impl CLIError {
    pub fn usage_error(msg: impl Into<String>) -> Self {
        Self::UsageError(UsageError {
            msg: Some(msg.into()),
            source: None,
        })
    }

    pub fn usage_error_from(e: impl Into<BoxedError>) -> Self {
        Self::UsageError(UsageError {
            msg: None,
            source: Some(e.into()),
        })
    }

    pub fn failure(e: impl Into<BoxedError>) -> Self {
        Self::Failure(e.into())
    }

    pub fn critical(e: impl Into<BoxedError>) -> Self {
        Self::CriticalFailure(e.into())
    }

    /// Renders the error for a terminal, with the chain of causes when
    /// `verbose` is set
    pub fn pretty(&self, verbose: bool) -> PrettyCLIError<'_> {
        PrettyCLIError {
            error: self,
            verbose,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct UsageError {
    msg: Option<String>,
    source: Option<BoxedError>,
}

impl Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.msg, &self.source) {
            (Some(msg), _) => write!(f, "{msg}"),
            (None, Some(source)) => write!(f, "{source}"),
            (None, None) => write!(f, "Invalid usage"),
        }
    }
}

impl StdError for UsageError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        // Source is already rendered in place of a message
        if self.msg.is_none() {
            return self.source.as_ref().and_then(|e| e.source());
        }
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct PrettyCLIError<'a> {
    error: &'a CLIError,
    verbose: bool,
}

impl Display for PrettyCLIError<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.error {
            CLIError::UsageError(_) => "Usage Error",
            CLIError::Failure(_) => "Error",
            CLIError::CriticalFailure(_) => "Critical Error",
        };

        write!(
            f,
            "{}: {}",
            console::style(label).red().bold(),
            self.error.to_string().trim_end()
        )?;

        if !self.verbose {
            return Ok(());
        }

        let mut source = self.error.source();
        let mut first = true;
        while let Some(cause) = source {
            if first {
                write!(f, "\n\n{}", console::style("Caused by:").bold())?;
                first = false;
            }
            write!(f, "\n  {}", cause.to_string().trim_end())?;
            source = cause.source();
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Conversions
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl From<InternalError> for CLIError {
    fn from(e: InternalError) -> Self {
        Self::critical(e)
    }
}

impl From<dill::InjectionError> for CLIError {
    fn from(e: dill::InjectionError) -> Self {
        Self::critical(e)
    }
}

impl From<std::io::Error> for CLIError {
    fn from(e: std::io::Error) -> Self {
        Self::critical(e)
    }
}

impl From<LoadCrateError> for CLIError {
    fn from(e: LoadCrateError) -> Self {
        match e {
            LoadCrateError::NotFound { .. }
            | LoadCrateError::NotACrate { .. }
            | LoadCrateError::InvalidMetadata { .. } => Self::usage_error_from(e),
            LoadCrateError::Internal(_) => Self::critical(e),
        }
    }
}

impl From<BuildZenodoMetadataError> for CLIError {
    fn from(e: BuildZenodoMetadataError) -> Self {
        Self::failure(e)
    }
}

impl From<ArchiveCrateError> for CLIError {
    fn from(e: ArchiveCrateError) -> Self {
        match e {
            ArchiveCrateError::SourceNotFound { .. } => Self::usage_error_from(e),
            ArchiveCrateError::Internal(_) => Self::critical(e),
        }
    }
}

impl From<ZenodoClientError> for CLIError {
    fn from(e: ZenodoClientError) -> Self {
        match e {
            ZenodoClientError::MissingToken { .. }
            | ZenodoClientError::Unauthorized { .. }
            | ZenodoClientError::FileNotFound { .. } => Self::usage_error_from(e),
            ZenodoClientError::Api { .. } | ZenodoClientError::Internal(_) => Self::critical(e),
        }
    }
}

impl From<UploadCrateError> for CLIError {
    fn from(e: UploadCrateError) -> Self {
        match e {
            UploadCrateError::Load(e) => e.into(),
            UploadCrateError::Metadata(e) => e.into(),
            UploadCrateError::Archive(e) => e.into(),
            UploadCrateError::Upload(e) => e.into(),
        }
    }
}
