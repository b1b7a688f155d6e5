// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_ZIP_FILE_NAME: &str = "crate.zip";

/// Where the archiver writes zipped crates
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Fixed output path, takes priority over `place_next_to_crate`
    pub zip_output_path: Option<PathBuf>,
    pub place_next_to_crate: bool,
}

impl ArchiveConfig {
    pub fn new(zip_output_path: Option<PathBuf>, place_next_to_crate: bool) -> Self {
        Self {
            zip_output_path,
            place_next_to_crate,
        }
    }

    /// Resolves the archive path for a crate stored in `crate_dir`
    pub fn zip_path_for(&self, crate_dir: &Path) -> PathBuf {
        if let Some(path) = &self.zip_output_path {
            return path.clone();
        }

        if self.place_next_to_crate
            && let (Some(parent), Some(name)) = (crate_dir.parent(), crate_dir.file_name())
        {
            let mut file_name = name.to_os_string();
            file_name.push(".zip");
            return parent.join(file_name);
        }

        std::env::temp_dir().join(DEFAULT_ZIP_FILE_NAME)
    }
}
