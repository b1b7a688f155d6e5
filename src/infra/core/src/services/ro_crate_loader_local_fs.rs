// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::io::Read;
use std::path::{Path, PathBuf};

use dill::*;
use internal_error::{ErrorIntoInternal, ResultIntoInternal};
use rocrate_uploader_core::*;
use zip::result::ZipError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Loads crates stored on the local filesystem, either as a directory or as a
/// zip archive
pub struct RoCrateLoaderLocalFs {}

#[component(pub)]
#[interface(dyn RoCrateLoader)]
impl RoCrateLoaderLocalFs {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {}
    }

    fn load_from_dir(dir: &Path) -> Result<RoCrate, LoadCrateError> {
        let Some(metadata_path) = [METADATA_FILE_NAME, LEGACY_METADATA_FILE_NAME]
            .into_iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
        else {
            return Err(LoadCrateError::not_a_crate(dir));
        };

        let bytes = std::fs::read(&metadata_path).int_err()?;
        Self::parse(
            CrateSource::Directory(dir.to_path_buf()),
            &metadata_path,
            &bytes,
        )
    }

    fn load_from_zip(zip_path: &Path) -> Result<RoCrate, LoadCrateError> {
        let file = std::fs::File::open(zip_path).int_err()?;
        let mut archive = match zip::ZipArchive::new(file) {
            Ok(archive) => archive,
            Err(ZipError::Io(e)) if e.kind() != std::io::ErrorKind::UnexpectedEof => {
                return Err(e.int_err().into());
            }
            Err(e) => {
                tracing::debug!(error = %e, "File is not a readable zip archive");
                return Err(LoadCrateError::not_a_crate(zip_path));
            }
        };

        let names: Vec<String> = archive.file_names().map(ToString::to_string).collect();
        let Some(entry_name) = Self::find_metadata_entry(&names) else {
            return Err(LoadCrateError::not_a_crate(zip_path));
        };

        tracing::debug!(%entry_name, "Reading crate metadata from archive");

        let mut bytes = Vec::new();
        archive
            .by_name(&entry_name)
            .int_err()?
            .read_to_end(&mut bytes)
            .int_err()?;

        Self::parse(
            CrateSource::ZipArchive(zip_path.to_path_buf()),
            &zip_path.join(&entry_name),
            &bytes,
        )
    }

    /// Metadata is expected either at the archive root or within a single
    /// top-level folder that wraps all entries
    fn find_metadata_entry(names: &[String]) -> Option<String> {
        for file_name in [METADATA_FILE_NAME, LEGACY_METADATA_FILE_NAME] {
            if names.iter().any(|n| n == file_name) {
                return Some(file_name.to_string());
            }
        }

        let mut top_level = names
            .iter()
            .filter_map(|n| n.split_once('/').map(|(top, _)| top))
            .collect::<Vec<_>>();
        top_level.sort_unstable();
        top_level.dedup();

        let [top] = top_level.as_slice() else {
            return None;
        };

        if names.iter().any(|n| !n.starts_with(&format!("{top}/"))) {
            return None;
        }

        [METADATA_FILE_NAME, LEGACY_METADATA_FILE_NAME]
            .into_iter()
            .map(|file_name| format!("{top}/{file_name}"))
            .find(|candidate| names.contains(candidate))
    }

    fn parse(
        source: CrateSource,
        metadata_path: &Path,
        bytes: &[u8],
    ) -> Result<RoCrate, LoadCrateError> {
        let document: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| LoadCrateError::invalid_metadata(metadata_path, e))?;

        RoCrate::from_metadata_document(source, document)
            .map_err(|e| LoadCrateError::invalid_metadata(metadata_path, e))
    }

    fn load_blocking(path: PathBuf) -> Result<RoCrate, LoadCrateError> {
        if !path.exists() {
            return Err(LoadCrateError::not_found(path));
        }

        if path.is_dir() {
            return Self::load_from_dir(&path);
        }

        // Pointing at the metadata file itself means the enclosing directory
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str())
            && (file_name == METADATA_FILE_NAME || file_name == LEGACY_METADATA_FILE_NAME)
            && let Some(dir) = path.parent()
        {
            let dir = if dir.as_os_str().is_empty() {
                Path::new(".")
            } else {
                dir
            };
            return Self::load_from_dir(dir);
        }

        Self::load_from_zip(&path)
    }
}

#[async_trait::async_trait]
impl RoCrateLoader for RoCrateLoaderLocalFs {
    #[tracing::instrument(level = "info", skip_all, fields(path = %path.display()))]
    async fn load(&self, path: &Path) -> Result<RoCrate, LoadCrateError> {
        let path = path.to_path_buf();

        let ro_crate = tokio::task::spawn_blocking(move || Self::load_blocking(path))
            .await
            .int_err()??;

        tracing::debug!(
            root_id = ?ro_crate.root_dataset().id(),
            num_entities = ro_crate.entities().len(),
            "Loaded crate"
        );

        Ok(ro_crate)
    }
}
