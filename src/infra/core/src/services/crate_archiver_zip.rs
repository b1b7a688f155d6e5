// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dill::*;
use internal_error::{InternalError, ResultIntoInternal};
use rocrate_uploader_core::*;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct CrateArchiverZip {
    config: Arc<ArchiveConfig>,
}

#[component(pub)]
#[interface(dyn CrateArchiver)]
impl CrateArchiverZip {
    pub fn new(config: Arc<ArchiveConfig>) -> Self {
        Self { config }
    }

    /// Writes the archive to a temporary file next to the target and then
    /// moves it into place, so readers never observe a partial archive
    fn zip_dir(crate_dir: &Path, target_path: &Path) -> Result<u64, InternalError> {
        let target_dir = match target_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(target_dir).int_err()?;

        let tmp = tempfile::NamedTempFile::new_in(target_dir).int_err()?;

        // Target may be located inside the crate itself
        let skip = [
            std::fs::canonicalize(tmp.path()).ok(),
            std::fs::canonicalize(target_path).ok(),
        ];

        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = zip::ZipWriter::new(tmp.as_file());
        let mut num_files = 0;

        for entry in walkdir::WalkDir::new(crate_dir).sort_by_file_name() {
            let entry = entry.int_err()?;
            let path = entry.path();

            let rel_path = path.strip_prefix(crate_dir).int_err()?;
            if rel_path.as_os_str().is_empty() {
                continue;
            }

            let canonical_path = std::fs::canonicalize(path).ok();
            if canonical_path.is_some() && skip.contains(&canonical_path) {
                continue;
            }

            let name = rel_path
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if entry.file_type().is_dir() {
                writer.add_directory(name, options).int_err()?;
            } else {
                writer.start_file(name, options).int_err()?;
                let mut file = std::fs::File::open(path).int_err()?;
                std::io::copy(&mut file, &mut writer).int_err()?;
                num_files += 1;
            }
        }

        writer.finish().int_err()?;
        tmp.persist(target_path).int_err()?;

        Ok(num_files)
    }
}

#[async_trait::async_trait]
impl CrateArchiver for CrateArchiverZip {
    #[tracing::instrument(level = "info", skip_all, fields(source = %ro_crate.source().path().display()))]
    async fn ensure_crate_zipped(&self, ro_crate: &RoCrate) -> Result<PathBuf, ArchiveCrateError> {
        match ro_crate.source() {
            CrateSource::ZipArchive(zip_path) => {
                if !zip_path.is_file() {
                    return Err(ArchiveCrateError::SourceNotFound {
                        path: zip_path.clone(),
                    });
                }

                tracing::info!(zip_path = %zip_path.display(), "Crate is already zipped");
                Ok(zip_path.clone())
            }
            CrateSource::Directory(crate_dir) => {
                if !crate_dir.is_dir() {
                    return Err(ArchiveCrateError::SourceNotFound {
                        path: crate_dir.clone(),
                    });
                }

                let target_path = self.config.zip_path_for(crate_dir);

                let num_files = {
                    let crate_dir = crate_dir.clone();
                    let target_path = target_path.clone();
                    tokio::task::spawn_blocking(move || Self::zip_dir(&crate_dir, &target_path))
                        .await
                        .int_err()??
                };

                tracing::info!(
                    zip_path = %target_path.display(),
                    num_files,
                    "Zipped crate"
                );

                Ok(target_path)
            }
        }
    }
}
