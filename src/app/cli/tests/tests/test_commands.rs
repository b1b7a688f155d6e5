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

use dill::{Catalog, CatalogBuilder, TypedBuilder as _};
use indoc::indoc;
use mockall::predicate::{always, eq};
use pretty_assertions::assert_eq;
use rocrate_uploader::{CrateArchiverZip, RoCrateLoaderLocalFs};
use rocrate_uploader_cli::{
    CLIError,
    Command as _,
    MetadataCommand,
    MetadataOutputFormat,
    OutputConfig,
    PrepareCommand,
    UploadCommand,
    ZipCommand,
    render_metadata,
};
use rocrate_uploader_core::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const CRATE_METADATA: &str = indoc!(
    r##"
    {
      "@context": "https://w3id.org/ro/crate/1.1/context",
      "@graph": [
        {
          "@id": "ro-crate-metadata.json",
          "@type": "CreativeWork",
          "about": {"@id": "./"}
        },
        {
          "@id": "./",
          "@type": "Dataset",
          "name": "Demo",
          "description": "Demo crate",
          "author": {"@id": "#alice"},
          "hasPart": [{"@id": "data.csv"}]
        },
        {"@id": "#alice", "@type": "Person", "name": "Alice"},
        {"@id": "data.csv", "@type": "File"}
      ]
    }
    "##
);

fn write_crate(parent: &Path, metadata: &str) -> PathBuf {
    let crate_dir = parent.join("demo_crate");
    std::fs::create_dir_all(&crate_dir).unwrap();
    std::fs::write(crate_dir.join(METADATA_FILE_NAME), metadata).unwrap();
    std::fs::write(crate_dir.join("data.csv"), "a,b\n1,2\n").unwrap();
    crate_dir
}

fn demo_metadata() -> ZenodoMetadata {
    ZenodoMetadata::new("Demo", "Demo crate", vec![Creator::new("Alice")]).unwrap()
}

fn local_catalog(zip_output_path: PathBuf) -> Catalog {
    let mut b = CatalogBuilder::new();
    b.add::<RoCrateLoaderLocalFs>();
    b.add::<CrateArchiverZip>();
    b.add_value(ArchiveConfig::new(Some(zip_output_path), false));
    b.build()
}

fn mocked_catalog(use_case: MockUploadCrateUseCase) -> Catalog {
    let mut b = CatalogBuilder::new();
    b.add_value(use_case)
        .bind::<dyn UploadCrateUseCase, MockUploadCrateUseCase>();
    b.add_value(ZenodoUploadConfig::default());
    b.add_value(OutputConfig::default());
    b.build()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_render_metadata_formats() {
    let metadata = demo_metadata();

    let json: serde_json::Value =
        serde_json::from_str(&render_metadata(&metadata, MetadataOutputFormat::Json).unwrap())
            .unwrap();
    assert_eq!(json, serde_json::to_value(&metadata).unwrap());

    assert_eq!(
        render_metadata(&metadata, MetadataOutputFormat::Yaml).unwrap(),
        indoc!(
            "
            title: Demo
            upload_type: dataset
            description: Demo crate
            creators:
            - name: Alice
            access_right: open
            license: cc-by-4.0
            "
        )
    );
}

#[test_log::test(tokio::test)]
async fn test_metadata_command() {
    let temp_dir = tempfile::tempdir().unwrap();
    let crate_dir = write_crate(temp_dir.path(), CRATE_METADATA);
    let catalog = local_catalog(temp_dir.path().join("out.zip"));

    let command: Arc<MetadataCommand> = MetadataCommand::builder(crate_dir, MetadataOutputFormat::Json)
        .get(&catalog)
        .unwrap();

    command.run().await.unwrap();
}

#[test_log::test(tokio::test)]
async fn test_metadata_command_invalid_metadata() {
    let temp_dir = tempfile::tempdir().unwrap();
    let crate_dir = write_crate(
        temp_dir.path(),
        r#"{"@graph": [{"@id": "./", "@type": "Dataset", "description": "No title"}]}"#,
    );
    let catalog = local_catalog(temp_dir.path().join("out.zip"));

    let command: Arc<MetadataCommand> = MetadataCommand::builder(crate_dir, MetadataOutputFormat::Yaml)
        .get(&catalog)
        .unwrap();

    let err = command.run().await.unwrap_err();
    assert!(matches!(err, CLIError::Failure(_)), "{err:?}");
}

#[test_log::test(tokio::test)]
async fn test_metadata_command_missing_crate() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = local_catalog(temp_dir.path().join("out.zip"));

    let command: Arc<MetadataCommand> =
        MetadataCommand::builder(temp_dir.path().join("nope"), MetadataOutputFormat::Json)
            .get(&catalog)
            .unwrap();

    let err = command.run().await.unwrap_err();
    assert!(matches!(err, CLIError::UsageError(_)), "{err:?}");
}

#[test_log::test(tokio::test)]
async fn test_zip_command() {
    let temp_dir = tempfile::tempdir().unwrap();
    let crate_dir = write_crate(temp_dir.path(), CRATE_METADATA);
    let zip_path = temp_dir.path().join("out").join("demo.zip");
    let catalog = local_catalog(zip_path.clone());

    let command: Arc<ZipCommand> = ZipCommand::builder(crate_dir).get(&catalog).unwrap();
    command.run().await.unwrap();

    assert!(zip_path.is_file());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_prepare_command_never_uploads() {
    let mut use_case = MockUploadCrateUseCase::new();
    use_case
        .expect_execute()
        .with(always(), eq(UploadCrateOptions { dry_run: true }))
        .times(1)
        .returning(|_, _| {
            Ok(UploadCrateResult {
                metadata: demo_metadata(),
                crate_zip_path: PathBuf::from("/tmp/crate.zip"),
                deposition: None,
            })
        });

    let catalog = mocked_catalog(use_case);
    let command: Arc<PrepareCommand> = PrepareCommand::builder(PathBuf::from("demo_crate"))
        .get(&catalog)
        .unwrap();

    command.run().await.unwrap();
}

#[test_log::test(tokio::test)]
async fn test_upload_command_prints_deposition() {
    let mut use_case = MockUploadCrateUseCase::new();
    use_case
        .expect_execute()
        .with(
            eq(Path::new("demo_crate")),
            eq(UploadCrateOptions { dry_run: false }),
        )
        .times(1)
        .returning(|_, _| {
            Ok(UploadCrateResult {
                metadata: demo_metadata(),
                crate_zip_path: PathBuf::from("/tmp/crate.zip"),
                deposition: Some(serde_json::json!({
                    "id": 1000,
                    "submitted": true,
                    "links": {"html": "https://sandbox.zenodo.org/deposit/1000"},
                })),
            })
        });

    let catalog = mocked_catalog(use_case);
    let command: Arc<UploadCommand> = UploadCommand::builder(PathBuf::from("demo_crate"), false)
        .get(&catalog)
        .unwrap();

    command.run().await.unwrap();
}

#[test_log::test(tokio::test)]
async fn test_upload_command_rejected_token() {
    let mut use_case = MockUploadCrateUseCase::new();
    use_case.expect_execute().times(1).returning(|_, _| {
        Err(UploadCrateError::Upload(ZenodoClientError::Unauthorized {
            status: 403,
        }))
    });

    let catalog = mocked_catalog(use_case);
    let command: Arc<UploadCommand> = UploadCommand::builder(PathBuf::from("demo_crate"), false)
        .get(&catalog)
        .unwrap();

    let err = command.run().await.unwrap_err();
    assert!(matches!(err, CLIError::UsageError(_)), "{err:?}");
}
