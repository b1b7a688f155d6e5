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

use dill::{Catalog, CatalogBuilder};
use pretty_assertions::assert_eq;
use rocrate_uploader::domain::*;
use rocrate_uploader::{DepositionIdCacheLocalFs, ZenodoClientHttp};
use secrecy::SecretString;
use serde_json::json;

use crate::utils::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const TOKEN: &str = "secret-token";
const KEY: &str = "ro-crate-uploader";

#[test_log::test(tokio::test)]
async fn test_first_upload_creates_and_publishes() {
    let harness = ZenodoClientHarness::new(ZenodoUploadConfig::default()).await;

    let res = harness.ensure().await.unwrap();

    assert_eq!(
        harness.server.requests(),
        [
            "POST /api/deposit/depositions",
            "PUT /api/files/bucket-1000/crate.zip",
            "POST /api/deposit/depositions/1000/actions/publish",
        ]
    );
    assert_eq!(res["id"], json!(1000));
    assert_eq!(res["submitted"], json!(true));
    assert_eq!(harness.cached_id().await, Some(1000));

    let deposition = harness.server.deposition(1000).unwrap();
    assert_eq!(
        deposition.metadata,
        json!({
            "title": "Demo",
            "upload_type": "dataset",
            "description": "Demo crate",
            "creators": [{"name": "Alice"}],
            "access_right": "open",
            "license": "cc-by-4.0",
        })
    );
    assert_eq!(deposition.files.len(), 1);
    assert_eq!(deposition.files[0].filename, "crate.zip");
    assert_eq!(deposition.files[0].content, b"zip bytes");
}

#[test_log::test(tokio::test)]
async fn test_second_upload_creates_new_version() {
    let harness = ZenodoClientHarness::new(ZenodoUploadConfig::default()).await;

    harness.ensure().await.unwrap();
    harness.server.clear_requests();

    let res = harness.ensure().await.unwrap();

    assert_eq!(
        harness.server.requests(),
        [
            "GET /api/deposit/depositions/1000",
            "POST /api/deposit/depositions/1000/actions/newversion",
            "GET /api/deposit/depositions/1001",
            "PUT /api/deposit/depositions/1001",
            "DELETE /api/deposit/depositions/1001/files/file-2",
            "PUT /api/files/bucket-1001/crate.zip",
            "POST /api/deposit/depositions/1001/actions/publish",
        ]
    );
    assert_eq!(res["id"], json!(1001));
    assert_eq!(harness.cached_id().await, Some(1001));

    let new_version = harness.server.deposition(1001).unwrap();
    assert!(new_version.submitted);
    assert_eq!(new_version.files.len(), 1);
    assert_eq!(new_version.files[0].id, "file-3");

    // Previous version stays untouched
    assert!(harness.server.deposition(1000).unwrap().submitted);
}

#[test_log::test(tokio::test)]
async fn test_draft_is_updated_in_place() {
    let harness = ZenodoClientHarness::new(ZenodoUploadConfig {
        publish: false,
        ..Default::default()
    })
    .await;

    let res = harness.ensure().await.unwrap();
    assert_eq!(res["submitted"], json!(false));
    assert_eq!(
        harness.server.requests().last().unwrap(),
        "GET /api/deposit/depositions/1000"
    );
    harness.server.clear_requests();

    harness.ensure().await.unwrap();

    assert_eq!(
        harness.server.requests(),
        [
            "GET /api/deposit/depositions/1000",
            "PUT /api/deposit/depositions/1000",
            "DELETE /api/deposit/depositions/1000/files/file-1",
            "PUT /api/files/bucket-1000/crate.zip",
            "GET /api/deposit/depositions/1000",
        ]
    );
    assert_eq!(harness.server.num_depositions(), 1);
    assert_eq!(harness.cached_id().await, Some(1000));
}

#[test_log::test(tokio::test)]
async fn test_new_deposition_policy_ignores_cache() {
    let harness = ZenodoClientHarness::new(ZenodoUploadConfig {
        on_existing: ExistingDepositionPolicy::NewDeposition,
        ..Default::default()
    })
    .await;

    harness.ensure().await.unwrap();
    harness.server.clear_requests();

    let res = harness.ensure().await.unwrap();

    assert_eq!(
        harness.server.requests(),
        [
            "POST /api/deposit/depositions",
            "PUT /api/files/bucket-1001/crate.zip",
            "POST /api/deposit/depositions/1001/actions/publish",
        ]
    );
    assert_eq!(res["id"], json!(1001));
    assert_eq!(harness.cached_id().await, Some(1001));
}

#[test_log::test(tokio::test)]
async fn test_stale_cache_entry_creates_new_deposition() {
    let harness = ZenodoClientHarness::new(ZenodoUploadConfig::default()).await;

    harness
        .cache()
        .set_deposition_id(ZenodoEnvironment::Sandbox, KEY, 42)
        .await
        .unwrap();

    let res = harness.ensure().await.unwrap();

    assert_eq!(
        harness.server.requests(),
        [
            "GET /api/deposit/depositions/42",
            "POST /api/deposit/depositions",
            "PUT /api/files/bucket-1000/crate.zip",
            "POST /api/deposit/depositions/1000/actions/publish",
        ]
    );
    assert_eq!(res["id"], json!(1000));
    assert_eq!(harness.cached_id().await, Some(1000));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_missing_token_fails_before_any_request() {
    let harness =
        ZenodoClientHarness::new_with_token(ZenodoUploadConfig::default(), None).await;

    let res = harness.ensure().await;

    assert!(
        matches!(
            res,
            Err(ZenodoClientError::MissingToken {
                env_var: "ZENODO_SANDBOX_API_TOKEN"
            })
        ),
        "{res:?}"
    );
    assert_eq!(harness.server.requests(), Vec::<String>::new());
}

#[test_log::test(tokio::test)]
async fn test_base_url_path_prefix_is_kept() {
    let server = FakeZenodoServer::start_under_prefix(TOKEN, "/zenodo").await;
    assert_eq!(server.base_url().path(), "/zenodo");

    let harness =
        ZenodoClientHarness::with_server(server, ZenodoUploadConfig::default(), Some(TOKEN));

    let res = harness.ensure().await.unwrap();

    assert_eq!(
        harness.server.requests(),
        [
            "POST /api/deposit/depositions",
            "PUT /api/files/bucket-1000/crate.zip",
            "POST /api/deposit/depositions/1000/actions/publish",
        ]
    );
    assert_eq!(res["id"], json!(1000));
    assert_eq!(harness.cached_id().await, Some(1000));
}

#[test_log::test(tokio::test)]
async fn test_rejected_token() {
    let harness =
        ZenodoClientHarness::new_with_token(ZenodoUploadConfig::default(), Some("wrong")).await;

    let res = harness.ensure().await;

    assert!(
        matches!(res, Err(ZenodoClientError::Unauthorized { status: 401 })),
        "{res:?}"
    );
    assert_eq!(harness.cached_id().await, None);
}

#[test_log::test(tokio::test)]
async fn test_missing_file_fails_before_any_request() {
    let harness = ZenodoClientHarness::new(ZenodoUploadConfig::default()).await;
    let missing = harness.zip_path.with_file_name("missing.zip");

    let res = harness
        .client()
        .ensure_deposition(KEY, &demo_metadata(), &[missing.clone()], true)
        .await;

    assert!(
        matches!(res, Err(ZenodoClientError::FileNotFound { ref path }) if *path == missing),
        "{res:?}"
    );
    assert_eq!(harness.server.requests(), Vec::<String>::new());
}

#[test_log::test(tokio::test)]
async fn test_api_error_is_reported() {
    let harness = ZenodoClientHarness::new(ZenodoUploadConfig::default()).await;
    // Fake API refuses to publish a deposition without files
    let res = harness
        .client()
        .ensure_deposition(KEY, &demo_metadata(), &[], true)
        .await;

    let Err(ZenodoClientError::Api { status, url, body }) = res else {
        panic!("Unexpected result: {res:?}");
    };
    assert_eq!(status, 400);
    assert!(url.ends_with("/api/deposit/depositions/1000/actions/publish"), "{url}");
    assert!(body.contains("Minimum one file must be provided"), "{body}");
    assert_eq!(harness.cached_id().await, None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn demo_metadata() -> ZenodoMetadata {
    ZenodoMetadata::new("Demo", "Demo crate", vec![Creator::new("Alice")]).unwrap()
}

struct ZenodoClientHarness {
    _tempdir: tempfile::TempDir,
    server: FakeZenodoServer,
    catalog: Catalog,
    zip_path: PathBuf,
}

impl ZenodoClientHarness {
    async fn new(upload_config: ZenodoUploadConfig) -> Self {
        Self::new_with_token(upload_config, Some(TOKEN)).await
    }

    async fn new_with_token(upload_config: ZenodoUploadConfig, token: Option<&str>) -> Self {
        let server = FakeZenodoServer::start(TOKEN).await;
        Self::with_server(server, upload_config, token)
    }

    fn with_server(
        server: FakeZenodoServer,
        upload_config: ZenodoUploadConfig,
        token: Option<&str>,
    ) -> Self {
        let tempdir = tempfile::tempdir().unwrap();

        let zip_path = tempdir.path().join("crate.zip");
        std::fs::write(&zip_path, "zip bytes").unwrap();

        let mut client_config = ZenodoClientConfig::with_defaults(tempdir.path().join("cache"));
        client_config.sandbox_url = server.base_url().clone();
        client_config.production_url = server.base_url().clone();
        client_config.access_token = token.map(|t| SecretString::from(t.to_string()));
        // Results must not depend on tokens exported in the developer's shell
        client_config.token_from_env = false;

        let catalog = CatalogBuilder::new()
            .add_value(client_config)
            .add_value(upload_config)
            .add::<ZenodoClientHttp>()
            .add::<DepositionIdCacheLocalFs>()
            .build();

        Self {
            _tempdir: tempdir,
            server,
            catalog,
            zip_path,
        }
    }

    fn client(&self) -> Arc<dyn ZenodoClient> {
        self.catalog.get_one::<dyn ZenodoClient>().unwrap()
    }

    fn cache(&self) -> Arc<dyn DepositionIdCache> {
        self.catalog.get_one::<dyn DepositionIdCache>().unwrap()
    }

    async fn ensure(&self) -> Result<serde_json::Value, ZenodoClientError> {
        self.client()
            .ensure_deposition(KEY, &demo_metadata(), &[self.zip_path.clone()], true)
            .await
    }

    async fn cached_id(&self) -> Option<u64> {
        self.cache()
            .get_deposition_id(ZenodoEnvironment::Sandbox, KEY)
            .await
            .unwrap()
    }
}
