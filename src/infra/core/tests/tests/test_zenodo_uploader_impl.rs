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

use mockall::predicate::{always, eq, function};
use pretty_assertions::assert_eq;
use rocrate_uploader::ZenodoUploaderImpl;
use rocrate_uploader::domain::*;
use serde_json::json;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn demo_metadata() -> ZenodoMetadata {
    ZenodoMetadata::new("Demo", "Demo crate", vec![Creator::new("Alice")]).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_upload_uses_defaults() {
    let zip_path = PathBuf::from("/tmp/crate.zip");

    let mut zenodo_client = MockZenodoClient::new();
    {
        let zip_path = zip_path.clone();
        zenodo_client
            .expect_ensure_deposition()
            .withf(move |key, metadata, paths, sandbox| {
                key == "ro-crate-uploader"
                    && *metadata == demo_metadata()
                    && paths == [zip_path.clone()].as_slice()
                    && *sandbox
            })
            .times(1)
            .returning(|_, _, _, _| Ok(json!({"id": 1000, "submitted": true})));
    }

    let uploader = ZenodoUploaderImpl::new(
        Arc::new(zenodo_client),
        Arc::new(ZenodoUploadConfig::default()),
    );

    let res = uploader
        .upload_crate_to_zenodo(&zip_path, &demo_metadata())
        .await
        .unwrap();

    // Response is passed through as is
    assert_eq!(res, json!({"id": 1000, "submitted": true}));
}

#[test_log::test(tokio::test)]
async fn test_upload_uses_configured_key_and_environment() {
    let mut zenodo_client = MockZenodoClient::new();
    zenodo_client
        .expect_ensure_deposition()
        .with(
            eq("my-crate"),
            always(),
            function(|paths: &[PathBuf]| paths.len() == 1),
            eq(false),
        )
        .times(1)
        .returning(|_, _, _, _| Err(ZenodoClientError::Unauthorized { status: 403 }));

    let uploader = ZenodoUploaderImpl::new(
        Arc::new(zenodo_client),
        Arc::new(ZenodoUploadConfig {
            cache_key: "my-crate".to_string(),
            sandbox: false,
            ..Default::default()
        }),
    );

    let res = uploader
        .upload_crate_to_zenodo(&PathBuf::from("/tmp/crate.zip"), &demo_metadata())
        .await;

    assert!(
        matches!(res, Err(ZenodoClientError::Unauthorized { status: 403 })),
        "{res:?}"
    );
}
