// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use pretty_assertions::assert_eq;
use rocrate_uploader_core::*;
use serde_json::json;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_valid_metadata_defaults() {
    let metadata =
        ZenodoMetadata::new("Demo", "Demo crate", vec![Creator::new("Alice")]).unwrap();

    assert_eq!(metadata.upload_type(), UploadType::Dataset);
    assert_eq!(metadata.access_right(), AccessRight::Open);
    assert_eq!(metadata.license(), DEFAULT_LICENSE);
}

#[test]
fn test_serialized_shape() {
    let metadata = ZenodoMetadata::try_from_draft(ZenodoMetadataDraft {
        title: Some(json!("Survey")),
        description: Some(json!("Field survey results")),
        creators: vec![Creator::new("Alice"), Creator::new("Bob")],
        access_right: AccessRight::Restricted,
        license: Some("mit".to_string()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(
        serde_json::to_value(&metadata).unwrap(),
        json!({
            "title": "Survey",
            "upload_type": "dataset",
            "description": "Field survey results",
            "creators": [{"name": "Alice"}, {"name": "Bob"}],
            "access_right": "restricted",
            "license": "mit",
        })
    );
}

#[test]
fn test_validation_errors_are_ordered() {
    let err = ZenodoMetadata::try_from_draft(ZenodoMetadataDraft {
        title: Some(json!(null)),
        description: Some(json!("")),
        creators: vec![Creator::new("Alice"), Creator::new(""), Creator::new("")],
        ..Default::default()
    })
    .unwrap_err();

    let rendered: Vec<_> = err.errors.iter().map(ToString::to_string).collect();

    assert_eq!(
        rendered,
        [
            "Field title: Input should be a valid string",
            "Field description: String should have at least 1 character",
            "Field creators.1.name: String should have at least 1 character",
            "Field creators.2.name: String should have at least 1 character",
        ]
    );
}

#[test]
fn test_empty_creators() {
    let err = ZenodoMetadata::new("Demo", "Demo crate", Vec::new()).unwrap_err();

    assert_eq!(
        err.errors,
        vec![FieldError::new(
            vec![LocSegment::field("creators")],
            "List should have at least 1 item after validation, not 0"
        )]
    );
    assert_eq!(err.to_string(), "1 validation error(s) for Zenodo metadata");
}

#[test]
fn test_field_error_location() {
    let err = FieldError::new(
        vec![
            LocSegment::field("creators"),
            LocSegment::Index(0),
            LocSegment::field("name"),
        ],
        "String should have at least 1 character",
    );

    assert_eq!(err.location(), "creators.0.name");
    assert_eq!(
        err.to_string(),
        "Field creators.0.name: String should have at least 1 character"
    );
}

#[test]
fn test_environment_names() {
    assert_eq!(
        ZenodoEnvironment::from_sandbox_flag(true),
        ZenodoEnvironment::Sandbox
    );
    assert_eq!(ZenodoEnvironment::Sandbox.as_str(), "sandbox");
    assert_eq!(ZenodoEnvironment::Production.to_string(), "production");
    assert_eq!(
        ZenodoEnvironment::Sandbox.token_env_var(),
        "ZENODO_SANDBOX_API_TOKEN"
    );
    assert_eq!(ZenodoEnvironment::Production.token_env_var(), "ZENODO_API_TOKEN");
}
