// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod archive_config;
mod crate_archiver;
mod metadata_mapper;
mod ro_crate_loader;
mod zenodo_client;
mod zenodo_config;
mod zenodo_uploader;

pub use archive_config::*;
pub use crate_archiver::*;
pub use metadata_mapper::*;
pub use ro_crate_loader::*;
pub use zenodo_client::*;
pub use zenodo_config::*;
pub use zenodo_uploader::*;
