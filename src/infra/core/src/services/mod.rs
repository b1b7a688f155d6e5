// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod crate_archiver_zip;
mod ro_crate_loader_local_fs;
mod zenodo_client_http;
mod zenodo_uploader_impl;

pub use crate_archiver_zip::*;
pub use ro_crate_loader_local_fs::*;
pub use zenodo_client_http::*;
pub use zenodo_uploader_impl::*;
