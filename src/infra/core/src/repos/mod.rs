// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod deposition_id_cache_inmem;
mod deposition_id_cache_local_fs;

pub use deposition_id_cache_inmem::*;
pub use deposition_id_cache_local_fs::*;
