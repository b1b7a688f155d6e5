// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod person_record;
mod ro_crate;
mod zenodo_environment;
mod zenodo_metadata;

pub use person_record::*;
pub use ro_crate::*;
pub use zenodo_environment::*;
pub use zenodo_metadata::*;
