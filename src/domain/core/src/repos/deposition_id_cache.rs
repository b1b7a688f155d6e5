// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::ZenodoEnvironment;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Local record of which deposition was created for a given upload key
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait DepositionIdCache: Send + Sync {
    async fn get_deposition_id(
        &self,
        env: ZenodoEnvironment,
        key: &str,
    ) -> Result<Option<u64>, InternalError>;

    async fn set_deposition_id(
        &self,
        env: ZenodoEnvironment,
        key: &str,
        deposition_id: u64,
    ) -> Result<(), InternalError>;
}
