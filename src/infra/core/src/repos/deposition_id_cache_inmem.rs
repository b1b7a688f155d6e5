// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dill::*;
use internal_error::InternalError;
use rocrate_uploader_core::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct DepositionIdCacheInMem {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    ids: HashMap<(ZenodoEnvironment, String), u64>,
}

#[component(pub)]
#[interface(dyn DepositionIdCache)]
#[scope(Singleton)]
impl DepositionIdCacheInMem {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

#[async_trait::async_trait]
impl DepositionIdCache for DepositionIdCacheInMem {
    async fn get_deposition_id(
        &self,
        env: ZenodoEnvironment,
        key: &str,
    ) -> Result<Option<u64>, InternalError> {
        let state = self.state.lock().unwrap();
        Ok(state.ids.get(&(env, key.to_string())).copied())
    }

    async fn set_deposition_id(
        &self,
        env: ZenodoEnvironment,
        key: &str,
        deposition_id: u64,
    ) -> Result<(), InternalError> {
        let mut state = self.state.lock().unwrap();
        state.ids.insert((env, key.to_string()), deposition_id);
        Ok(())
    }
}
