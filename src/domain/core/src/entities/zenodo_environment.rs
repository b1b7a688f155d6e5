// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Which Zenodo instance a deposition lives in. Deposition identifiers are
/// not shared between the two, so caches are kept separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZenodoEnvironment {
    Sandbox,
    Production,
}

impl ZenodoEnvironment {
    pub fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    pub fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }

    /// Environment variable holding the API token for this instance
    pub fn token_env_var(self) -> &'static str {
        match self {
            Self::Sandbox => "ZENODO_SANDBOX_API_TOKEN",
            Self::Production => "ZENODO_API_TOKEN",
        }
    }
}

impl std::fmt::Display for ZenodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
