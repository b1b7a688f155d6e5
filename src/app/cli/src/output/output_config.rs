// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub quiet: bool,
    pub verbosity_level: u8,
    /// Whether the stdout is attended by a user
    pub is_tty: bool,
}

impl OutputConfig {
    /// Progress indicators are only shown to a live user when no logs are
    /// written to the terminal
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet && self.verbosity_level == 0
    }
}
