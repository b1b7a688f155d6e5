// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub mod app;
pub mod cli;
pub mod cli_commands;
pub mod commands;
pub mod error;
pub mod output;
pub mod services;

pub use app::*;
pub use cli_commands::*;
pub use commands::*;
pub use output::*;
pub use services::*;
