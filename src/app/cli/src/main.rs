// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use clap::Parser as _;

#[tokio::main]
async fn main() {
    let args = rocrate_uploader_cli::cli::Cli::parse();

    let result = rocrate_uploader_cli::run(args).await;

    if result.is_err() {
        std::process::exit(1);
    }
}
