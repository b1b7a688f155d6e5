// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use crate::OutputConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct UploadProgress {
    curr_progress: Option<indicatif::ProgressBar>,
}

impl UploadProgress {
    pub fn new(output_config: &OutputConfig, msg: &str) -> Self {
        Self {
            curr_progress: output_config
                .show_progress()
                .then(|| Self::new_spinner(msg)),
        }
    }

    fn new_spinner(msg: &str) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new_spinner();
        let style = indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap();
        pb.set_style(style);
        pb.set_message(msg.to_owned());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn success(&self, msg: &str) {
        if let Some(pb) = &self.curr_progress {
            pb.finish_with_message(format!("{} {}", console::style("✓").green(), msg));
        }
    }

    pub fn error(&self, msg: &str) {
        if let Some(pb) = &self.curr_progress {
            pb.finish_with_message(format!("{} {}", console::style("✗").red(), msg));
        }
    }
}

impl Drop for UploadProgress {
    fn drop(&mut self) {
        if let Some(pb) = &self.curr_progress
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}
