// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::io::Write;
use std::path::{Path, PathBuf};

use indoc::indoc;
use zip::write::SimpleFileOptions;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEMO_CRATE_METADATA: &str = indoc!(
    r##"
    {
      "@context": "https://w3id.org/ro/crate/1.1/context",
      "@graph": [
        {
          "@id": "ro-crate-metadata.json",
          "@type": "CreativeWork",
          "conformsTo": {"@id": "https://w3id.org/ro/crate/1.1"},
          "about": {"@id": "./"}
        },
        {
          "@id": "./",
          "@type": "Dataset",
          "name": "Demo",
          "description": "Demo crate",
          "author": [{"@id": "#alice"}],
          "hasPart": [{"@id": "data.csv"}, {"@id": "docs/"}]
        },
        {"@id": "#alice", "@type": "Person", "name": "Alice"},
        {"@id": "data.csv", "@type": "File"},
        {"@id": "docs/", "@type": "Dataset"}
      ]
    }
    "##
);

/// Creates the demo crate under `parent/name` and returns its path
pub fn write_demo_crate(parent: &Path, name: &str) -> PathBuf {
    let crate_dir = parent.join(name);
    std::fs::create_dir_all(crate_dir.join("docs")).unwrap();

    std::fs::write(crate_dir.join("ro-crate-metadata.json"), DEMO_CRATE_METADATA).unwrap();
    std::fs::write(crate_dir.join("data.csv"), "city,population\nA,100\nB,200\n").unwrap();
    std::fs::write(crate_dir.join("docs").join("README.md"), "# Demo\n").unwrap();

    crate_dir
}

/// Writes a zip archive with the given `(name, content)` entries
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);

    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }

    writer.finish().unwrap();
}

/// Lists entry names of a zip archive, sorted
pub fn zip_entry_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap();
    let mut names: Vec<_> = archive.file_names().map(ToString::to_string).collect();
    names.sort();
    names
}
