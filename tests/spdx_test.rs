// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

const SOURCE_ROOTS: &[&str] = &["src", "tests", "sample_usage"];

fn has_spdx_identifier(file_path: &Path) -> bool {
    let file = fs::File::open(file_path).unwrap();
    let reader = io::BufReader::new(file);
    if let Some(Ok(first_line)) = reader.lines().next() {
        return first_line.starts_with("// SPDX-License-Identifier: Apache-2.0");
    }
    false
}

#[test]
fn check_all_rust_files_for_spdx() {
    let project_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut missing_spdx_files = Vec::new();
    let mut dir_worklist: Vec<PathBuf> = SOURCE_ROOTS
        .iter()
        .map(|root| project_dir.join(root))
        .filter(|path| path.is_dir())
        .collect();

    while let Some(dir) = dir_worklist.pop() {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                if path.file_name().map_or(false, |name| name == "target") {
                    continue;
                }
                dir_worklist.push(path);
                continue;
            }
            if path.extension().map_or(false, |ext| ext == "rs") && !has_spdx_identifier(&path) {
                missing_spdx_files.push(path);
            }
        }
    }

    assert!(
        missing_spdx_files.is_empty(),
        "The following files are missing SPDX identifiers: {:?}",
        missing_spdx_files
    );
}
