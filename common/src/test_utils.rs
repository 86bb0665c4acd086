//! Helpers for tests that need to write files.

use std::path::{Path, PathBuf};

/// `<workspace>/test_output`, next to the member crates.
fn output_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("test_output")
}

/// Returns a path for `name` inside `test_output/<suite>`, creating the directory.
///
/// Suites keep parallel test binaries from clobbering each other's files.
pub fn test_output_path(suite: &str, name: &str) -> PathBuf {
    let dir = output_root().join(suite);
    std::fs::create_dir_all(&dir)
        .unwrap_or_else(|e| panic!("Failed to create {}: {}", dir.display(), e));
    dir.join(name)
}
