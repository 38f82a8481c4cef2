#![allow(dead_code)]
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// Writes `contents` to a temporary file ending in `suffix` (".toml" or ".json").
pub fn config_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .prefix("filter-dns")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn path_of(file: &NamedTempFile) -> &str {
    file.path().to_str().unwrap()
}
