//! Shared test utilities for the abc-index test suite.
//!
//! Provides fixture setup plus small extractors that turn scan results into
//! plain title lists for assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let catalog = scan(tmp.path(), &ScanConfig::default()).unwrap();
//!
//! assert_eq!(group_titles(&catalog.index, 'K'), vec!["Kesh Jig", "Kesh, The"]);
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::index::TuneIndex;
use crate::tune::TuneEntry;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/tunes/` to a temp directory and return it.
///
/// Tests get an isolated copy they can add files to without affecting other
/// tests or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/tunes");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a tune file (creating parent directories) and return its path.
pub fn write_tune_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

// =========================================================================
// Extractors
// =========================================================================

pub fn entry_titles(entries: &[TuneEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

/// Titles of one letter group, in group order. Panics if the group is missing.
pub fn group_titles(index: &TuneIndex, letter: char) -> Vec<&str> {
    let group = index
        .group(letter)
        .unwrap_or_else(|| panic!("no group for letter {letter}"));
    entry_titles(group)
}

/// Every title in the index, letter by letter.
pub fn all_titles(index: &TuneIndex) -> Vec<&str> {
    index
        .groups()
        .flat_map(|(_, entries)| entries.iter().map(|e| e.title.as_str()))
        .collect()
}
