//! Tune file discovery and scanning.
//!
//! Walks a directory tree, reads every tune file, and collects the entries of
//! all tunes into a [`TuneIndex`].
//!
//! ## Directory Structure
//!
//! Any layout works. Directories are walked recursively in file-name order,
//! and files are picked by extension (`.abc` by default, any case):
//!
//! ```text
//! tunes/                       # Source root
//! ├── abc-index.toml           # Index configuration (optional)
//! ├── reels.abc                # Scanned
//! ├── reels.abc.pdf            # Companion rendering, linked when present
//! ├── jigs/
//! │   └── Kesh.ABC             # Scanned (extension match ignores case)
//! ├── drafts.abc               # Skipped entirely if line 1 is %!NOINDEX!
//! └── notes.txt                # Ignored
//! ```
//!
//! ## Per-file rules
//!
//! - A first line of exactly `%!NOINDEX!` opts the whole file out.
//! - An `X:` line with a value starts a tune; the header that follows is
//!   handed to [`tune::parse_block`], which reads from the same cursor.
//! - An `X:` value that is not an integer is reported as an
//!   [`IndexWarning`] and no tune is started; scanning carries on.
//! - Everything else outside a tune header is ignored.
//!
//! Read errors abort the whole scan.

use crate::config::ScanConfig;
use crate::index::TuneIndex;
use crate::tune::{self, LineCursor, TuneEntry};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use walkdir::WalkDir;

/// First-line marker that excludes a file from the index.
pub const NOINDEX_MARKER: &str = "%!NOINDEX!";

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A problem in a tune file that doesn't stop the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndexWarning {
    /// `X:` value that doesn't parse as an integer.
    InvalidIndex {
        file: PathBuf,
        line: usize,
        text: String,
    },
}

impl fmt::Display for IndexWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexWarning::InvalidIndex { file, line, text } => write!(
                f,
                "{}: Line {}: Invalid index: X = {}",
                file.display(),
                line,
                text
            ),
        }
    }
}

/// Result of scanning one document.
#[derive(Debug, Default)]
pub struct FileScan {
    pub entries: Vec<TuneEntry>,
    pub warnings: Vec<IndexWarning>,
    /// File started with [`NOINDEX_MARKER`].
    pub opted_out: bool,
}

/// Everything found under a source root.
#[derive(Debug, Default, Serialize)]
pub struct Catalog {
    /// Finalized (sorted) index.
    pub index: TuneIndex,
    pub warnings: Vec<IndexWarning>,
    pub files_scanned: usize,
    pub files_opted_out: usize,
}

/// Scan the text of one document.
pub fn scan_text(text: &str, source: &Arc<Path>) -> FileScan {
    let mut result = FileScan::default();
    let mut cursor = LineCursor::new(text);

    while let Some(line) = cursor.next() {
        if cursor.line_number() == 1 && line == NOINDEX_MARKER {
            tracing::debug!(file = %source.display(), "skipping file marked {NOINDEX_MARKER}");
            result.opted_out = true;
            break;
        }

        if !(line.starts_with("X:") && line.len() > 2) {
            continue;
        }

        let value = tune::extract_value(line);
        match value.parse::<i32>() {
            Ok(index) => {
                let entries = tune::parse_block(&mut cursor, source, index);
                result.entries.extend(entries);
            }
            Err(_) => {
                let warning = IndexWarning::InvalidIndex {
                    file: source.to_path_buf(),
                    line: cursor.line_number(),
                    text: value,
                };
                tracing::warn!("{warning}");
                result.warnings.push(warning);
            }
        }
    }

    result
}

/// Read and scan one tune file.
///
/// The file is decoded as UTF-8, or as ISO-8859-1 when it isn't valid UTF-8,
/// and a leading byte-order mark is dropped.
pub fn scan_file(path: &Path) -> Result<FileScan, ScanError> {
    tracing::debug!(file = %path.display(), "reading file");
    let bytes = fs::read(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = decode(bytes);
    let text = decoded
        .strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(decoded.as_str());
    Ok(scan_text(text, &Arc::from(path)))
}

/// UTF-8 if valid, otherwise Latin-1, where every byte is its own code point.
fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| {
        err.into_bytes().into_iter().map(char::from).collect()
    })
}

/// Tune files under `root`, in walk order.
pub fn find_tune_files(root: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            tracing::debug!(dir = %entry.path().display(), "reading directory");
        } else if entry.file_type().is_file() && config.matches(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Scan every tune file under `root` and return the sorted index.
pub fn scan(root: &Path, config: &ScanConfig) -> Result<Catalog, ScanError> {
    let mut catalog = Catalog::default();

    for path in find_tune_files(root, config)? {
        let file_scan = scan_file(&path)?;
        catalog.files_scanned += 1;
        if file_scan.opted_out {
            catalog.files_opted_out += 1;
        }
        catalog.index.extend(file_scan.entries);
        catalog.warnings.extend(file_scan.warnings);
    }

    catalog.index.finalize();
    Ok(catalog)
}
