//! File-name and URL conventions for generated pages.
//!
//! ## Index pages
//!
//! Page names derive from the document title, spaces replaced with dashes:
//!
//! - `"Session Tunes"` → `Session-Tunes-Index.html` (main page)
//! - `"Session Tunes"`, letter `K` → `Session-Tunes-K-Index.html` (split mode)
//!
//! Letters that aren't alphanumeric (a title starting with a quote, say) are
//! written as their hex code point: `'` → `Tunes-0027-Index.html`.
//!
//! ## Source links
//!
//! Links to tune files use the path as it was walked, with forward slashes,
//! and an optional base URL in front:
//!
//! - `tunes/reels.abc` → `tunes/reels.abc`
//! - `./reels.abc` → `reels.abc`
//! - `tunes\reels.abc` with base `https://example.org/abc` →
//!   `https://example.org/abc/tunes/reels.abc`
//!
//! ## Companion documents
//!
//! A rendered copy of a tune file sits next to it with a suffix appended to
//! the full file name: `reels.abc` → `reels.abc.pdf`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File name of the main index page, or of one letter's page.
pub fn index_file_name(title: &str, letter: Option<char>) -> String {
    let stem = title.replace(' ', "-");
    match letter {
        Some(letter) => format!("{stem}-{}-Index.html", letter_slug(letter)),
        None => format!("{stem}-Index.html"),
    }
}

fn letter_slug(letter: char) -> String {
    if letter.is_alphanumeric() {
        letter.to_string()
    } else {
        format!("{:04X}", u32::from(letter))
    }
}

/// URL for a source or companion document.
pub fn source_url(path: &Path, base_url: Option<&str>) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let relative = raw.strip_prefix("./").unwrap_or(&raw);
    match base_url {
        Some(base) => format!("{}/{}", base, relative),
        None => relative.to_string(),
    }
}

/// Path of the companion document for `source`.
pub fn companion_path(source: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(source.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Companion path, if that file exists.
pub fn existing_companion(source: &Path, suffix: &str) -> Option<PathBuf> {
    let path = companion_path(source, suffix);
    path.is_file().then_some(path)
}
