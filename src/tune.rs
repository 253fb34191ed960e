//! Tune header extraction.
//!
//! An ABC document is a run of text lines. A tune starts at an `X:` line and
//! its header is made of two-character tag lines (`T:`, `R:`, `M:`, `K:`).
//! This module reads one tune header at a time from a [`LineCursor`] and turns
//! it into indexable [`TuneEntry`] values.
//!
//! ## Block boundaries
//!
//! A block ends at the first of:
//!
//! - a blank line
//! - a `K:` line (the key is recorded, then the block closes)
//! - the end of the document
//!
//! Whatever the reason it closed, a block produces entries only when it has
//! both a title and a key. Incomplete fragments are dropped silently.
//!
//! ## Titles
//!
//! The first `T:` line is the primary title; every later `T:` line is an
//! alternate title. Each closed block yields one entry per title, all sharing
//! the same index, key, meter, rhythm and source file:
//!
//! ```text
//! X: 12                 →  "Kesh, The"        #12 Gmaj
//! T: The Kesh              "Kesh Jig"         #12 Gmaj
//! T: Kesh Jig
//! K: Gmaj
//! ```
//!
//! A leading English article is moved to the end of a title so that listings
//! sort by the significant word (`The Kesh` → `Kesh, The`). See
//! [`normalize_title`].

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Marks the start of an inline comment on a tag line.
const COMMENT_MARKER: char = '%';

/// One indexable tune record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TuneEntry {
    /// Document the tune was read from. Shared by every entry of that file.
    pub source: Arc<Path>,
    /// `X:` number. Unique within its file only.
    pub index: i32,
    /// Display title, already normalized. Never empty.
    pub title: String,
    pub key: String,
    pub meter: String,
    pub rhythm: String,
}

/// Returns the value of a tag line such as `T: Drowsy Maggie`.
///
/// The two-character tag is dropped and the rest is trimmed. Anything from the
/// first `%` onward is then cut off. The cut happens after trimming, so
/// whitespace that preceded the comment is kept: `"M: 6/8  % jig"` gives
/// `"6/8  "`.
pub fn extract_value(line: &str) -> String {
    let Some((start, _)) = line.char_indices().nth(2) else {
        return String::new();
    };
    let value = line[start..].trim();
    match value.find(COMMENT_MARKER) {
        Some(pos) => value[..pos].to_string(),
        None => value.to_string(),
    }
}

/// Moves a leading `"the "` (any case) to the end of a title.
///
/// `"The Wind that Shakes the Barley"` becomes `"Wind that Shakes the Barley, The"`.
/// The article keeps its original casing. Titles that are exactly the article
/// (`"The"`, `"the "`) and words merely starting with it (`"There"`) are left
/// alone.
pub fn normalize_title(title: &str) -> String {
    let has_article = title
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("the "));
    if has_article && title.len() > 4 {
        format!("{}, {}", &title[4..], &title[..3])
    } else {
        title.to_string()
    }
}

/// Sequential reader over the lines of one document.
///
/// Yields each line trimmed and remembers the 1-based number of the last line
/// it handed out. Lines end at `\n`, `\r\n` or a lone `\r`. The file scanner owns the cursor and lends it to
/// [`parse_block`], so both always agree on the read position.
#[derive(Debug)]
pub struct LineCursor<'a> {
    rest: &'a str,
    line_number: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            line_number: 0,
        }
    }

    /// Number of the line most recently returned, or 0 before the first read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let (line, rest) = match self.rest.find(['\r', '\n']) {
            Some(end) => {
                let after = &self.rest[end..];
                let skip = if after.starts_with("\r\n") { 2 } else { 1 };
                (&self.rest[..end], &after[skip..])
            }
            None => (self.rest, ""),
        };
        self.rest = rest;
        self.line_number += 1;
        Some(line.trim())
    }
}

/// Whether a block keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Close,
}

/// Header fields accumulated while a block is open.
#[derive(Debug, Default)]
struct TuneBlock {
    title: String,
    alternate_titles: Vec<String>,
    rhythm: String,
    meter: String,
    key: String,
}

impl TuneBlock {
    fn apply(&mut self, line: &str) -> Step {
        if line.is_empty() {
            return Step::Close;
        }

        if line.starts_with("T:") {
            let title = normalize_title(&extract_value(line));
            if title.is_empty() {
                return Step::Continue;
            }
            if self.title.is_empty() {
                self.title = title;
            } else {
                self.alternate_titles.push(title);
            }
        } else if line.starts_with("R:") {
            self.rhythm = extract_value(line);
        } else if line.starts_with("M:") {
            self.meter = extract_value(line);
        } else if line.starts_with("K:") {
            self.key = extract_value(line);
            return Step::Close;
        }

        Step::Continue
    }

    /// One entry for the primary title, then one per alternate title.
    fn finish(self, source: &Arc<Path>, index: i32) -> Vec<TuneEntry> {
        if self.title.is_empty() || self.key.is_empty() {
            return Vec::new();
        }

        let TuneBlock {
            title,
            alternate_titles,
            rhythm,
            meter,
            key,
        } = self;

        std::iter::once(title)
            .chain(alternate_titles)
            .map(|title| TuneEntry {
                source: Arc::clone(source),
                index,
                title,
                key: key.clone(),
                meter: meter.clone(),
                rhythm: rhythm.clone(),
            })
            .collect()
    }
}

/// Reads one tune header from `cursor`, starting at the line after `X:`.
///
/// Consumes lines up to and including the one that closes the block, and
/// returns the entries the block produced (possibly none).
pub fn parse_block(
    cursor: &mut LineCursor<'_>,
    source: &Arc<Path>,
    index: i32,
) -> Vec<TuneEntry> {
    tracing::debug!(index, file = %source.display(), "reading tune");

    let mut block = TuneBlock::default();
    for line in cursor.by_ref() {
        if block.apply(line) == Step::Close {
            break;
        }
    }
    block.finish(source, index)
}
