//! HTML index generation.
//!
//! Takes a finalized [`TuneIndex`] and writes the listing pages.
//!
//! ## Generated Pages
//!
//! Single-page mode (default):
//!
//! ```text
//! out/
//! └── Tunes-Index.html        # Alphabet bar with #A anchors, one table for all letters
//! ```
//!
//! Split mode (`split = true`):
//!
//! ```text
//! out/
//! ├── Tunes-Index.html        # Redirects to the first letter's page
//! ├── Tunes-A-Index.html      # Alphabet bar linking sibling pages, table for A
//! ├── Tunes-B-Index.html
//! └── ...
//! ```
//!
//! ## Rows
//!
//! Each tune row shows title, index, key, meter and rhythm, then links to the
//! tune file and, when a companion rendering exists next to it, to that too.
//! Companions are checked on disk while rendering.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated text is escaped, so titles like `Tom & Jerry's` are safe.

use crate::config::IndexConfig;
use crate::index::TuneIndex;
use crate::naming;
use crate::tune::TuneEntry;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One page written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    /// `None` for the main page.
    pub letter: Option<char>,
    pub path: PathBuf,
    /// Tune rows on the page. Zero for a redirect.
    pub tunes: usize,
}

const CSS: &str = include_str!("../static/style.css");

/// Where alphabet-bar links point.
#[derive(Debug, Clone, Copy)]
enum LetterLinks<'a> {
    /// `#A` anchors within the same page.
    Anchors,
    /// Sibling per-letter pages named after the title.
    Pages(&'a str),
}

impl LetterLinks<'_> {
    fn href(self, letter: char) -> String {
        match self {
            LetterLinks::Anchors => format!("#{letter}"),
            LetterLinks::Pages(title) => naming::index_file_name(title, Some(letter)),
        }
    }
}

/// Write the index pages for `index` into `output_dir`.
pub fn generate(
    index: &TuneIndex,
    config: &IndexConfig,
    output_dir: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    fs::create_dir_all(output_dir).map_err(|source| GenerateError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    if config.split {
        generate_split(index, config, output_dir)
    } else {
        let markup = render_index(index, config);
        let page = write_page(output_dir, &config.title, None, index.len(), markup)?;
        Ok(vec![page])
    }
}

fn generate_split(
    index: &TuneIndex,
    config: &IndexConfig,
    output_dir: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    let mut pages = Vec::new();

    let main = match index.letters().next() {
        Some(first) => {
            let target = naming::index_file_name(&config.title, Some(first));
            render_redirect(&config.title, &target)
        }
        None => render_index(index, config),
    };
    pages.push(write_page(output_dir, &config.title, None, 0, main)?);

    for (letter, entries) in index.groups() {
        let markup = render_letter_page(index, letter, entries, config);
        pages.push(write_page(
            output_dir,
            &config.title,
            Some(letter),
            entries.len(),
            markup,
        )?);
    }

    Ok(pages)
}

fn write_page(
    output_dir: &Path,
    title: &str,
    letter: Option<char>,
    tunes: usize,
    markup: Markup,
) -> Result<GeneratedPage, GenerateError> {
    let path = output_dir.join(naming::index_file_name(title, letter));
    fs::write(&path, markup.into_string()).map_err(|source| GenerateError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(page = %path.display(), tunes, "wrote index page");
    Ok(GeneratedPage {
        letter,
        path,
        tunes,
    })
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the page heading and the alphabet bar
fn site_header(title: &str, index: &TuneIndex, links: LetterLinks<'_>) -> Markup {
    html! {
        header.site-header {
            h1 { (title) }
            nav.alphabet {
                @for letter in index.letters() {
                    a href=(links.href(letter)) { (letter) }
                }
            }
        }
    }
}

/// Renders one letter's heading and column header rows
fn group_header(letter: char) -> Markup {
    html! {
        tr.letter-row {
            td colspan="6" {
                h2 id=(letter) { (letter) }
            }
        }
        tr.column-row {
            th { "Title" }
            th { "Index" }
            th { "Key" }
            th { "Meter" }
            th { "Rhythm" }
            th { "File" }
        }
    }
}

/// Renders a single tune row
fn tune_row(entry: &TuneEntry, config: &IndexConfig) -> Markup {
    let base_url = config.base_url();
    let source_label = config.scan.extension.to_uppercase();
    let companion = naming::existing_companion(&entry.source, &config.companion.suffix);

    html! {
        tr {
            td.title { (entry.title) }
            td.index { (entry.index) }
            td.key { (entry.key) }
            td.meter { (entry.meter) }
            td.rhythm { (entry.rhythm) }
            td.files {
                a href=(naming::source_url(&entry.source, base_url)) { (source_label) }
                @if let Some(path) = &companion {
                    " "
                    a href=(naming::source_url(path, base_url)) { (config.companion.label) }
                }
            }
        }
    }
}

fn tune_table<'a>(
    groups: impl Iterator<Item = (char, &'a [TuneEntry])>,
    config: &IndexConfig,
) -> Markup {
    html! {
        table.tune-table {
            @for (letter, entries) in groups {
                (group_header(letter))
                @for entry in entries {
                    (tune_row(entry, config))
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the single page listing every letter
fn render_index(index: &TuneIndex, config: &IndexConfig) -> Markup {
    let content = html! {
        (site_header(&config.title, index, LetterLinks::Anchors))
        main.index-page {
            @if index.is_empty() {
                p.empty { "No tunes found." }
            } @else {
                (tune_table(index.groups(), config))
            }
        }
    };

    base_document(&config.title, content)
}

/// Renders one letter's page in split mode
fn render_letter_page(
    index: &TuneIndex,
    letter: char,
    entries: &[TuneEntry],
    config: &IndexConfig,
) -> Markup {
    let content = html! {
        (site_header(&config.title, index, LetterLinks::Pages(&config.title)))
        main.letter-page {
            (tune_table(std::iter::once((letter, entries)), config))
        }
    };

    base_document(&format!("{} - {}", config.title, letter), content)
}

/// Renders the split-mode main page that forwards to the first letter
fn render_redirect(title: &str, target: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content={ "0; URL=" (target) };
                title { (title) }
            }
            body {
                a href=(target) { (title) }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
