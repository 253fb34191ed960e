//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! B (1 tune)
//!     Banish Misfortune  #5  Dmix  6/8  jig
//!         Source: jigs/Jigs.ABC
//! K (2 tunes)
//!     Kesh Jig  #1  G  6/8  jig
//!         Source: jigs/Jigs.ABC
//!     ...
//!
//! Warnings
//!     jigs/Jigs.ABC: Line 10: Invalid index: X = 3b
//!
//! Scanned 4 files (1 opted out), 10 tunes under 8 letters
//! ```
//!
//! ## Build
//!
//! ```text
//! Tunes-Index.html → redirect
//! B → Tunes-B-Index.html (1 tune)
//! K → Tunes-K-Index.html (2 tunes)
//!
//! Generated 3 pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::generate::GeneratedPage;
use crate::scan::Catalog;
use crate::tune::TuneEntry;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Path relative to the source root when possible, forward slashes.
fn display_source(path: &Path, source_root: &Path) -> String {
    path.strip_prefix(source_root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Title, index, then whichever of key/meter/rhythm are present.
fn tune_line(entry: &TuneEntry) -> String {
    let mut parts = vec![entry.title.clone(), format!("#{}", entry.index)];
    parts.extend(
        [&entry.key, &entry.meter, &entry.rhythm]
            .into_iter()
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
            .map(str::to_string),
    );
    parts.join("  ")
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the scanned index: letter groups, their tunes, warnings and totals.
pub fn format_scan_output(catalog: &Catalog, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for (letter, entries) in catalog.index.groups() {
        lines.push(format!("{} ({})", letter, plural(entries.len(), "tune")));
        for entry in entries {
            lines.push(format!("{}{}", indent(1), tune_line(entry)));
            lines.push(format!(
                "{}Source: {}",
                indent(2),
                display_source(&entry.source, source_root)
            ));
        }
    }

    if !catalog.warnings.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Warnings".to_string());
        for warning in &catalog.warnings {
            lines.push(format!("{}{}", indent(1), warning));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format_scan_summary(catalog));
    lines
}

/// One-line totals for a scan.
pub fn format_scan_summary(catalog: &Catalog) -> String {
    let files = plural(catalog.files_scanned, "file");
    let opted_out = if catalog.files_opted_out > 0 {
        format!(" ({} opted out)", catalog.files_opted_out)
    } else {
        String::new()
    };
    let letters = catalog.index.letters().count();
    format!(
        "Scanned {}{}, {} under {}",
        files,
        opted_out,
        plural(catalog.index.len(), "tune"),
        plural(letters, "letter")
    )
}

pub fn print_scan_output(catalog: &Catalog, source_root: &Path) {
    for line in format_scan_output(catalog, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the list of written pages.
pub fn format_generate_output(pages: &[GeneratedPage]) -> Vec<String> {
    let mut lines = Vec::new();

    for page in pages {
        let name = page
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match page.letter {
            Some(letter) => lines.push(format!(
                "{} → {} ({})",
                letter,
                name,
                plural(page.tunes, "tune")
            )),
            None if page.tunes == 0 && pages.len() > 1 => {
                lines.push(format!("{} → redirect", name))
            }
            None => lines.push(format!("{} ({})", name, plural(page.tunes, "tune"))),
        }
    }

    lines.push(String::new());
    lines.push(format!("Generated {}", plural(pages.len(), "page")));
    lines
}

pub fn print_generate_output(pages: &[GeneratedPage]) {
    for line in format_generate_output(pages) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::TuneIndex;
    use crate::scan::IndexWarning;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn entry(path: &str, title: &str, index: i32, meter: &str) -> TuneEntry {
        TuneEntry {
            source: Arc::from(Path::new(path)),
            index,
            title: title.to_string(),
            key: "G".to_string(),
            meter: meter.to_string(),
            rhythm: String::new(),
        }
    }

    fn catalog() -> Catalog {
        let mut index = TuneIndex::new();
        index.add(entry("tunes/jigs/a.abc", "Kesh, The", 1, "6/8"));
        index.add(entry("tunes/jigs/a.abc", "Kesh Jig", 1, "6/8"));
        index.add(entry("tunes/b.abc", "Butterfly", 3, ""));
        index.finalize();
        Catalog {
            index,
            warnings: vec![IndexWarning::InvalidIndex {
                file: PathBuf::from("tunes/b.abc"),
                line: 4,
                text: "x".to_string(),
            }],
            files_scanned: 3,
            files_opted_out: 1,
        }
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "tune"), "1 tune");
        assert_eq!(plural(0, "tune"), "0 tunes");
        assert_eq!(plural(2, "page"), "2 pages");
    }

    #[test]
    fn tune_line_skips_empty_fields() {
        let line = tune_line(&entry("a.abc", "Butterfly", 3, ""));
        assert_eq!(line, "Butterfly  #3  G");
    }

    #[test]
    fn scan_output_groups_and_sources() {
        let lines = format_scan_output(&catalog(), Path::new("tunes"));
        assert_eq!(
            lines[..7],
            [
                "B (1 tune)",
                "    Butterfly  #3  G",
                "        Source: b.abc",
                "K (2 tunes)",
                "    Kesh Jig  #1  G  6/8",
                "        Source: jigs/a.abc",
                "    Kesh, The  #1  G  6/8",
            ]
        );
    }

    #[test]
    fn scan_output_lists_warnings_and_summary() {
        let lines = format_scan_output(&catalog(), Path::new("tunes"));
        let warnings = lines.iter().position(|l| l == "Warnings").unwrap();
        assert_eq!(lines[warnings + 1], "    tunes/b.abc: Line 4: Invalid index: X = x");
        assert_eq!(
            lines.last().unwrap(),
            "Scanned 3 files (1 opted out), 3 tunes under 2 letters"
        );
    }

    #[test]
    fn empty_scan_is_just_the_summary() {
        let lines = format_scan_output(&Catalog::default(), Path::new("."));
        assert_eq!(lines, vec!["Scanned 0 files, 0 tunes under 0 letters"]);
    }

    #[test]
    fn generate_output_single_page() {
        let pages = vec![GeneratedPage {
            letter: None,
            path: PathBuf::from("out/Tunes-Index.html"),
            tunes: 3,
        }];
        assert_eq!(
            format_generate_output(&pages),
            vec!["Tunes-Index.html (3 tunes)", "", "Generated 1 page"]
        );
    }

    #[test]
    fn generate_output_split_pages() {
        let pages = vec![
            GeneratedPage {
                letter: None,
                path: PathBuf::from("out/Tunes-Index.html"),
                tunes: 0,
            },
            GeneratedPage {
                letter: Some('B'),
                path: PathBuf::from("out/Tunes-B-Index.html"),
                tunes: 1,
            },
        ];
        assert_eq!(
            format_generate_output(&pages),
            vec![
                "Tunes-Index.html → redirect",
                "B → Tunes-B-Index.html (1 tune)",
                "",
                "Generated 2 pages",
            ]
        );
    }
}
