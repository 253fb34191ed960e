//! Full pipeline against a throwaway tune directory: config → scan → generate.

use abc_index::config::{self, ConfigOverrides};
use abc_index::{generate, scan};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn titles(entries: &[abc_index::tune::TuneEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

/// Two files, one tune each, different letters.
fn two_file_collection() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.abc", "X:1\nT:The Wind\nK:Gmaj\n");
    write(tmp.path(), "b.abc", "X:2\nT:Zebra\nK:Dmaj\n");
    tmp
}

#[test]
fn scan_groups_by_letter_with_normalized_titles() {
    let tmp = two_file_collection();
    let catalog = scan::scan(tmp.path(), &config::ScanConfig::default()).unwrap();

    assert_eq!(catalog.index.letters().collect::<Vec<_>>(), vec!['W', 'Z']);
    assert_eq!(titles(catalog.index.group('W').unwrap()), vec!["Wind, The"]);
    assert_eq!(titles(catalog.index.group('Z').unwrap()), vec!["Zebra"]);

    let wind = &catalog.index.group('W').unwrap()[0];
    assert_eq!(wind.index, 1);
    assert_eq!(wind.key, "Gmaj");
    assert!(wind.source.ends_with("a.abc"));
    assert!(catalog.warnings.is_empty());
}

#[test]
fn build_writes_single_page_with_config_file() {
    let tmp = two_file_collection();
    write(
        tmp.path(),
        config::CONFIG_FILE_NAME,
        "title = \"Session Tunes\"\n\n[companion]\nlabel = \"Sheet\"\n",
    );
    write(tmp.path(), "b.abc.pdf", "%PDF-1.4\n");
    let out = tmp.path().join("site");

    let index_config = config::load_config(tmp.path()).unwrap();
    let catalog = scan::scan(tmp.path(), &index_config.scan).unwrap();
    let pages = generate::generate(&catalog.index, &index_config, &out).unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].path, out.join("Session-Tunes-Index.html"));
    assert_eq!(pages[0].tunes, 2);

    let html = fs::read_to_string(&pages[0].path).unwrap();
    assert!(html.contains("Session Tunes"));
    assert!(html.find("Wind, The").unwrap() < html.find("Zebra").unwrap());
    assert!(html.contains(">Sheet</a>"));
    assert!(html.contains("b.abc.pdf"));
    assert!(!html.contains("a.abc.pdf"));
}

#[test]
fn build_split_with_cli_overrides() {
    let tmp = two_file_collection();
    let out = tmp.path().join("site");

    let overrides = ConfigOverrides {
        title: Some("My Tunes".to_string()),
        base_url: Some("https://example.org/abc/".to_string()),
        split: Some(true),
    };
    let index_config = overrides.apply(config::load_config(tmp.path()).unwrap()).unwrap();
    let catalog = scan::scan(tmp.path(), &index_config.scan).unwrap();
    let pages = generate::generate(&catalog.index, &index_config, &out).unwrap();

    let names: Vec<_> = pages
        .iter()
        .map(|p| p.path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "My-Tunes-Index.html",
            "My-Tunes-W-Index.html",
            "My-Tunes-Z-Index.html",
        ]
    );

    let main = fs::read_to_string(out.join("My-Tunes-Index.html")).unwrap();
    assert!(main.contains("My-Tunes-W-Index.html"));

    let w_page = fs::read_to_string(out.join("My-Tunes-W-Index.html")).unwrap();
    assert!(w_page.contains("Wind, The"));
    assert!(!w_page.contains("Zebra</td>"));
    assert!(w_page.contains("href=\"https://example.org/abc/"));
}

#[test]
fn opted_out_and_invalid_files_reported() {
    let tmp = two_file_collection();
    write(tmp.path(), "drafts.abc", "%!NOINDEX!\nX:9\nT:Secret\nK:C\n");
    write(tmp.path(), "bad.abc", "X:one\nT:Broken\nK:C\n");

    let catalog = scan::scan(tmp.path(), &config::ScanConfig::default()).unwrap();

    assert_eq!(catalog.files_scanned, 4);
    assert_eq!(catalog.files_opted_out, 1);
    assert_eq!(catalog.index.len(), 2);
    assert_eq!(catalog.warnings.len(), 1);
    assert!(catalog.warnings[0].to_string().ends_with("Line 1: Invalid index: X = one"));
}

#[test]
fn invalid_config_rejected() {
    let tmp = two_file_collection();
    write(tmp.path(), config::CONFIG_FILE_NAME, "colour = \"red\"\n");
    assert!(config::load_config(tmp.path()).is_err());
}
