//! # abc-index
//!
//! Builds alphabetical HTML indexes of tune collections written in ABC
//! notation. Point it at a directory tree: every `.abc` file is read, each tune
//! header (`X:`, `T:`, `R:`, `M:`, `K:`) becomes one index entry per title, and
//! the entries are grouped by first letter into one page or one page per letter.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      tunes/   →  Catalog       (walk files, parse tune headers)
//! 2. Index     entries  →  TuneIndex     (group by letter, sort by title)
//! 3. Generate  index    →  *-Index.html  (Maud-rendered pages)
//! ```
//!
//! Scanning and grouping never touch the output directory, so `abc-index scan`
//! can show what a build would contain without writing anything.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tune`] | Header-line parsing: field values, title normalization, tune blocks |
//! | [`scan`] | Walks the source tree, reads files, collects entries and warnings |
//! | [`index`] | Letter-grouped, title-sorted collection of entries |
//! | [`generate`] | Renders index pages with Maud and writes them out |
//! | [`naming`] | Page file names, source URLs, companion document paths |
//! | [`config`] | `abc-index.toml` loading, validation and CLI overrides |
//! | [`output`] | CLI output formatting |
//!
//! # Conventions
//!
//! ## Titles
//!
//! A leading English article moves to the end so tunes sort by their
//! significant word: `The Kesh` is indexed as `Kesh, The`. Every alternate
//! title (`T:` lines after the first) gets its own entry pointing at the same
//! tune.
//!
//! ## Opting Out
//!
//! A file whose first line is `%!NOINDEX!` is skipped. Handy for drafts and
//! scratch collections that live next to the published ones.
//!
//! ## Companion Documents
//!
//! When `reels.abc.pdf` sits next to `reels.abc`, each tune from that file gets
//! a second link to the rendered copy. The suffix and link label are
//! configurable.

pub mod config;
pub mod generate;
pub mod index;
pub mod naming;
pub mod output;
pub mod scan;
pub mod tune;

#[cfg(test)]
pub(crate) mod test_helpers;
