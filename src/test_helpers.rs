//! Shared test utilities for the postpress test suite.
//!
//! Provides a temp-dir site fixture, a front-matter document writer, and
//! JSON readback helpers, so tests spell out only what they assert on.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let fx = site();
//! let doc = write_doc(&fx.content(), "posts/a.md", "A", DT_2024, &["rust"], false, "body");
//!
//! let mut run = CompileRun::new(&fx.content(), &fx.config()).unwrap();
//! run.load(&doc).unwrap();
//! run.parse().unwrap();
//!
//! let artifact = read_json(&fx.output().join("content/posts/a.md"));
//! assert_eq!(artifact["infos"]["title"], "A");
//! ```

use crate::config::SiteConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// RFC 2822 datetimes with correct weekdays, for front-matter fixtures.
pub const DT_2024: &str = "Mon, 01 Jan 2024 12:00:00 +0000";
pub const DT_2023_JUN: &str = "Thu, 01 Jun 2023 12:00:00 +0000";
pub const DT_2023_JAN: &str = "Sun, 01 Jan 2023 12:00:00 +0000";

/// A temp workspace holding a content dir and an output dir.
pub struct SiteFixture {
    root: TempDir,
}

impl SiteFixture {
    pub fn content(&self) -> PathBuf {
        self.root.path().join("content")
    }

    pub fn output(&self) -> PathBuf {
        self.root.path().join("public")
    }

    /// Config pointing at the fixture's output dir, page size 1.
    pub fn config(&self) -> SiteConfig {
        self.config_with_page_size(1)
    }

    pub fn config_with_page_size(&self, page_size: usize) -> SiteConfig {
        SiteConfig {
            output: self.output(),
            page_size,
        }
    }
}

/// Create an empty site fixture.
pub fn site() -> SiteFixture {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("content")).unwrap();
    fs::create_dir_all(root.path().join("public")).unwrap();
    SiteFixture { root }
}

/// Write a document with standard front matter at `rel` under `dir`,
/// creating parent directories. Returns the document's path.
pub fn write_doc(
    dir: &Path,
    rel: &str,
    title: &str,
    datetime: &str,
    tags: &[&str],
    precompile: bool,
    body: &str,
) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let tags = tags
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let text = format!(
        "<!--\ntitle: {title}\ndatetime: {datetime}\ntags: [{tags}]\nprecompile: {precompile}\n-->\n{body}"
    );
    fs::write(&path, text).unwrap();
    path
}

/// Parse a JSON output file. Panics with the path on a miss so a failing
/// test names the file it expected.
pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("invalid JSON in {}: {e}", path.display()))
}
