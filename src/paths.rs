//! Source-to-output path and URL mapping.
//!
//! Every output location derives from one rule: a source document is
//! re-rooted under `<output>/content/`, preserving its path relative to the
//! content root, and its URL is that output path relative to the output
//! root with every segment percent-encoded independently:
//!
//! ```text
//! content/birds/why ravens hoard.md
//!   → <output>/content/birds/why ravens hoard.md      (artifact path)
//!   → /content/birds/why%20ravens%20hoard.md          (URL)
//! ```
//!
//! Index files and the root manifest live directly in `<output>/content/`
//! and share the same encoding rule, so URLs are identical across operating
//! systems and safe to embed in JSON regardless of what characters appear
//! in file names. Distinct relative paths always map to distinct URLs.

use std::io;
use std::path::{Path, PathBuf};

/// Fixed subdirectory of the output root that all JSON lands under.
pub const OUTPUT_PREFIX: &str = "content";

/// File name of the root manifest.
pub const ROOT_MANIFEST_NAME: &str = "root.json";

/// Resolved content/output roots for one run.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    content_root: PathBuf,
    output_root: PathBuf,
}

impl OutputLayout {
    /// Build a layout from the configured roots. Both are made absolute so
    /// path arithmetic is independent of the working directory.
    pub fn new(content_root: &Path, output_root: &Path) -> io::Result<Self> {
        Ok(Self {
            content_root: std::path::absolute(content_root)?,
            output_root: std::path::absolute(output_root)?,
        })
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// The directory all JSON output is written under.
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(OUTPUT_PREFIX)
    }

    /// Output path of a document's artifact: the source re-rooted under
    /// `<output>/content/`.
    pub fn artifact_path(&self, source: &Path) -> PathBuf {
        let rel = source.strip_prefix(&self.content_root).unwrap_or(source);
        self.output_dir().join(rel)
    }

    /// Public URL of a document's artifact.
    pub fn url_of(&self, source: &Path) -> String {
        let artifact = self.artifact_path(source);
        let rel = artifact.strip_prefix(&self.output_root).unwrap_or(&artifact);
        encode_segments(rel)
    }

    /// Output path of an index or manifest file.
    pub fn index_file_path(&self, file_name: &str) -> PathBuf {
        self.output_dir().join(file_name)
    }

    /// Public URL of an index or manifest file.
    pub fn index_url(&self, file_name: &str) -> String {
        encode_segments(&Path::new(OUTPUT_PREFIX).join(file_name))
    }

    pub fn root_manifest_path(&self) -> PathBuf {
        self.index_file_path(ROOT_MANIFEST_NAME)
    }

    pub fn root_manifest_url(&self) -> String {
        self.index_url(ROOT_MANIFEST_NAME)
    }
}

/// Percent-encode each component of a relative path and rejoin with `/`,
/// prefixed with `/`. Encoding per segment keeps separators literal while
/// everything inside a segment is escaped.
fn encode_segments(rel: &Path) -> String {
    let mut url = String::new();
    for component in rel.components() {
        url.push('/');
        url.push_str(&urlencoding::encode(
            &component.as_os_str().to_string_lossy(),
        ));
    }
    url
}
