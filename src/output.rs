//! CLI output formatting for compilation passes.
//!
//! Each report has a `format_*` function returning lines (pure, testable)
//! and a `print_*` wrapper that writes them to stdout. Entities follow a
//! two-level pattern: a header line with positional index and title, then
//! indented context lines tracing back to files and URLs:
//!
//! ```text
//! Documents
//! 001 Why Ravens Hoard
//!     Source: birds/ravens.md
//!     URL: /content/birds/ravens.md
//!
//! Indexes
//! index: 2 pages
//! tag-birds: 1 page
//! archive-2024: 1 page
//!
//! Compiled 1 document, 4 index pages → /content/root.json
//! ```

use crate::compile::CompileRun;
use crate::types::RootManifest;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn count_noun(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// One line per compiled document: index, title, source, URL.
pub fn format_documents(run: &CompileRun) -> Vec<String> {
    let root = run.layout().content_root();
    let mut lines = vec!["Documents".to_string()];
    for (pos, (path, doc)) in run.documents().enumerate() {
        let rel = path.strip_prefix(root).unwrap_or(path);
        lines.push(format!("{} {}", format_index(pos + 1), doc.infos.title));
        lines.push(format!("    Source: {}", rel.display()));
        if let Some(url) = &doc.infos.expand.url {
            lines.push(format!("    URL: {url}"));
        }
    }
    lines
}

/// One line per chain: name and page count.
pub fn format_indexes(manifest: &RootManifest) -> Vec<String> {
    let mut lines = vec!["Indexes".to_string()];
    lines.push(format!(
        "index: {}",
        count_noun(manifest.index_index_urls.len(), "page")
    ));
    for (tag, urls) in &manifest.tags {
        lines.push(format!("tag-{tag}: {}", count_noun(urls.index_urls.len(), "page")));
    }
    for (year, urls) in &manifest.archives {
        lines.push(format!(
            "archive-{year}: {}",
            count_noun(urls.index_urls.len(), "page")
        ));
    }
    lines
}

/// The closing summary line.
pub fn format_summary(run: &CompileRun, manifest: &RootManifest, manifest_url: &str) -> String {
    let documents = run.documents().count();
    let pages = manifest.index_index_urls.len()
        + manifest
            .tags
            .values()
            .map(|u| u.index_urls.len())
            .sum::<usize>()
        + manifest
            .archives
            .values()
            .map(|u| u.index_urls.len())
            .sum::<usize>();
    format!(
        "Compiled {}, {} → {manifest_url}",
        count_noun(documents, "document"),
        count_noun(pages, "index page"),
    )
}

/// Print the full report for a finished pass.
pub fn print_build_output(run: &CompileRun, manifest: &RootManifest) {
    for line in format_documents(run) {
        println!("{line}");
    }
    println!();
    for line in format_indexes(manifest) {
        println!("{line}");
    }
    println!();
    println!(
        "{}",
        format_summary(run, manifest, &run.layout().root_manifest_url())
    );
}

/// Print the report for a `check` pass: validated documents only.
pub fn print_check_output(documents: &[std::path::PathBuf], root: &Path) {
    for (pos, path) in documents.iter().enumerate() {
        let rel = path.strip_prefix(root).unwrap_or(path);
        println!("{} {}", format_index(pos + 1), rel.display());
    }
    println!("{} valid", count_noun(documents.len(), "document"));
}
