//! Taxonomy index generation.
//!
//! Drives three independent pagination runs over the compiled documents and
//! assembles the root manifest:
//!
//! - **Root chain**: every document, one anonymous chain (`index.json`, …)
//! - **Tag chains**: one chain per declared tag (`tag-<tag>.json`, …); a
//!   document with N tags appears in N chains
//! - **Archive chains**: one chain per calendar year of the document
//!   datetime (`archive-<year>.json`, …)
//!
//! Every chain is sorted newest-first before pagination; documents sharing
//! a datetime fall back to source-path order so output is reproducible.
//! Each page is written to disk as it is built, and `root.json` — listing
//! every page URL of every chain, in page order — is written last,
//! overwriting the previous manifest.
//!
//! Errors abort the pass; there is no partial-manifest recovery.

use crate::compile::CompileRun;
use crate::paginate::{index_file_name, paginate};
use crate::paths::OutputLayout;
use crate::types::{CompiledArtifact, IndexUrls, RootManifest};
use chrono::Datelike;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Chain name for a tag.
pub fn tag_chain_name(tag: &str) -> String {
    format!("tag-{tag}")
}

/// Chain name for a yearly archive.
pub fn archive_chain_name(year: i32) -> String {
    format!("archive-{year}")
}

/// Build and write every index chain plus the root manifest.
pub fn generate_index_files(
    run: &CompileRun,
    page_size: usize,
) -> Result<RootManifest, IndexError> {
    let layout = run.layout();

    let mut all: Vec<(&Path, &CompiledArtifact)> = run.documents().collect();
    let index_index_urls = write_chain(&mut all, None, page_size, layout)?;

    let mut tags = BTreeMap::new();
    for (tag, mut group) in group_by_tag(run) {
        let chain = tag_chain_name(&tag);
        let index_urls = write_chain(&mut group, Some(&chain), page_size, layout)?;
        tags.insert(tag, IndexUrls { index_urls });
    }

    let mut archives = BTreeMap::new();
    for (year, mut group) in group_by_year(run) {
        let chain = archive_chain_name(year);
        let index_urls = write_chain(&mut group, Some(&chain), page_size, layout)?;
        archives.insert(year, IndexUrls { index_urls });
    }

    let manifest = RootManifest {
        index_index_urls,
        tags,
        archives,
    };
    let path = layout.root_manifest_path();
    let json = serde_json::to_string(&manifest)?;
    fs::write(&path, json).map_err(|source| IndexError::Io { path, source })?;

    Ok(manifest)
}

/// Sort, paginate, and write one chain. Returns its page URLs in order.
fn write_chain(
    documents: &mut Vec<(&Path, &CompiledArtifact)>,
    chain: Option<&str>,
    page_size: usize,
    layout: &OutputLayout,
) -> Result<Vec<String>, IndexError> {
    sort_newest_first(documents);
    let docs: Vec<&CompiledArtifact> = documents.iter().map(|(_, d)| *d).collect();
    let pages = paginate(&docs, chain, page_size, layout);

    let mut urls = Vec::with_capacity(pages.len());
    for (number, page) in pages.iter().enumerate() {
        let name = index_file_name(chain, number);
        let path = layout.index_file_path(&name);
        let json = serde_json::to_string(page)?;
        fs::write(&path, json).map_err(|source| IndexError::Io {
            path: path.clone(),
            source,
        })?;
        urls.push(layout.index_url(&name));
    }
    Ok(urls)
}

/// Newest first; source path breaks datetime ties.
fn sort_newest_first(documents: &mut [(&Path, &CompiledArtifact)]) {
    documents.sort_by(|(path_a, a), (path_b, b)| {
        b.infos
            .timestamp
            .cmp(&a.infos.timestamp)
            .then_with(|| path_a.cmp(path_b))
    });
}

fn group_by_tag<'a>(
    run: &'a CompileRun,
) -> BTreeMap<String, Vec<(&'a Path, &'a CompiledArtifact)>> {
    let mut groups: BTreeMap<String, Vec<_>> = BTreeMap::new();
    for (path, doc) in run.documents() {
        for tag in &doc.infos.tags {
            groups.entry(tag.clone()).or_default().push((path, doc));
        }
    }
    groups
}

fn group_by_year<'a>(run: &'a CompileRun) -> BTreeMap<i32, Vec<(&'a Path, &'a CompiledArtifact)>> {
    let mut groups: BTreeMap<i32, Vec<_>> = BTreeMap::new();
    for (path, doc) in run.documents() {
        groups
            .entry(doc.infos.timestamp.year())
            .or_default()
            .push((path, doc));
    }
    groups
}
