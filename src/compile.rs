//! Incremental document compilation.
//!
//! One [`CompileRun`] covers one compilation pass (or several, in watch
//! mode callers that keep a run alive): paths are registered with
//! [`CompileRun::load`], compiled with [`CompileRun::parse`], and the
//! resulting artifacts feed the index stage.
//!
//! # Design
//!
//! ## The cache
//!
//! The run owns an explicit [`CompileCache`] mapping each normalized source
//! path to its [`CompiledArtifact`]. Entries carry the source's modification
//! time at the moment of compilation (`compile_time`, in milliseconds). On a
//! repeat lookup the stored stamp is compared against the current on-disk
//! mtime:
//!
//! - stamp strictly greater than mtime → the entry is reused as-is, and the
//!   artifact's output file is not rewritten;
//! - stamp less than **or equal to** mtime → the entry is invalidated and
//!   the document recompiled. Equal counts as stale so a write landing in
//!   the same millisecond as the compile is never missed.
//!
//! The cache lives for the run only. Entries for paths that drop out of the
//! load list linger unused — they are never revisited, and never purged.
//!
//! ## Failure policy
//!
//! Compilation is fail-fast per batch: the first malformed document or I/O
//! failure aborts [`CompileRun::parse`] with the offending path in the
//! error. Documents earlier in load order will already have been written;
//! later ones will not.
//!
//! ## Side effects
//!
//! Every fresh compile writes the artifact's JSON to its mirrored output
//! path before returning. Creating a run clears and recreates the output
//! content directory, so stale artifacts never survive into a new run.

use crate::config::SiteConfig;
use crate::frontmatter::{self, FrontMatterError};
use crate::paths::OutputLayout;
use crate::types::CompiledArtifact;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to compile {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> CompileError {
    let path = path.to_path_buf();
    move |source| CompileError::Io { path, source }
}

/// Per-run artifact cache, keyed by normalized source path.
#[derive(Debug, Default)]
pub struct CompileCache {
    entries: HashMap<PathBuf, CompiledArtifact>,
}

impl CompileCache {
    pub fn get(&self, path: &Path) -> Option<&CompiledArtifact> {
        self.entries.get(path)
    }

    pub fn insert(&mut self, path: PathBuf, artifact: CompiledArtifact) {
        self.entries.insert(path, artifact);
    }

    /// Drop the entry for `path`, returning it if one was cached.
    pub fn invalidate(&mut self, path: &Path) -> Option<CompiledArtifact> {
        self.entries.remove(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One compilation run: the load list, the cache, and the output layout.
#[derive(Debug)]
pub struct CompileRun {
    layout: OutputLayout,
    paths: Vec<PathBuf>,
    cache: CompileCache,
}

impl CompileRun {
    /// Start a fresh run. Clears and recreates `<output>/content/`.
    pub fn new(content_root: &Path, config: &SiteConfig) -> Result<Self, CompileError> {
        let layout =
            OutputLayout::new(content_root, &config.output).map_err(io_error(content_root))?;
        let output_dir = layout.output_dir();
        if output_dir.exists() {
            fs::remove_dir_all(&output_dir).map_err(io_error(&output_dir))?;
        }
        fs::create_dir_all(&output_dir).map_err(io_error(&output_dir))?;
        Ok(Self {
            layout,
            paths: Vec::new(),
            cache: CompileCache::default(),
        })
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn cache(&self) -> &CompileCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut CompileCache {
        &mut self.cache
    }

    /// Register a source document. Idempotent: paths are normalized to their
    /// absolute form and deduplicated, preserving first-load order.
    pub fn load(&mut self, path: &Path) -> Result<(), CompileError> {
        let path = std::path::absolute(path).map_err(io_error(path))?;
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
        Ok(())
    }

    /// Compile every loaded document, in load order. Fail-fast: the first
    /// error aborts the batch.
    pub fn parse(&mut self) -> Result<(), CompileError> {
        let paths = self.paths.clone();
        for path in &paths {
            self.compile(path)?;
        }
        Ok(())
    }

    /// Compile one document, or reuse its still-valid cached artifact.
    ///
    /// A fresh compile stamps `compile_time`, resolves the document URL into
    /// `expand`, and writes the artifact JSON to its output path. A cache
    /// hit returns the stored artifact without touching the output.
    pub fn compile(&mut self, path: &Path) -> Result<&CompiledArtifact, CompileError> {
        let reuse = match self.cache.get(path) {
            None => false,
            Some(cached) => {
                let mtime = mtime_millis(path)?;
                // An unstamped entry is stale by definition.
                cached.compile_time.is_some_and(|stamped| stamped > mtime)
            }
        };

        if !reuse {
            self.cache.invalidate(path);
            let artifact = self.fresh_compile(path)?;
            self.cache.entries.insert(path.to_path_buf(), artifact);
        }

        // Present by construction: either reused or just inserted.
        Ok(&self.cache.entries[path])
    }

    /// Documents compiled so far, in load order.
    pub fn documents(&self) -> impl Iterator<Item = (&Path, &CompiledArtifact)> {
        self.paths
            .iter()
            .filter_map(|p| self.cache.get(p).map(|a| (p.as_path(), a)))
    }

    fn fresh_compile(&self, path: &Path) -> Result<CompiledArtifact, CompileError> {
        let mtime = mtime_millis(path)?;
        let text = fs::read_to_string(path).map_err(io_error(path))?;

        let mut artifact = frontmatter::resolve(&text).map_err(|source| {
            CompileError::Document {
                path: path.to_path_buf(),
                source,
            }
        })?;
        artifact.compile_time = Some(mtime);
        artifact.infos.expand.url = Some(self.layout.url_of(path));

        let output = self.layout.artifact_path(path);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        let json = serde_json::to_string(&artifact)?;
        fs::write(&output, json).map_err(io_error(&output))?;

        Ok(artifact)
    }
}

/// A file's mtime in milliseconds since the Unix epoch. Pre-epoch mtimes
/// clamp to zero.
fn mtime_millis(path: &Path) -> Result<u64, CompileError> {
    let metadata = fs::metadata(path).map_err(io_error(path))?;
    let modified = metadata.modified().map_err(io_error(path))?;
    Ok(modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0))
}

/// Discover source documents under the content root: every regular file,
/// skipping dot-entries and `config.toml`, sorted for deterministic order.
pub fn collect_documents(content_root: &Path) -> Result<Vec<PathBuf>, CompileError> {
    let mut documents = Vec::new();
    let walker = WalkDir::new(content_root).into_iter().filter_entry(|e| {
        e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
    });
    for entry in walker {
        let entry = entry.map_err(|e| CompileError::Io {
            path: content_root.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy() == "config.toml" {
            continue;
        }
        documents.push(entry.into_path());
    }
    documents.sort();
    Ok(documents)
}
