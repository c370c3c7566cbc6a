//! One full compilation pass.
//!
//! Ties the stages together in their fixed order: fresh run (clearing the
//! output content directory), document discovery, compilation, index
//! generation. Both the CLI `build` command and the watcher drive passes
//! through [`build_site`].

use crate::compile::{self, CompileError, CompileRun};
use crate::config::SiteConfig;
use crate::indexes::{self, IndexError};
use crate::types::RootManifest;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Run one pass over `content_root`. Returns the finished run (for output
/// reporting) and the root manifest.
pub fn build_site(
    content_root: &Path,
    config: &SiteConfig,
) -> Result<(CompileRun, RootManifest), BuildError> {
    let mut run = CompileRun::new(content_root, config)?;
    for path in compile::collect_documents(content_root)? {
        run.load(&path)?;
    }
    run.parse()?;
    let manifest = indexes::generate_index_files(&run, config.page_size)?;
    Ok((run, manifest))
}
