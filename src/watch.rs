//! File watching and single-flight rebuilds.
//!
//! Monitors the content root and re-runs a full compilation pass when
//! documents change. Rapid event bursts (editors writing temp files,
//! multi-file saves) are debounced and coalesced into one rebuild.
//!
//! # Single-Flight Guarantee
//!
//! The event loop and the passes share one thread: a pass runs to
//! completion before the next channel read, so two passes can never touch
//! the output directory or each other's state concurrently. Events arriving
//! mid-pass queue in the channel and collapse into a single follow-up pass
//! once the debounce window closes.
//!
//! Each pass is a fresh [`crate::compile::CompileRun`] — the compile cache
//! is per-run and nothing persists between rebuilds. A failed pass is
//! logged and watching continues; the initial build is the exception, since
//! a site that never built is a configuration problem, not a transient one.

use crate::build::{self, BuildError};
use crate::config::SiteConfig;
use crate::output;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use thiserror::Error;

const DEBOUNCE_MS: u64 = 300;
const IDLE_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("failed to watch {path}: {source}")]
    Notify {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Creations, modifications, and removals all change the index chains.
const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Batches rapid file events until a quiet window passes.
struct Debouncer {
    pending: HashSet<PathBuf>,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: HashSet::new(),
            last_event: None,
        }
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(IDLE_TIMEOUT_SECS)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

/// Build once, then block watching `content_root` and rebuilding on change.
pub fn watch_and_rebuild(content_root: &Path, config: &SiteConfig) -> Result<(), WatchError> {
    rebuild(content_root, config)?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).map_err(|source| WatchError::Notify {
        path: content_root.to_path_buf(),
        source,
    })?;
    watcher
        .watch(content_root, RecursiveMode::Recursive)
        .map_err(|source| WatchError::Notify {
            path: content_root.to_path_buf(),
            source,
        })?;
    println!("watching {}", content_root.display());

    let mut debouncer = Debouncer::new();
    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => debouncer.add(event),
            Ok(Ok(_)) => {}
            Ok(Err(e)) => eprintln!("watch error: {e}"),
            Err(mpsc::RecvTimeoutError::Timeout) if debouncer.ready() => {
                let changed = debouncer.take();
                println!("{} change(s), rebuilding", changed.len());
                if let Err(e) = rebuild(content_root, config) {
                    eprintln!("build failed: {e}");
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

fn rebuild(content_root: &Path, config: &SiteConfig) -> Result<(), BuildError> {
    let (run, manifest) = build::build_site(content_root, config)?;
    output::print_build_output(&run, &manifest);
    Ok(())
}
