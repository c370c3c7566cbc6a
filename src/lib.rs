//! # Postpress
//!
//! A minimal markdown-to-JSON compiler for content-driven front ends.
//! Your documents are markdown files with a structured front-matter heading;
//! postpress compiles them into JSON artifacts plus paginated navigation
//! indices that a rendering application consumes as plain data.
//!
//! # Architecture: Compile, Then Index
//!
//! A compilation pass runs two stages over a content directory, both writing
//! JSON under `<output>/content/`:
//!
//! ```text
//! 1. Compile   content/**      →  content/<path>   (per-document JSON artifacts)
//! 2. Index     artifacts       →  index.json, tag-*.json, archive-*.json, root.json
//! ```
//!
//! The front end never parses markdown or front matter — it only ever reads
//! JSON. Three index taxonomies are generated per pass:
//!
//! - **Root chain**: every document, newest first (`index.json`, `index_1.json`, …)
//! - **Tag chains**: one chain per declared tag (`tag-<tag>.json`, …)
//! - **Archive chains**: one chain per calendar year (`archive-<year>.json`, …)
//!
//! Every chain is a doubly-linked list of fixed-size pages, and `root.json`
//! references every page of every chain so a client can discover the whole
//! site from one fetch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`frontmatter`] | Front-matter parsing, field validation, markdown rendering |
//! | [`compile`] | Per-document compilation with an mtime-keyed incremental cache |
//! | [`paths`] | Source path → output path / percent-encoded URL mapping |
//! | [`paginate`] | Splits ordered document lists into linked index pages |
//! | [`indexes`] | Groups documents by tag and year, writes all chains and `root.json` |
//! | [`build`] | One full pass: clear output → load → compile → index |
//! | [`config`] | `config.toml` loading, validation, and stock config generation |
//! | [`output`] | CLI output formatting — pure formatters plus print wrappers |
//! | [`watch`] | Debounced file watcher driving single-flight rebuilds |
//! | [`types`] | Shared types serialized into the JSON outputs |
//!
//! # Design Decisions
//!
//! ## JSON-Only Output
//!
//! Postpress renders no HTML layout and serves no HTTP. The output contract
//! is a directory of JSON files with stable, percent-encoded URLs, so any
//! front end — or several at once — can present the same content.
//!
//! ## Incremental Compilation, One Run At A Time
//!
//! Each [`compile::CompileRun`] owns an explicit [`compile::CompileCache`]
//! keyed by source path. A cached artifact is reused only while its compile
//! stamp stays ahead of the on-disk modification time. The cache lives for
//! exactly one run — nothing is persisted across processes.
//!
//! ## Fail-Fast Batches
//!
//! One malformed document aborts the whole pass with the offending path in
//! the error. Partially-updated index chains are worse than a loud failure:
//! the front end would render dangling `next_index` links.
//!
//! ## Sequential Passes
//!
//! Compilation is single-threaded and synchronous. The [`watch`] loop runs
//! passes on its own thread of control, so rebuild triggers arriving during
//! a pass queue up and collapse into a single follow-up pass.

pub mod build;
pub mod compile;
pub mod config;
pub mod frontmatter;
pub mod indexes;
pub mod output;
pub mod paginate;
pub mod paths;
pub mod types;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_helpers;
