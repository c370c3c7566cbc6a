//! Shared types serialized into the JSON outputs.
//!
//! These shapes are the contract with the consuming front end: per-document
//! artifacts, index pages, and the root manifest are all built from the
//! types here and written with `serde_json`. They are serialize-only — the
//! engine writes JSON, it never reads it back.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Fields computed by the engine, never written by the author.
///
/// Kept structurally separate from the author-owned [`DocumentMetadata::attr`]
/// slot so engine additions can never collide with user data.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngineFields {
    /// Resolved public URL of the compiled artifact. Set during compilation.
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Validated front-matter metadata of one document.
///
/// `title`, `datetime`, `tags`, and `precompile` are required in the front
/// matter; `attr` defaults to an empty mapping. Index pages re-embed the
/// full metadata of every listed document, so each page is self-contained
/// and the front end never has to chase artifact URLs just to render a list.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    pub title: String,
    /// RFC 2822 date-time exactly as the author wrote it.
    pub datetime: String,
    /// Declared tags, in authored order.
    pub tags: Vec<String>,
    /// Whether the body was rendered to HTML at compile time.
    pub precompile: bool,
    /// Free-form author data, passed through to the output untouched.
    pub attr: Map<String, Value>,
    /// Engine-computed fields.
    pub expand: EngineFields,
    /// Parsed form of `datetime`, kept for sorting and year grouping.
    #[serde(skip)]
    pub timestamp: DateTime<FixedOffset>,
}

/// One compiled document.
///
/// Exactly one of `html`/`markdown` is set, depending on the document's
/// `precompile` flag; the other serializes as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledArtifact {
    pub infos: DocumentMetadata,
    pub html: Option<String>,
    pub markdown: Option<String>,
    /// Source mtime at the moment of compilation, in milliseconds since the
    /// Unix epoch. `None` only between parsing and stamping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_time: Option<u64>,
}

/// One entry of an index page.
#[derive(Debug, Clone, Serialize)]
pub struct IndexItem {
    /// URL of the document's artifact.
    pub url: String,
    /// The document's full metadata, re-embedded.
    pub infos: DocumentMetadata,
}

/// One page of a paginated index chain.
///
/// Pages form a doubly-linked list: `pre_index` is `null` on the first page,
/// `next_index` is `null` on the last, and a single-page chain has both.
#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    pub items: Vec<IndexItem>,
    pub pre_index: Option<String>,
    pub next_index: Option<String>,
}

/// Page URLs of one chain, as referenced from the root manifest.
#[derive(Debug, Clone, Serialize)]
pub struct IndexUrls {
    pub index_urls: Vec<String>,
}

/// The root manifest, written once per pass to `root.json`.
///
/// References every page of every chain, first page first. `BTreeMap` keys
/// keep the tag and archive sections deterministically ordered.
#[derive(Debug, Clone, Serialize)]
pub struct RootManifest {
    /// Root chain page URLs, in page order.
    pub index_index_urls: Vec<String>,
    pub tags: BTreeMap<String, IndexUrls>,
    pub archives: BTreeMap<i32, IndexUrls>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_metadata() -> DocumentMetadata {
        DocumentMetadata {
            title: "Hello".into(),
            datetime: "Mon, 01 Jan 2024 12:00:00 +0000".into(),
            tags: vec!["rust".into()],
            precompile: false,
            attr: Map::new(),
            expand: EngineFields {
                url: Some("/content/hello.md".into()),
            },
            timestamp: DateTime::parse_from_rfc2822("Mon, 01 Jan 2024 12:00:00 +0000").unwrap(),
        }
    }

    #[test]
    fn engine_url_serializes_under_reserved_key() {
        let value = serde_json::to_value(sample_metadata()).unwrap();
        assert_eq!(value["expand"]["URL"], json!("/content/hello.md"));
    }

    #[test]
    fn unset_engine_url_leaves_expand_empty() {
        let value = serde_json::to_value(EngineFields::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn timestamp_never_reaches_the_output() {
        let value = serde_json::to_value(sample_metadata()).unwrap();
        assert!(value.get("timestamp").is_none());
    }

    #[test]
    fn artifact_keeps_the_unused_body_slot_null() {
        let artifact = CompiledArtifact {
            infos: sample_metadata(),
            html: None,
            markdown: Some("*raw*".into()),
            compile_time: Some(17),
        };
        let value = serde_json::to_value(&artifact).unwrap();
        assert_eq!(value["html"], Value::Null);
        assert_eq!(value["markdown"], json!("*raw*"));
        assert_eq!(value["compile_time"], json!(17));
    }

    #[test]
    fn unstamped_artifact_omits_compile_time() {
        let artifact = CompiledArtifact {
            infos: sample_metadata(),
            html: None,
            markdown: Some(String::new()),
            compile_time: None,
        };
        let value = serde_json::to_value(&artifact).unwrap();
        assert!(value.get("compile_time").is_none());
    }

    #[test]
    fn single_page_chain_serializes_null_links() {
        let page = IndexPage {
            items: vec![],
            pre_index: None,
            next_index: None,
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["pre_index"], Value::Null);
        assert_eq!(value["next_index"], Value::Null);
    }
}
