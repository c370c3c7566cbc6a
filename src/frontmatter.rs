//! Front-matter parsing and validation.
//!
//! Every source document opens with a heading block wrapped in HTML comment
//! markers, holding YAML metadata, followed by the markdown body:
//!
//! ```text
//! <!--
//! title: Why Ravens Hoard
//! datetime: Mon, 01 Jan 2024 12:00:00 +0000
//! tags: [birds, essays]
//! precompile: true
//! attr:
//!   cover: ravens.avif
//! -->
//! The body starts after the closing marker...
//! ```
//!
//! ## Validation Order
//!
//! Field checks run in a fixed order so error messages are predictable:
//! `title` present → `datetime` present → `datetime` parses as RFC 2822 →
//! `tags` present → `precompile` present. The first failure wins. `attr` is
//! the one optional field — absent or null becomes an empty mapping.
//!
//! Unknown top-level keys are dropped: author data belongs in `attr`, and
//! everything the engine computes lives in `expand`.
//!
//! ## Precompilation
//!
//! Documents with `precompile: true` have their body rendered to HTML here,
//! via `pulldown-cmark`; the artifact carries `html` and a null `markdown`.
//! With `precompile: false` the raw body is carried instead, for front ends
//! that render markdown themselves. This is the only non-pure step — the
//! parser itself does no I/O.

use crate::types::{CompiledArtifact, DocumentMetadata, EngineFields};
use chrono::DateTime;
use pulldown_cmark::{Parser, html as md_html};
use serde_json::{Map, Value};
use thiserror::Error;

/// Opens the heading block; must start the first line of the document.
pub const OPENING_MARKER: &str = "<!--";

/// Closes the heading block; must sit on a line of its own.
pub const CLOSING_MARKER: &str = "-->";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("document does not start with a front-matter heading")]
    MalformedHeading,
    #[error("front-matter heading is never closed")]
    UnterminatedHeading,
    #[error("front matter is empty")]
    EmptyFrontMatter,
    #[error("front matter has no `{0}` field")]
    MissingField(&'static str),
    #[error("failed to parse `datetime`: {0}")]
    InvalidDateTime(String),
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parse one document into an (unstamped) compiled artifact.
///
/// The returned artifact has `compile_time: None` and no resolved URL —
/// the compile stage stamps both before anything is written out.
pub fn resolve(text: &str) -> Result<CompiledArtifact, FrontMatterError> {
    if !text.starts_with(OPENING_MARKER) {
        return Err(FrontMatterError::MalformedHeading);
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let mut header = Vec::new();
    let mut index = 1;
    while index < lines.len() && lines[index].trim() != CLOSING_MARKER {
        header.push(lines[index]);
        index += 1;
    }
    if index >= lines.len() {
        return Err(FrontMatterError::UnterminatedHeading);
    }

    let infos = validate_header(&header.join("\n"))?;
    let body = lines[index + 1..].join("\n");

    Ok(if infos.precompile {
        CompiledArtifact {
            infos,
            html: Some(render_markdown(&body)),
            markdown: None,
            compile_time: None,
        }
    } else {
        CompiledArtifact {
            infos,
            html: None,
            markdown: Some(body),
            compile_time: None,
        }
    })
}

/// Parse and validate the YAML between the markers.
fn validate_header(block: &str) -> Result<DocumentMetadata, FrontMatterError> {
    let raw: serde_yaml::Value = serde_yaml::from_str(block)?;
    if raw.is_null() {
        return Err(FrontMatterError::EmptyFrontMatter);
    }

    // `get` on a non-mapping returns None, so a scalar heading reports the
    // first required field as missing rather than a YAML type error.
    let field = |name: &'static str| {
        raw.get(name)
            .cloned()
            .ok_or(FrontMatterError::MissingField(name))
    };

    let title: String = serde_yaml::from_value(field("title")?)?;
    let datetime: String = serde_yaml::from_value(field("datetime")?)?;
    let timestamp = DateTime::parse_from_rfc2822(&datetime)
        .map_err(|e| FrontMatterError::InvalidDateTime(e.to_string()))?;
    let tags: Vec<String> = serde_yaml::from_value(field("tags")?)?;
    let precompile: bool = serde_yaml::from_value(field("precompile")?)?;

    let attr: Map<String, Value> = match raw.get("attr") {
        None | Some(serde_yaml::Value::Null) => Map::new(),
        Some(value) => serde_yaml::from_value(value.clone())?,
    };

    Ok(DocumentMetadata {
        title,
        datetime,
        tags,
        precompile,
        attr,
        expand: EngineFields::default(),
        timestamp,
    })
}

/// Render a markdown body to HTML.
fn render_markdown(body: &str) -> String {
    let parser = Parser::new(body);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}
