//! Index pagination.
//!
//! Splits an ordered document list into consecutive pages of a fixed size
//! and links them into a doubly-linked chain. The caller owns the ordering;
//! this module never sorts.
//!
//! ## File Naming
//!
//! Page files are named after their chain and position. The anonymous root
//! chain uses base name `index`:
//!
//! ```text
//! page 0 of the root chain      → index.json
//! page 2 of the root chain      → index_2.json
//! page 0 of chain "tag-birds"   → tag-birds.json
//! page 1 of chain "tag-birds"   → tag-birds_1.json
//! ```
//!
//! A list of `n` documents yields exactly `ceil(n / page_size)` pages: the
//! final page holds the remainder and an evenly-divisible list produces no
//! empty trailing page. Each page embeds the full metadata of its documents
//! so the front end renders a page from a single fetch.

use crate::paths::OutputLayout;
use crate::types::{CompiledArtifact, IndexItem, IndexPage};

/// File name for page `number` of a chain. `None` is the anonymous root
/// chain.
pub fn index_file_name(chain: Option<&str>, number: usize) -> String {
    let base = chain.unwrap_or("index");
    if number == 0 {
        format!("{base}.json")
    } else {
        format!("{base}_{number}.json")
    }
}

/// Partition `documents` into linked pages of at most `page_size` items.
///
/// Precondition: `documents` is already sorted (newest first) and every
/// artifact has its URL resolved; `page_size` is at least 1 (enforced by
/// config validation).
pub fn paginate(
    documents: &[&CompiledArtifact],
    chain: Option<&str>,
    page_size: usize,
    layout: &OutputLayout,
) -> Vec<IndexPage> {
    let page_count = documents.len().div_ceil(page_size);
    let mut pages = Vec::with_capacity(page_count);

    for (number, window) in documents.chunks(page_size).enumerate() {
        let items = window
            .iter()
            .map(|doc| IndexItem {
                url: doc.infos.expand.url.clone().unwrap_or_default(),
                infos: doc.infos.clone(),
            })
            .collect();
        let pre_index =
            (number > 0).then(|| layout.index_url(&index_file_name(chain, number - 1)));
        let next_index = (number + 1 < page_count)
            .then(|| layout.index_url(&index_file_name(chain, number + 1)));
        pages.push(IndexPage {
            items,
            pre_index,
            next_index,
        });
    }

    pages
}
