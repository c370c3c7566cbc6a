//! End-to-end pipeline tests: real content directory in, JSON site out.

use postpress::build::build_site;
use postpress::config::SiteConfig;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_doc(dir: &Path, rel: &str, title: &str, datetime: &str, tags: &[&str], body: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let tags = tags
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let text = format!(
        "<!--\ntitle: {title}\ndatetime: {datetime}\ntags: [{tags}]\nprecompile: false\n-->\n{body}"
    );
    fs::write(&path, text).unwrap();
}

fn read_json(path: &Path) -> Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&content).unwrap()
}

struct Site {
    _tmp: TempDir,
    content: PathBuf,
    output: PathBuf,
}

fn three_post_site() -> Site {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    let output = tmp.path().join("public");
    fs::create_dir_all(&content).unwrap();

    write_doc(
        &content,
        "newest.md",
        "Newest",
        "Mon, 01 Jan 2024 09:00:00 +0000",
        &["news"],
        "first",
    );
    write_doc(
        &content,
        "middle.md",
        "Middle",
        "Thu, 01 Jun 2023 09:00:00 +0000",
        &["news", "archive"],
        "second",
    );
    write_doc(
        &content,
        "oldest.md",
        "Oldest",
        "Sun, 01 Jan 2023 09:00:00 +0000",
        &["archive"],
        "third",
    );

    Site {
        _tmp: tmp,
        content,
        output,
    }
}

fn config_for(site: &Site, page_size: usize) -> SiteConfig {
    SiteConfig {
        output: site.output.clone(),
        page_size,
    }
}

#[test]
fn three_posts_page_size_one_yields_a_linked_root_chain() {
    let site = three_post_site();
    let (_, manifest) = build_site(&site.content, &config_for(&site, 1)).unwrap();

    // Three singleton pages, newest first.
    assert_eq!(
        manifest.index_index_urls,
        vec![
            "/content/index.json",
            "/content/index_1.json",
            "/content/index_2.json"
        ]
    );

    let content_dir = site.output.join("content");
    let page0 = read_json(&content_dir.join("index.json"));
    let page1 = read_json(&content_dir.join("index_1.json"));
    let page2 = read_json(&content_dir.join("index_2.json"));

    for page in [&page0, &page1, &page2] {
        assert_eq!(page["items"].as_array().unwrap().len(), 1);
    }
    assert_eq!(page0["items"][0]["infos"]["title"], "Newest");
    assert_eq!(page1["items"][0]["infos"]["title"], "Middle");
    assert_eq!(page2["items"][0]["infos"]["title"], "Oldest");

    // 0 ↔ 1 ↔ 2.
    assert_eq!(page0["pre_index"], Value::Null);
    assert_eq!(page0["next_index"], "/content/index_1.json");
    assert_eq!(page1["pre_index"], "/content/index.json");
    assert_eq!(page1["next_index"], "/content/index_2.json");
    assert_eq!(page2["pre_index"], "/content/index_1.json");
    assert_eq!(page2["next_index"], Value::Null);
}

#[test]
fn taxonomies_cover_tags_and_years() {
    let site = three_post_site();
    let (_, manifest) = build_site(&site.content, &config_for(&site, 10)).unwrap();

    let tags: Vec<&String> = manifest.tags.keys().collect();
    assert_eq!(tags, vec!["archive", "news"]);
    let years: Vec<i32> = manifest.archives.keys().copied().collect();
    assert_eq!(years, vec![2023, 2024]);

    let content_dir = site.output.join("content");
    let news = read_json(&content_dir.join("tag-news.json"));
    let titles: Vec<&str> = news["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["infos"]["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Newest", "Middle"]);

    let year_2023 = read_json(&content_dir.join("archive-2023.json"));
    assert_eq!(year_2023["items"].as_array().unwrap().len(), 2);
}

#[test]
fn artifacts_mirror_the_source_tree_with_encoded_urls() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    let output = tmp.path().join("public");
    fs::create_dir_all(&content).unwrap();
    write_doc(
        &content,
        "birds/why ravens hoard.md",
        "Why Ravens Hoard",
        "Mon, 01 Jan 2024 09:00:00 +0000",
        &["birds"],
        "body",
    );

    let config = SiteConfig {
        output: output.clone(),
        page_size: 1,
    };
    build_site(&content, &config).unwrap();

    let artifact = read_json(&output.join("content/birds/why ravens hoard.md"));
    assert_eq!(
        artifact["infos"]["expand"]["URL"],
        "/content/birds/why%20ravens%20hoard.md"
    );
    assert_eq!(artifact["markdown"], "body");
    assert_eq!(artifact["html"], Value::Null);

    let index = read_json(&output.join("content/index.json"));
    assert_eq!(
        index["items"][0]["url"],
        "/content/birds/why%20ravens%20hoard.md"
    );
}

#[test]
fn rebuild_drops_documents_removed_from_the_source() {
    let site = three_post_site();
    build_site(&site.content, &config_for(&site, 10)).unwrap();
    assert!(site.output.join("content/oldest.md").exists());

    fs::remove_file(site.content.join("oldest.md")).unwrap();
    let (_, manifest) = build_site(&site.content, &config_for(&site, 10)).unwrap();

    // The output dir was cleared: no stale artifact, no stale chain entry.
    assert!(!site.output.join("content/oldest.md").exists());
    let years: Vec<i32> = manifest.archives.keys().copied().collect();
    assert_eq!(years, vec![2023, 2024]);
    let index = read_json(&site.output.join("content/index.json"));
    assert_eq!(index["items"].as_array().unwrap().len(), 2);
}

#[test]
fn manifest_references_resolve_to_files_on_disk() {
    let site = three_post_site();
    let (_, manifest) = build_site(&site.content, &config_for(&site, 2)).unwrap();

    let urls = manifest
        .index_index_urls
        .iter()
        .chain(manifest.tags.values().flat_map(|u| u.index_urls.iter()))
        .chain(manifest.archives.values().flat_map(|u| u.index_urls.iter()));
    for url in urls {
        let decoded = urlencoding::decode(url).unwrap();
        let rel = decoded.trim_start_matches('/');
        assert!(
            site.output.join(rel).exists(),
            "manifest URL {url} has no file on disk"
        );
    }
}
