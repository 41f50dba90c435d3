//! Document discovery and per-file record assembly.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::{Parallelism, WalkDir};

use super::record::SearchRecord;
use super::slug::strip_date_prefix;
use crate::excerpt::normalize_body;
use crate::log;
use crate::meta::{MetaValue, parse_document};

/// One named document collection: a root directory plus a URL prefix.
///
/// Collections are pure configuration; the walker owns no state beyond the
/// file currently being processed.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Display name for progress counters and diagnostics
    pub name: String,
    /// Root directory of the collection
    pub root: PathBuf,
    /// URL prefix for records, e.g. `/blog`
    pub prefix: String,
}

impl Corpus {
    pub fn new(root: PathBuf, prefix: String) -> Self {
        let name = root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("corpus")
            .to_string();
        Self { name, root, prefix }
    }
}

/// Collect every document file beneath the corpus root, in sorted order.
///
/// A missing root is not fatal: it logs a diagnostic and contributes zero
/// documents so the remaining corpora still build.
pub fn discover_documents(corpus: &Corpus) -> Vec<PathBuf> {
    if !corpus.root.is_dir() {
        log!("walk"; "directory not found: {}", corpus.root.display());
        return Vec::new();
    }

    // Serial walk in sorted order: discovery order is part of the output
    // contract (it breaks sort ties), so it must be reproducible
    WalkDir::new(&corpus.root)
        .parallelism(Parallelism::Serial)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| is_document(p) && !is_section_index(p, &corpus.root))
        .collect()
}

/// Check for the document filename convention: `index` with a
/// markdown-family extension.
fn is_document(path: &Path) -> bool {
    if path.file_stem().and_then(|s| s.to_str()) != Some("index") {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "md" | "markdown"))
}

/// A document directly under a directory named like the corpus root is the
/// collection's own landing page, not a content item.
fn is_section_index(path: &Path, root: &Path) -> bool {
    path.parent().and_then(Path::file_name) == root.file_name()
}

/// Build the search record for one document file.
///
/// Returns `Ok(None)` when the document is deliberately excluded (no
/// usable `title`); I/O failures bubble up for the caller to log and skip.
pub fn build_record(path: &Path, corpus: &Corpus) -> Result<Option<SearchRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let (meta, body) = parse_document(&raw);

    // No title, no record: this is the filter that keeps landing pages and
    // stubs out of the index
    let title = match meta.get("title") {
        Some(value) => value.to_string(),
        None => return Ok(None),
    };
    if title.is_empty() {
        return Ok(None);
    }

    let dir_name = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let slug = strip_date_prefix(dir_name);
    let url = format!("{}/{}", corpus.prefix, slug);

    let description = meta
        .get("description")
        .map(MetaValue::to_string)
        .unwrap_or_default();
    let tags = match meta.get("tags") {
        Some(MetaValue::List(tags)) => tags.clone(),
        _ => Vec::new(),
    };
    // Stringified so a bare or mistyped date still sorts as text
    let date = meta.get("date").map(MetaValue::to_string).unwrap_or_default();

    Ok(Some(SearchRecord {
        id: url.clone(),
        title,
        description,
        content: normalize_body(body),
        tags,
        url,
        date,
    }))
}
