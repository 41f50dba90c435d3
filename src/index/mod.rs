//! Index assembly: merge, order, and serialize search records.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::corpus::SearchRecord;
use crate::log;
use crate::utils::{human_size, plural_count};

/// The final ordered index, ready for serialization.
pub struct SearchIndex {
    records: Vec<SearchRecord>,
}

impl SearchIndex {
    /// Merge per-corpus record batches (in corpus order) and sort newest
    /// first.
    ///
    /// The sort compares raw `date` strings, so records without a date sink
    /// to the end, and it is stable: records sharing a date keep their
    /// corpus-then-discovery order.
    pub fn assemble(batches: Vec<Vec<SearchRecord>>) -> Self {
        let mut records: Vec<SearchRecord> = batches.into_iter().flatten().collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Self { records }
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize as a pretty-printed JSON array (UTF-8 kept verbatim).
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.records).context("failed to serialize search index")
    }

    /// Write the index file, creating parent directories as needed.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }

        let json = self.to_json()?;
        fs::write(path, &json)
            .with_context(|| format!("failed to write index to {}", path.display()))?;

        log!(
            "index";
            "{}: {}, {}",
            path.file_name().unwrap_or_default().to_string_lossy(),
            plural_count(self.records.len(), "record"),
            human_size(json.len())
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(url: &str, date: &str) -> SearchRecord {
        SearchRecord {
            id: url.to_string(),
            title: "t".to_string(),
            description: String::new(),
            content: String::new(),
            tags: Vec::new(),
            url: url.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_assemble_sorts_newest_first() {
        let index = SearchIndex::assemble(vec![
            vec![record("/blog/old", "2023-05-05")],
            vec![record("/notes/new", "2024-01-01")],
        ]);

        let urls: Vec<_> = index.records().iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["/notes/new", "/blog/old"]);
    }

    #[test]
    fn test_assemble_empty_dates_sort_last() {
        let index = SearchIndex::assemble(vec![vec![
            record("/a", ""),
            record("/b", "2020-01-01"),
        ]]);

        let urls: Vec<_> = index.records().iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["/b", "/a"]);
    }

    #[test]
    fn test_assemble_ties_keep_corpus_order() {
        let index = SearchIndex::assemble(vec![
            vec![record("/blog/a", "2024-01-01"), record("/blog/b", "2024-01-01")],
            vec![record("/notes/c", "2024-01-01")],
        ]);

        let urls: Vec<_> = index.records().iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["/blog/a", "/blog/b", "/notes/c"]);
    }

    #[test]
    fn test_to_json_is_array_with_exact_fields() {
        let index = SearchIndex::assemble(vec![vec![record("/blog/x", "2024-01-01")]]);
        let json = index.to_json().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 1);

        let keys: Vec<_> = array[0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["id", "title", "description", "content", "tags", "url", "date"]
        );
    }

    #[test]
    fn test_empty_index_serializes_to_empty_array() {
        let index = SearchIndex::assemble(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("public/search-index.json");

        let index = SearchIndex::assemble(vec![vec![record("/blog/x", "2024-01-01")]]);
        index.write(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with('['));
        assert!(written.contains("/blog/x"));
    }
}
