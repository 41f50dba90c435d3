//! Index build orchestration.
//!
//! Build phases:
//! - **Discover** - collect document files per corpus (totals feed the
//!   progress line)
//! - **Process** - parse each document into a record, one file at a time
//! - **Assemble** - merge, sort, and write the index file

use std::path::PathBuf;

use anyhow::Result;

use crate::config::IndexConfig;
use crate::corpus::{Corpus, build_record, discover_documents};
use crate::index::SearchIndex;
use crate::logger::ProgressLine;
use crate::utils::plural_count;
use crate::{debug, log};

/// Run the full index build: discover, process, assemble, write.
///
/// Per-document and per-corpus failures are logged and absorbed so one bad
/// file never sinks the batch; only an unwritable output file fails the
/// run.
pub fn build_index(config: &IndexConfig) -> Result<()> {
    let corpora: Vec<Corpus> = config
        .corpora
        .iter()
        .map(|c| Corpus::new(config.root.join(&c.root), c.prefix.clone()))
        .collect();

    // Discover everything up front so the progress line knows its totals
    let discovered: Vec<(&Corpus, Vec<PathBuf>)> = corpora
        .iter()
        .map(|corpus| (corpus, discover_documents(corpus)))
        .collect();

    let totals: Vec<(&str, usize)> = discovered
        .iter()
        .map(|(corpus, files)| (corpus.name.as_str(), files.len()))
        .collect();
    let progress = ProgressLine::new(&totals);

    let mut batches = Vec::with_capacity(discovered.len());
    let mut untitled = 0usize;
    for (corpus, files) in &discovered {
        let mut records = Vec::new();
        for path in files {
            match build_record(path, corpus) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => untitled += 1,
                Err(e) => log!("error"; "{}: {:#}", path.display(), e),
            }
            progress.inc(&corpus.name);
        }
        debug!("walk"; "{}: {}", corpus.name, plural_count(records.len(), "record"));
        batches.push(records);
    }
    progress.finish();

    if untitled > 0 {
        debug!("walk"; "{} skipped (no title)", plural_count(untitled, "document"));
    }

    SearchIndex::assemble(batches).write(&config.output_path())
}
