//! Corpus walking: document discovery and record assembly.

mod record;
mod slug;
mod walker;

pub use record::SearchRecord;
pub use slug::strip_date_prefix;
pub use walker::{Corpus, build_record, discover_documents};
