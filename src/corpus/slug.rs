//! Slug derivation from document directory names.

use regex::Regex;
use std::sync::LazyLock;

/// Leading `YYYY-MM-DD-` stamp on dated post directories.
static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}-").unwrap());

/// Strip a leading date stamp from a directory name.
///
/// `2024-11-11-tsconfig-options` -> `tsconfig-options`; names without the
/// stamp pass through unchanged.
pub fn strip_date_prefix(dir_name: &str) -> &str {
    match DATE_PREFIX.find(dir_name) {
        Some(m) => &dir_name[m.end()..],
        None => dir_name,
    }
}
