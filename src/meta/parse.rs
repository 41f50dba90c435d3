//! Tolerant parser for the `+++` metadata block grammar.
//!
//! The block is a flat `key = value` listing with optional `[section]`
//! grouping lines. The parser never fails: a document without a block (or
//! with a malformed one) yields an empty mapping and the full text as body,
//! and malformed lines inside a block are skipped. One bad file must not be
//! able to take down a whole batch run.

use super::{MetaMap, MetaValue};

/// Split a document into its metadata mapping and body.
///
/// Returns an empty mapping and the entire input as body when no
/// well-formed metadata block is present.
pub fn parse_document(raw: &str) -> (MetaMap, &str) {
    match split_metadata(raw) {
        Some((block, body)) => (parse_block(block), body),
        None => (MetaMap::new(), raw),
    }
}

/// Detect the delimited metadata block.
///
/// Recognized only when the text starts with a `+++` line (trailing
/// whitespace allowed) and a matching closing `+++` line follows.
/// Returns `(block, body)` if found.
fn split_metadata(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("+++")?;
    let (first_line, after) = rest.split_once('\n')?;
    if !first_line.trim().is_empty() {
        return None;
    }

    // Scan for a line holding only the closing delimiter. A `++++` line or
    // an inline `+++` does not close the block.
    let mut from = 0;
    loop {
        let pos = from + after[from..].find("\n+++")?;
        let tail = &after[pos + 4..];
        if let Some(nl) = tail.find('\n')
            && tail[..nl].trim().is_empty()
        {
            return Some((&after[..pos], &tail[nl + 1..]));
        }
        from = pos + 1;
    }
}

/// Parse the block's lines into a flat mapping.
fn parse_block(block: &str) -> MetaMap {
    let mut map = MetaMap::new();

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Section headers like `[extra]` group keys in the source grammar
        // but carry no meaning in the flat mapping
        if line.starts_with('[') && line.ends_with(']') {
            continue;
        }

        // Exactly one assignment per line, split on the first `=`;
        // anything else is ignored
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        map.insert(key.trim(), coerce_value(value));
    }

    map
}

/// Coerce a raw value string into a tagged value.
///
/// Trims whitespace and one layer of matching quotes, then tries array and
/// boolean shapes before falling back to a plain string.
fn coerce_value(raw: &str) -> MetaValue {
    let value = strip_quotes(raw.trim());

    if let Some(interior) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        if interior.trim().is_empty() {
            return MetaValue::List(Vec::new());
        }
        let items = interior
            .split(',')
            .map(|item| strip_quotes(item.trim()).to_string())
            .collect();
        return MetaValue::List(items);
    }

    if value.eq_ignore_ascii_case("true") {
        return MetaValue::Bool(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return MetaValue::Bool(false);
    }

    MetaValue::Str(value.to_string())
}

/// Remove a single layer of matching surrounding quotes (`"` or `'`).
fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
