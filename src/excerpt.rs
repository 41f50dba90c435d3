//! Body normalization: reduce marked-up text to a searchable excerpt.
//!
//! The output is a single line of plain text with all markup constructs
//! removed, hard-capped at [`EXCERPT_LIMIT`] characters. It feeds substring
//! matching in the client-side search engine, so readability at the cut
//! point does not matter; keeping the index file small does.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum excerpt length in characters.
pub const EXCERPT_LIMIT: usize = 800;

// Strip passes run in a fixed order. Code is removed before tag/link
// handling so markup-looking text inside code never leaks through, and
// images are removed before links so image alt text is not kept as if it
// were a link label.
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]+`").unwrap());
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static IMAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+[ \t\r\n\f\v]+").unwrap());
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_]{1,2}([^*_]+)[*_]{1,2}").unwrap());
static BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^>[ \t\r\n\f\v]+").unwrap());
static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\r\n\f\v]+").unwrap());

/// Reduce a document body to a bounded plain-text excerpt.
pub fn normalize_body(body: &str) -> String {
    let text = FENCED_CODE.replace_all(body, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = HTML_TAG.replace_all(&text, "");
    let text = IMAGE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    let text = EMPHASIS.replace_all(&text, "$1");
    let text = BLOCKQUOTE.replace_all(&text, "");
    let text = NEWLINES.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");

    truncate_chars(text.trim())
}

/// Hard cut at [`EXCERPT_LIMIT`] characters (not bytes), no ellipsis.
fn truncate_chars(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LIMIT) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_code_removed_with_content() {
        let body = "before\n```rust\nlet x = 1;\n```\nafter";
        assert_eq!(normalize_body(body), "before after");
    }

    #[test]
    fn test_inline_code_removed_with_content() {
        assert_eq!(normalize_body("use `tsc --init` to start"), "use to start");
    }

    #[test]
    fn test_html_tags_removed() {
        assert_eq!(
            normalize_body("a <div class=\"x\">styled</div> block"),
            "a styled block"
        );
    }

    #[test]
    fn test_link_keeps_label() {
        assert_eq!(
            normalize_body("see [the docs](https://example.com) here"),
            "see the docs here"
        );
    }

    #[test]
    fn test_image_removed_entirely() {
        assert_eq!(normalize_body("before ![a chart](chart.png) after"), "before after");
        assert_eq!(normalize_body("before ![](decor.png) after"), "before after");
    }

    #[test]
    fn test_headers_stripped() {
        assert_eq!(
            normalize_body("# Title\n\n## Section\n\ntext"),
            "Title Section text"
        );
    }

    #[test]
    fn test_emphasis_keeps_inner_text() {
        assert_eq!(normalize_body("Some **bold** text."), "Some bold text.");
        assert_eq!(normalize_body("an _italic_ word"), "an italic word");
        assert_eq!(normalize_body("a *starred* word"), "a starred word");
    }

    #[test]
    fn test_blockquote_marker_stripped() {
        assert_eq!(normalize_body("> quoted line\nplain"), "quoted line plain");
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        assert_eq!(normalize_body("  a\n\n\nb\t\tc  "), "a b c");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let body = "# Title\n\nSome **bold** and `code` and [a link](x) plus\n\n\
                    ```\nfenced\n```\n\n> a quote with _emphasis_\n\n![img](y)";
        let once = normalize_body(body);
        let twice = normalize_body(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_truncation_at_limit() {
        let body = "x".repeat(EXCERPT_LIMIT + 100);
        assert_eq!(normalize_body(&body).chars().count(), EXCERPT_LIMIT);

        let short = "y".repeat(EXCERPT_LIMIT);
        assert_eq!(normalize_body(&short).chars().count(), EXCERPT_LIMIT);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let body = "é".repeat(EXCERPT_LIMIT + 10);
        let excerpt = normalize_body(&body);
        assert_eq!(excerpt.chars().count(), EXCERPT_LIMIT);
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(normalize_body("plain sentence."), "plain sentence.");
    }
}
