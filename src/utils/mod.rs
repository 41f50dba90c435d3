//! Small formatting helpers for diagnostics.

/// Format a count with its noun, handling pluralization
///
/// - `plural_count(0, "record")` -> `"0 records"`
/// - `plural_count(1, "record")` -> `"1 record"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}

/// Format a byte count for display.
///
/// Index files are small, so bytes and KB cover the useful range.
#[inline]
pub fn human_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "record"), "0 records");
        assert_eq!(plural_count(1, "record"), "1 record");
        assert_eq!(plural_count(5, "record"), "5 records");
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
        assert_eq!(human_size(1024), "1.0 KB");
        assert_eq!(human_size(12_660), "12.4 KB");
    }
}
