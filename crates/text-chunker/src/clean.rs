use once_cell::sync::Lazy;
use regex::Regex;

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize raw document text before chunking.
///
/// Strips square-bracketed markers (transcript annotations, loader error
/// placeholders, citation tags) and collapses whitespace runs to single
/// spaces.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let stripped = BRACKETED.replace_all(text, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_bracketed_markers() {
        assert_eq!(clean_text("hello [Music] world"), "hello world");
        assert_eq!(clean_text("[Error: unavailable]"), "");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_text("a \n\t b\n\nc"), "a b c");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(clean_text("  padded  "), "padded");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(clean_text("plain text"), "plain text");
    }
}
