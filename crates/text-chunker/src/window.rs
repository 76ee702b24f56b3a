use crate::config::ChunkerConfig;
use crate::error::Result;

/// Sliding-window chunker over raw text
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a new chunker with validated configuration
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Access the active configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Lazily iterate over the window slices of `text`.
    ///
    /// Offsets are counted in characters, not bytes, so multi-byte text is
    /// never split inside a code point. Empty text yields no chunks; text
    /// shorter than the window yields exactly one chunk equal to the whole
    /// text. The iterator is `Clone`, so a traversal can be restarted.
    #[must_use]
    pub fn windows<'a>(&self, text: &'a str) -> Windows<'a> {
        Windows {
            rest: text,
            window: self.config.window,
            stride: self.config.stride,
        }
    }

    /// Collect all window slices into owned strings
    #[must_use]
    pub fn chunk_str(&self, text: &str) -> Vec<String> {
        self.windows(text).map(str::to_string).collect()
    }
}

/// Iterator over overlapping window slices of a text
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    rest: &'a str,
    window: usize,
    stride: usize,
}

impl<'a> Iterator for Windows<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let end = char_boundary(self.rest, self.window);
        let chunk = &self.rest[..end];

        let advance = char_boundary(self.rest, self.stride);
        if advance == self.rest.len() {
            // Fewer than `stride` characters remain; the next offset would
            // fall at or past the end of the text.
            self.rest = "";
        } else {
            self.rest = &self.rest[advance..];
        }

        Some(chunk)
    }
}

/// Byte index of the `nchars`-th character of `s`, or `s.len()` if `s` is
/// shorter than that.
fn char_boundary(s: &str, nchars: usize) -> usize {
    s.char_indices()
        .nth(nchars)
        .map_or(s.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunker(window: usize, stride: usize) -> Chunker {
        Chunker::new(ChunkerConfig { window, stride }).unwrap()
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let chunks: Vec<&str> = chunker(500, 450).windows("").collect();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_text_yields_single_chunk() {
        let chunks: Vec<&str> = chunker(500, 450).windows("hello world").collect();
        assert_eq!(chunks, vec!["hello world"]);
    }

    #[test]
    fn test_overlapping_windows() {
        let chunks: Vec<&str> = chunker(5, 3).windows("abcdefghij").collect();
        // Offsets 0, 3, 6, 9.
        assert_eq!(chunks, vec!["abcde", "defgh", "ghij", "j"]);
    }

    #[test]
    fn test_text_exactly_window_length() {
        // Offset `stride` is still inside the text, so a trailing overlap
        // chunk is emitted.
        let chunks: Vec<&str> = chunker(4, 3).windows("abcd").collect();
        assert_eq!(chunks, vec!["abcd", "d"]);
    }

    #[test]
    fn test_no_overlap_when_stride_equals_window() {
        let chunks: Vec<&str> = chunker(3, 3).windows("abcdefgh").collect();
        assert_eq!(chunks, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "héllo wörld ünïcode";
        let chunks: Vec<&str> = chunker(6, 4).windows(text).collect();
        assert_eq!(chunks[0], "héllo ");
        assert_eq!(chunks[0].chars().count(), 6);
        let rebuilt: String = chunker(6, 6).windows(text).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_iterator_is_restartable() {
        let c = chunker(5, 3);
        let windows = c.windows("abcdefghij");
        let first: Vec<&str> = windows.clone().collect();
        let second: Vec<&str> = windows.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_chunk_str_matches_windows() {
        let c = chunker(5, 3);
        let owned = c.chunk_str("abcdefghij");
        let borrowed: Vec<&str> = c.windows("abcdefghij").collect();
        assert_eq!(owned, borrowed);
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let c = chunker(500, 450);
        let text: String = std::iter::repeat("lorem ipsum dolor sit amet ")
            .take(50)
            .collect();
        let chunks: Vec<&str> = c.windows(&text).collect();
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(450).collect();
            let head: String = pair[1].chars().take(tail.chars().count()).collect();
            assert_eq!(tail, head);
        }
    }
}
