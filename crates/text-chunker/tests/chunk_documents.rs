use pretty_assertions::assert_eq;
use recall_text_chunker::{clean_text, Chunker, ChunkerConfig};

#[test]
fn cleaned_transcript_chunks_cover_the_whole_text() {
    let raw = "[Music] The cat sat on the mat. \n\n [Applause] Dogs bark \t loudly at night. ";
    let cleaned = clean_text(raw);
    assert_eq!(
        cleaned,
        "The cat sat on the mat. Dogs bark loudly at night."
    );

    let chunker = Chunker::new(ChunkerConfig {
        window: 30,
        stride: 20,
    })
    .unwrap();
    let chunks = chunker.chunk_str(&cleaned);
    assert!(chunks.len() > 1);

    // Stride-aligned prefixes reassemble the original text exactly.
    let reassembled: String = chunks
        .iter()
        .map(|chunk| chunk.chars().take(20).collect::<String>())
        .collect();
    assert_eq!(reassembled, cleaned);

    // No chunk exceeds the window, and consecutive chunks overlap by
    // window - stride characters.
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 30);
    }
    for pair in chunks.windows(2) {
        let tail: String = pair[0].chars().skip(20).collect();
        assert!(pair[1].starts_with(&tail));
    }
}

#[test]
fn default_config_matches_reference_window() {
    let chunker = Chunker::new(ChunkerConfig::default()).unwrap();
    assert_eq!(chunker.config().window, 500);
    assert_eq!(chunker.config().stride, 450);

    let text = "a".repeat(1000);
    let chunks = chunker.chunk_str(&text);
    // Offsets 0, 450, 900.
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].len(), 500);
    assert_eq!(chunks[2].len(), 100);
}
