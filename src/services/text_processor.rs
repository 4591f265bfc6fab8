// Text Processing Service
// Splits documents into chunks the detector will accept

use serde::{Deserialize, Serialize};

/// How oversized documents are cut into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentationMode {
    /// Chunks of exactly `max_chars`, last one shorter, never empty.
    #[default]
    Normalized,
    /// Chunks of `max_chars + 1` followed by whatever is left, even if empty.
    /// Reproduces the boundaries older releases sent to the detector.
    Legacy,
}

/// Character count, not byte length
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Whether a document must be split before detection
pub fn exceeds_threshold(text: &str, max_chars: usize) -> bool {
    char_len(text) > max_chars
}

/// Split text into ordered, contiguous chunks.
///
/// Text at or under `max_chars` characters is returned as a single chunk,
/// including the empty string. Concatenating the output always gives back
/// the input.
pub fn segment_text(text: &str, max_chars: usize, mode: SegmentationMode) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if !exceeds_threshold(text, max_chars) {
        return vec![text.to_string()];
    }

    match mode {
        SegmentationMode::Normalized => segment_normalized(text, max_chars),
        SegmentationMode::Legacy => segment_legacy(text, max_chars),
    }
}

fn segment_normalized(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(text[start..idx].to_string());
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(text[start..].to_string());
    }

    chunks
}

fn segment_legacy(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut segment = String::new();
    let mut count = 0;

    for ch in text.chars() {
        segment.push(ch);
        count += 1;
        if count > max_chars {
            chunks.push(std::mem::take(&mut segment));
            count = 0;
        }
    }

    chunks.push(segment);
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let text = "AI wrote this. Humans wrote that.";
        for mode in [SegmentationMode::Normalized, SegmentationMode::Legacy] {
            assert_eq!(segment_text(text, 10_000, mode), vec![text.to_string()]);
        }
    }

    #[test]
    fn test_exact_threshold_single_chunk() {
        let text = "a".repeat(10);
        assert_eq!(segment_text(&text, 10, SegmentationMode::Normalized), vec![text.clone()]);
        assert_eq!(segment_text(&text, 10, SegmentationMode::Legacy), vec![text]);
    }

    #[test]
    fn test_empty_text_single_chunk() {
        assert_eq!(segment_text("", 10, SegmentationMode::Normalized), vec![String::new()]);
    }

    #[test]
    fn test_normalized_boundaries() {
        let text = "abcdefghijklmnopqrstuvw"; // 23 chars
        let chunks = segment_text(text, 10, SegmentationMode::Normalized);
        assert_eq!(chunks, vec!["abcdefghij", "klmnopqrst", "uvw"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_normalized_exact_multiple_has_no_empty_tail() {
        let text = "a".repeat(30);
        let chunks = segment_text(&text, 10, SegmentationMode::Normalized);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| char_len(c) == 10));
    }

    #[test]
    fn test_legacy_boundaries() {
        let text = "abcdefghijklmnopqrstuvw"; // 23 chars
        let chunks = segment_text(text, 10, SegmentationMode::Legacy);
        assert_eq!(chunks, vec!["abcdefghijk", "lmnopqrstuv", "w"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_legacy_trailing_empty_chunk() {
        let text = "a".repeat(22);
        let chunks = segment_text(&text, 10, SegmentationMode::Legacy);
        assert_eq!(chunks.len(), 3);
        assert_eq!(char_len(&chunks[0]), 11);
        assert_eq!(char_len(&chunks[1]), 11);
        assert!(chunks[2].is_empty());
    }

    #[test]
    fn test_multibyte_chars_counted_once() {
        let text = "日本語のテキストです。".repeat(3); // 33 chars
        let chunks = segment_text(&text, 10, SegmentationMode::Normalized);
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| char_len(c) <= 10));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_round_trip_long_text() {
        let text: String = (0..25_000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        for mode in [SegmentationMode::Normalized, SegmentationMode::Legacy] {
            let chunks = segment_text(&text, 10_000, mode);
            assert!(chunks.len() >= 3);
            assert_eq!(chunks.concat(), text);
        }
    }
}
