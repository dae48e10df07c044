//! Fixed-size text chunking.

/// Split `text` into contiguous slices of at most `max_chars` characters.
///
/// Slices never split a UTF-8 code point, keep the original order, and
/// concatenate back to `text` exactly. Empty input yields no chunks. A
/// `max_chars` of zero is treated as one.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}
