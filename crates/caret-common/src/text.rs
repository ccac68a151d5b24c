//! Conversions between UTF-16 offsets and byte offsets.
//!
//! Rust strings are indexed by byte, everything the engine hands out is
//! measured in UTF-16 code units.

/// Byte index of the UTF-16 `offset` in `text`, clamped to `text.len()`.
///
/// An offset that falls inside a surrogate pair rounds up to the next char
/// boundary.
pub fn utf16_to_byte(text: &str, offset: u32) -> usize {
    let mut units = 0u32;
    for (byte_idx, ch) in text.char_indices() {
        if units >= offset {
            return byte_idx;
        }
        units += ch.len_utf16() as u32;
    }
    text.len()
}

/// UTF-16 offset of the byte index `byte` in `text`.
pub fn byte_to_utf16(text: &str, byte: usize) -> u32 {
    let byte = byte.min(text.len());
    text[..floor_char_boundary(text, byte)]
        .chars()
        .map(|ch| ch.len_utf16() as u32)
        .sum()
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> u32 {
    text.chars().map(|ch| ch.len_utf16() as u32).sum()
}

fn floor_char_boundary(text: &str, mut byte: usize) -> usize {
    while byte > 0 && !text.is_char_boundary(byte) {
        byte -= 1;
    }
    byte
}
