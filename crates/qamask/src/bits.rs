//! Low-level helpers for bit ranges inside a quality word.
//!
//! Bits are addressed LSB-first: bit 0 is the least significant bit of the word.
//! Bit strings are written MSB-first, so the rightmost character is the lowest bit.

/// Returns a mask with the low `n` bits set (`n` up to 32).
pub fn low_mask(n: u32) -> u32 {
    debug_assert!(n <= 32);
    ((1u64 << n) - 1) as u32
}

/// Largest category of a `word_bits` wide word, i.e. `2^word_bits - 1`.
pub fn max_category(word_bits: u32) -> u32 {
    low_mask(word_bits)
}

/// Reads the `len` bits starting at bit `offset` of `word`.
pub fn extract_bits(word: u32, offset: u32, len: u32) -> u32 {
    ((u64::from(word) >> offset) as u32) & low_mask(len)
}

/// Parses an MSB-first bit string of exactly `len` characters.
pub fn parse_bit_string(bits: &str, len: u32) -> Option<u32> {
    if bits.len() != len as usize || len > 32 {
        return None;
    }

    let mut value = 0u32;
    for c in bits.chars() {
        let bit = match c {
            '0' => 0,
            '1' => 1,
            _ => return None,
        };
        value = (value << 1) | bit;
    }

    Some(value)
}

/// Renders the low `len` bits of `value` as an MSB-first, zero-padded bit string.
pub fn format_bits(value: u32, len: u32) -> String {
    (0..len)
        .rev()
        .map(|i| if (value >> i) & 1 == 1 { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_mask() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(2), 0b11);
        assert_eq!(low_mask(32), u32::MAX);
    }

    #[test]
    fn test_max_category() {
        assert_eq!(max_category(16), 65535);
    }

    #[test]
    fn test_extract_bits() {
        let word = 0b0000_0011_0000_0001;
        assert_eq!(extract_bits(word, 0, 1), 1);
        assert_eq!(extract_bits(word, 8, 2), 0b11);
        assert_eq!(extract_bits(word, 10, 2), 0);
    }

    #[test]
    fn test_extract_top_bits_of_32_bit_word() {
        assert_eq!(extract_bits(u32::MAX, 30, 2), 0b11);
        assert_eq!(extract_bits(u32::MAX, 0, 32), u32::MAX);
    }

    #[test]
    fn test_parse_bit_string() {
        assert_eq!(parse_bit_string("10", 2), Some(0b10));
        assert_eq!(parse_bit_string("1", 1), Some(1));
        assert_eq!(parse_bit_string("0", 1), Some(0));
    }

    #[test]
    fn test_parse_bit_string_rejects_wrong_width() {
        assert_eq!(parse_bit_string("1", 2), None);
        assert_eq!(parse_bit_string("011", 2), None);
    }

    #[test]
    fn test_parse_bit_string_rejects_non_binary() {
        assert_eq!(parse_bit_string("12", 2), None);
        assert_eq!(parse_bit_string("", 0), Some(0));
    }

    #[test]
    fn test_format_bits() {
        assert_eq!(format_bits(5, 16), "0000000000000101");
        assert_eq!(format_bits(0b10, 2), "10");
    }

    #[test]
    fn test_slice_of_formatted_word_matches_extract() {
        // Slicing `W - offset - len .. W - offset` of the rendered word picks the same bits.
        let word = 0b1011_0110_0101_1100u32;
        let rendered = format_bits(word, 16);
        for (offset, len) in [(0, 1), (3, 1), (8, 2), (14, 2)] {
            let start = (16 - offset - len) as usize;
            let end = (16 - offset) as usize;
            assert_eq!(&rendered[start..end], format_bits(extract_bits(word, offset, len), len));
        }
    }
}
