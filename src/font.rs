use std::ops::Range;

/// Bytes per glyph; `FX29` multiplies by this to find a glyph.
pub const GLYPH_SIZE: usize = 5;

/// Where the glyphs live in memory.
pub const MEMORY_RANGE: Range<usize> = 0x000..0x050;

/// Hex digits 0-F, each five rows of a 4-pixel-wide bitmap in the high nibble.
pub const FONT: &[u8] = &[
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_fills_its_range() {
        assert_eq!(FONT.len(), MEMORY_RANGE.len());
        assert_eq!(FONT.len(), 16 * GLYPH_SIZE);
    }

    #[test]
    fn glyphs_only_use_high_nibble() {
        assert!(FONT.iter().all(|row| row & 0x0F == 0));
    }
}
