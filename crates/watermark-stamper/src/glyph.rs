//! Fixed 8x8 monochrome glyphs keyed by character.

use std::collections::HashMap;

use watermark_types::{config::GlyphSpec, Result, WatermarkError};

pub const GLYPH_SIZE: usize = 8;

/// Eight row bytes; bit 7 of each byte is column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    rows: [u8; GLYPH_SIZE],
}

impl Glyph {
    pub const fn from_rows(rows: [u8; GLYPH_SIZE]) -> Self {
        Self { rows }
    }

    pub fn is_set(&self, col: usize, row: usize) -> bool {
        if col >= GLYPH_SIZE || row >= GLYPH_SIZE {
            return false;
        }
        self.rows[row] & (0x80 >> col) != 0
    }

    /// Set cells as `(col, row)` pairs in row-major order.
    pub fn lit(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..GLYPH_SIZE).flat_map(move |row| {
            (0..GLYPH_SIZE)
                .filter(move |&col| self.is_set(col, row))
                .map(move |col| (col, row))
        })
    }
}

pub const GLYPH_A: Glyph = Glyph::from_rows([
    0b0111_1110,
    0b1000_0001,
    0b1000_0001,
    0b1111_1111,
    0b1000_0001,
    0b1000_0001,
    0b1000_0001,
    0b1000_0001,
]);

#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    glyphs: HashMap<char, Glyph>,
}

impl GlyphTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table with the glyphs shipped in the binary; currently only `A`.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert('A', GLYPH_A);
        table
    }

    pub fn insert(&mut self, ch: char, glyph: Glyph) -> Option<Glyph> {
        self.glyphs.insert(ch, glyph)
    }

    pub fn lookup(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Built-in table extended (or overridden) by configured glyphs.
    pub fn with_specs(specs: &[GlyphSpec]) -> Result<Self> {
        let mut table = Self::builtin();
        for spec in specs {
            let mut chars = spec.character.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(WatermarkError::Configuration(format!(
                    "glyph character {:?} must be exactly one character",
                    spec.character
                )));
            };
            table.insert(ch, Glyph::from_rows(spec.rows));
        }
        Ok(table)
    }
}
