//! Palette construction and lookup.
//!
//! Index 0 is always transparent black. Remaining entries are the distinct
//! colors of the source image in first-seen order. RLE entries address the
//! palette with a single byte, so a palette never grows past 256 entries.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use enough::Stop;
use log::debug;

use crate::bytes::slice_at;
use crate::error::KifError;
use crate::header::{HEADER_LEN, PALETTE_ENTRY_LEN};

/// One RGBA palette color.
pub type Rgba = [u8; 4];

/// Reserved color at palette index 0.
pub const TRANSPARENT_BLACK: Rgba = [0, 0, 0, 0];

/// Most palette entries an 8-bit RLE index can address.
pub const MAX_PALETTE_ENTRIES: usize = 256;

/// Ordered, deduplicated color table built while encoding.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Rgba>,
    lookup: BTreeMap<Rgba, u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// A palette holding only the reserved transparent black entry.
    pub fn new() -> Self {
        let mut lookup = BTreeMap::new();
        lookup.insert(TRANSPARENT_BLACK, 0);
        Self {
            colors: alloc::vec![TRANSPARENT_BLACK],
            lookup,
        }
    }

    /// Scan RGBA pixels row-major and collect every distinct color.
    ///
    /// `pixels` must be whole rows of `width` RGBA pixels. Fails with
    /// [`KifError::TooManyColors`] as soon as a color would need index 256.
    pub fn build(pixels: &[u8], width: u16, stop: &dyn Stop) -> Result<Self, KifError> {
        let row_bytes = usize::from(width) * 4;
        if row_bytes == 0 || pixels.len() % row_bytes != 0 {
            return Err(KifError::InvalidArgument(alloc::format!(
                "pixel buffer of {} bytes is not whole rows of width {width}",
                pixels.len()
            )));
        }

        let mut palette = Self::new();
        for (row_idx, row) in pixels.chunks_exact(row_bytes).enumerate() {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            for px in row.chunks_exact(4) {
                palette.insert([px[0], px[1], px[2], px[3]])?;
            }
        }
        debug!("kif: palette built with {} entries", palette.len());
        Ok(palette)
    }

    /// Add `color` if it is not present yet, returning its index.
    pub fn insert(&mut self, color: Rgba) -> Result<u8, KifError> {
        if let Some(index) = self.find_index(color) {
            return Ok(index);
        }
        let index = u8::try_from(self.colors.len()).map_err(|_| KifError::TooManyColors {
            max: MAX_PALETTE_ENTRIES,
        })?;
        self.colors.push(color);
        self.lookup.insert(color, index);
        Ok(index)
    }

    /// Index of `color`, or `None` if it was never inserted.
    pub fn find_index(&self, color: Rgba) -> Option<u8> {
        self.lookup.get(&color).copied()
    }

    /// Color stored at `index`.
    pub fn get(&self, index: u8) -> Option<Rgba> {
        self.colors.get(usize::from(index)).copied()
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false: the reserved entry is present from construction.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        for color in &self.colors {
            out.extend_from_slice(color);
        }
    }
}

/// Read `count` palette colors that follow the header.
pub(crate) fn parse_palette(data: &[u8], count: u16) -> Result<Vec<Rgba>, KifError> {
    let bytes = slice_at(data, HEADER_LEN, usize::from(count) * PALETTE_ENTRY_LEN)?;
    Ok(bytes
        .chunks_exact(PALETTE_ENTRY_LEN)
        .map(|c| [c[0], c[1], c[2], c[3]])
        .collect())
}
