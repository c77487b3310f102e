//! Run-length coding over palette indices.

use alloc::vec::Vec;
use enough::Stop;
use log::debug;

use crate::bytes::slice_at;
use crate::error::KifError;
use crate::header::{Header, RLE_ENTRY_LEN};
use crate::palette::{Palette, Rgba};
use crate::pixel::PixelLayout;

/// Longest run a single entry can describe.
pub const MAX_RUN: usize = 255;

/// Decoder polls the stop token once per this many entries.
const DECODE_CHECK_INTERVAL: usize = 1024;

/// One (palette index, run length) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RleEntry {
    pub index: u8,
    pub run: u8,
}

impl RleEntry {
    pub fn to_bytes(self) -> [u8; RLE_ENTRY_LEN] {
        [self.index, self.run]
    }
}

/// Replace runs of identical RGBA pixels with palette-indexed entries.
///
/// Every color in `pixels` must already be in `palette`. The run lengths of
/// the result sum to the pixel count.
pub(crate) fn encode_runs(
    pixels: &[u8],
    width: u16,
    palette: &Palette,
    stop: &dyn Stop,
) -> Result<Vec<RleEntry>, KifError> {
    let check_every = usize::from(width).max(1) * 16;
    let mut next_check = 0usize;
    let mut consumed = 0usize;
    let mut entries = Vec::new();

    let mut colors = pixels
        .chunks_exact(4)
        .map(|c| [c[0], c[1], c[2], c[3]])
        .peekable();

    while let Some(color) = colors.next() {
        if consumed >= next_check {
            stop.check()?;
            next_check = consumed + check_every;
        }
        let mut run = 1usize;
        while run < MAX_RUN && colors.next_if_eq(&color).is_some() {
            run += 1;
        }
        let index = palette
            .find_index(color)
            .ok_or(KifError::ColorNotInPalette(color))?;
        entries.push(RleEntry {
            index,
            run: run as u8,
        });
        consumed += run;
    }

    debug!(
        "kif: {} pixels encoded as {} runs",
        consumed,
        entries.len()
    );
    Ok(entries)
}

/// Borrow the RLE section declared by `header`.
pub(crate) fn rle_bytes<'a>(data: &'a [u8], header: &Header) -> Result<&'a [u8], KifError> {
    let len = usize::try_from(header.rle_entries)
        .ok()
        .and_then(|n| n.checked_mul(RLE_ENTRY_LEN))
        .ok_or(KifError::UnexpectedEof)?;
    slice_at(data, header.rle_offset(), len)
}

/// Iterate the entries of a raw RLE section.
pub(crate) fn entries(rle: &[u8]) -> impl Iterator<Item = RleEntry> + '_ {
    rle.chunks_exact(RLE_ENTRY_LEN).map(|e| RleEntry {
        index: e[0],
        run: e[1],
    })
}

/// Expand RLE entries into exactly `pixel_count` pixels of `layout`.
pub(crate) fn decode_runs(
    rle: &[u8],
    palette: &[Rgba],
    pixel_count: usize,
    layout: PixelLayout,
    stop: &dyn Stop,
) -> Result<Vec<u8>, KifError> {
    let bpp = layout.bytes_per_pixel();
    let out_len = pixel_count
        .checked_mul(bpp)
        .ok_or_else(|| KifError::InvalidData("output size overflows".into()))?;
    // Reserve only what the entries can actually produce.
    let declared: usize = entries(rle).map(|e| usize::from(e.run)).sum();
    let mut out = Vec::with_capacity(out_len.min(declared.saturating_mul(bpp)));
    let mut covered = 0usize;

    for (i, entry) in entries(rle).enumerate() {
        if i % DECODE_CHECK_INTERVAL == 0 {
            stop.check()?;
        }
        let color = palette
            .get(usize::from(entry.index))
            .ok_or(KifError::PaletteIndexOutOfRange {
                index: entry.index,
                palette_len: palette.len(),
            })?;
        let run = usize::from(entry.run);
        if covered + run > pixel_count {
            return Err(KifError::InvalidData(alloc::format!(
                "run at entry {i} overflows image of {pixel_count} pixels"
            )));
        }
        for _ in 0..run {
            out.extend_from_slice(&color[..bpp]);
        }
        covered += run;
    }

    if covered < pixel_count {
        return Err(KifError::TruncatedData {
            expected: pixel_count,
            covered,
        });
    }
    Ok(out)
}
