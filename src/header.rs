//! The fixed 16-byte KIF header.
//!
//! ```text
//! offset  size  field
//!      0     4  magic            u32 LE, 0x6B696631 ("kif1")
//!      4     1  bits per pixel   3 = RGB, 4 = RGBA (always 4 when encoding)
//!      5     1  compression      reserved, 0
//!      6     2  palette entries  u16 LE
//!      8     2  width            u16 LE
//!     10     2  height           u16 LE
//!     12     4  rle entries      u32 LE
//! ```
//!
//! The header is followed by `palette entries * 4` bytes of RGBA colors and
//! `rle entries * 2` bytes of (palette index, run length) pairs.

use alloc::vec::Vec;
use log::warn;

use crate::bytes::{read_u8, read_u16_le, read_u32_le};
use crate::error::KifError;

/// Format tag, `'kif1'` read as a little-endian u32.
pub const MAGIC: u32 = 0x6B69_6631;
/// Serialized header size in bytes.
pub const HEADER_LEN: usize = 16;
/// Bytes per serialized palette color (R, G, B, A).
pub const PALETTE_ENTRY_LEN: usize = 4;
/// Bytes per serialized RLE entry (palette index, run length).
pub const RLE_ENTRY_LEN: usize = 2;

const BPP_RGB: u8 = 3;
const BPP_RGBA: u8 = 4;
const COMPRESSION_NONE: u8 = 0;

/// Parsed or to-be-written KIF header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    pub magic: u32,
    /// Palette color depth in bytes: 3 (RGB) or 4 (RGBA).
    pub bits_per_pixel: u8,
    pub compression: u8,
    pub palette_entries: u16,
    pub width: u16,
    pub height: u16,
    pub rle_entries: u32,
}

impl Header {
    /// A canonical header for an image of the given size, with empty palette and RLE counts.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            magic: MAGIC,
            bits_per_pixel: BPP_RGBA,
            compression: COMPRESSION_NONE,
            palette_entries: 0,
            width,
            height,
            rle_entries: 0,
        }
    }

    /// Parse and validate the header at the start of `data`.
    ///
    /// Only the first 16 bytes are read; palette and RLE data are not checked.
    pub fn from_bytes(data: &[u8]) -> Result<Self, KifError> {
        Self::parse(data, false)
    }

    pub(crate) fn parse(data: &[u8], permissive: bool) -> Result<Self, KifError> {
        if data.len() < HEADER_LEN {
            return Err(KifError::UnexpectedEof);
        }
        let header = Self {
            magic: read_u32_le(data, 0)?,
            bits_per_pixel: read_u8(data, 4)?,
            compression: read_u8(data, 5)?,
            palette_entries: read_u16_le(data, 6)?,
            width: read_u16_le(data, 8)?,
            height: read_u16_le(data, 10)?,
            rle_entries: read_u32_le(data, 12)?,
        };
        if permissive {
            header.warn_noncanonical();
        } else {
            header.validate()?;
        }
        Ok(header)
    }

    fn validate(&self) -> Result<(), KifError> {
        if self.magic != MAGIC {
            return Err(KifError::UnrecognizedFormat(self.magic));
        }
        if self.bits_per_pixel != BPP_RGB && self.bits_per_pixel != BPP_RGBA {
            return Err(KifError::InvalidHeader(alloc::format!(
                "bits per pixel must be 3 or 4, got {}",
                self.bits_per_pixel
            )));
        }
        if self.compression != COMPRESSION_NONE {
            return Err(KifError::UnsupportedVariant(alloc::format!(
                "compression method {}",
                self.compression
            )));
        }
        if self.width == 0 {
            return Err(KifError::InvalidHeader("width is zero".into()));
        }
        if self.height == 0 {
            return Err(KifError::InvalidHeader("height is zero".into()));
        }
        Ok(())
    }

    fn warn_noncanonical(&self) {
        if self.magic != MAGIC {
            warn!("kif: accepting unrecognized magic {:#010x}", self.magic);
        }
        if self.compression != COMPRESSION_NONE {
            warn!(
                "kif: ignoring unknown compression method {}",
                self.compression
            );
        }
    }

    /// Serialize to the 16-byte wire layout.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&self.magic.to_le_bytes());
        out[4] = self.bits_per_pixel;
        out[5] = self.compression;
        out[6..8].copy_from_slice(&self.palette_entries.to_le_bytes());
        out[8..10].copy_from_slice(&self.width.to_le_bytes());
        out[10..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..16].copy_from_slice(&self.rle_entries.to_le_bytes());
        out
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }

    /// Number of pixels in the image (`width * height`).
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Byte offset of the first RLE entry.
    pub fn rle_offset(&self) -> usize {
        HEADER_LEN + usize::from(self.palette_entries) * PALETTE_ENTRY_LEN
    }

    /// Total stream length this header declares, or `None` on overflow.
    pub fn encoded_len(&self) -> Option<usize> {
        usize::try_from(self.rle_entries)
            .ok()?
            .checked_mul(RLE_ENTRY_LEN)?
            .checked_add(self.rle_offset())
    }
}
