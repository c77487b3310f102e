//! # zenkif
//!
//! Decoder and encoder for KIF ("Kompakt Icon Format"), a tiny palette-indexed,
//! run-length encoded bitmap format for icons.
//!
//! ## Format
//!
//! A KIF stream is a 16-byte little-endian [`Header`], a palette of RGBA
//! colors (4 bytes each), and a list of `(palette index, run length)` byte
//! pairs covering the image row by row. Palette index 0 is always transparent
//! black. Indices are one byte wide, so an image can use at most 255 colors
//! besides the reserved entry; the encoder rejects anything larger with
//! [`KifError::TooManyColors`] instead of writing unreachable palette slots.
//!
//! ## Non-Goals
//!
//! - Compression methods other than plain RLE (the header byte is reserved)
//! - Streaming or incremental decode
//! - Palettes wider than 8-bit indices can address
//!
//! ## Usage
//!
//! ```
//! use zenkif::{decode, encode};
//!
//! // 3x1: red, red, translucent blue
//! let pixels = [255, 0, 0, 255, 255, 0, 0, 255, 0, 0, 255, 128];
//! let (data, header) = encode(&pixels, 3, 1)?;
//! assert_eq!(header.palette_entries, 3);
//! assert_eq!(header.rle_entries, 2);
//!
//! let (rgba, _) = decode(&data, 32)?;
//! assert_eq!(rgba, pixels);
//!
//! let (rgb, _) = decode(&data, 24)?;
//! assert_eq!(rgb, [255, 0, 0, 255, 0, 0, 0, 0, 255]);
//! # Ok::<(), zenkif::KifError>(())
//! ```
//!
//! [`DecodeRequest`] and [`EncodeRequest`] expose the same pipeline with
//! [`Limits`], permissive header parsing, RGB input and cancellation through
//! [`Stop`].

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bytes;
mod decode;
mod encode;
mod error;
#[cfg(feature = "std")]
mod fs;
mod header;
mod limits;
mod palette;
mod pixel;
mod rle;
#[cfg(test)]
mod testing;

use alloc::vec::Vec;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::KifError;
#[cfg(feature = "std")]
pub use fs::{read_file, write_file};
pub use header::{HEADER_LEN, Header, MAGIC, PALETTE_ENTRY_LEN, RLE_ENTRY_LEN};
pub use limits::Limits;
pub use palette::{MAX_PALETTE_ENTRIES, Palette, Rgba, TRANSPARENT_BLACK};
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;
pub use rle::{MAX_RUN, RleEntry};

/// Encode `width * height` RGBA pixels into a KIF stream.
///
/// The returned header always carries the canonical magic, 4 bytes per
/// palette color and no compression.
pub fn encode(pixels: &[u8], width: u16, height: u16) -> Result<(Vec<u8>, Header), KifError> {
    EncodeRequest::new().encode(pixels, width, height, PixelLayout::Rgba8, Unstoppable)
}

/// Decode a KIF stream to 24-bit RGB or 32-bit RGBA pixels.
pub fn decode(data: &[u8], output_bits_per_pixel: u8) -> Result<(Vec<u8>, Header), KifError> {
    let decoded = DecodeRequest::new(data)
        .with_bits_per_pixel(output_bits_per_pixel)?
        .decode(Unstoppable)?;
    Ok(decoded.into_parts())
}

/// Read the palette and RLE entries of a stream without expanding pixels.
pub fn read_entries(data: &[u8]) -> Result<(Header, Vec<Rgba>, Vec<RleEntry>), KifError> {
    let header = Header::from_bytes(data)?;
    let palette = palette::parse_palette(data, header.palette_entries)?;
    let entries = rle::entries(rle::rle_bytes(data, &header)?).collect();
    Ok((header, palette, entries))
}
