//! File convenience wrappers (requires the `std` feature).

use std::io;
use std::path::Path;

use alloc::vec::Vec;

use enough::Unstoppable;
use log::debug;

use crate::decode::DecodeRequest;
use crate::encode::EncodeRequest;
use crate::error::KifError;
use crate::header::Header;
use crate::pixel::PixelLayout;

/// Read and decode a `.kif` file.
///
/// The whole file is read in one call. A missing, unreadable or empty file
/// is reported as [`KifError::Io`].
pub fn read_file(
    path: impl AsRef<Path>,
    output_bits_per_pixel: u8,
) -> Result<(Vec<u8>, Header), KifError> {
    let path = path.as_ref();
    let layout = PixelLayout::from_bits_per_pixel(output_bits_per_pixel).ok_or_else(|| {
        KifError::InvalidArgument(alloc::format!(
            "output bits per pixel must be 24 or 32, got {output_bits_per_pixel}"
        ))
    })?;
    let data = std::fs::read(path)?;
    if data.is_empty() {
        return Err(KifError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            alloc::format!("{} is empty", path.display()),
        )));
    }
    debug!("kif: read {} bytes from {}", data.len(), path.display());
    let decoded = DecodeRequest::new(&data)
        .with_layout(layout)
        .decode(Unstoppable)?;
    Ok(decoded.into_parts())
}

/// Encode RGBA `pixels` using the width and height from `header` and write
/// them to `path` in a single write.
///
/// Magic, bit depth, compression and the palette/RLE counts are always
/// recomputed; only the dimensions are taken from `header`. Returns the
/// number of bytes written.
pub fn write_file(
    path: impl AsRef<Path>,
    pixels: &[u8],
    header: &Header,
) -> Result<usize, KifError> {
    let path = path.as_ref();
    let (data, _) = EncodeRequest::new().encode(
        pixels,
        header.width,
        header.height,
        PixelLayout::Rgba8,
        Unstoppable,
    )?;
    std::fs::write(path, &data)?;
    debug!("kif: wrote {} bytes to {}", data.len(), path.display());
    Ok(data.len())
}
