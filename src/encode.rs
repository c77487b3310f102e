use alloc::borrow::Cow;
use alloc::vec::Vec;
use enough::Stop;
use log::trace;

use crate::error::KifError;
use crate::header::{HEADER_LEN, Header, PALETTE_ENTRY_LEN, RLE_ENTRY_LEN};
use crate::limits::Limits;
use crate::palette::Palette;
use crate::pixel::PixelLayout;
use crate::rle;

/// Builder for encoding pixels as KIF.
///
/// ```
/// use zenkif::{EncodeRequest, PixelLayout, Unstoppable};
///
/// let pixels = [255u8, 0, 0, 255].repeat(4);
/// let (data, header) = EncodeRequest::new()
///     .encode(&pixels, 2, 2, PixelLayout::Rgba8, Unstoppable)?;
/// assert_eq!(header.palette_entries, 2);
/// assert_eq!(data.len(), 16 + 2 * 4 + 2);
/// # Ok::<(), zenkif::KifError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    pub fn new() -> Self {
        Self { limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Encode `pixels` (tightly packed rows of `layout`) into a KIF stream.
    ///
    /// `Rgb8` input is treated as fully opaque. Returns the stream and the
    /// header written at its start.
    pub fn encode(
        &self,
        pixels: &[u8],
        width: u16,
        height: u16,
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<(Vec<u8>, Header), KifError> {
        if width == 0 || height == 0 {
            return Err(KifError::InvalidArgument(alloc::format!(
                "image dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = usize::from(width)
            .checked_mul(usize::from(height))
            .and_then(|wh| wh.checked_mul(layout.bytes_per_pixel()))
            .ok_or(KifError::DimensionsTooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(KifError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        if let Some(limits) = self.limits {
            limits.check(width, height)?;
        }
        stop.check()?;

        let rgba = to_rgba(pixels, layout);
        let palette = Palette::build(&rgba, width, &stop)?;
        let runs = rle::encode_runs(&rgba, width, &palette, &stop)?;

        let header = Header {
            palette_entries: u16::try_from(palette.len()).map_err(|_| {
                KifError::TooManyColors {
                    max: crate::palette::MAX_PALETTE_ENTRIES,
                }
            })?,
            rle_entries: u32::try_from(runs.len())
                .map_err(|_| KifError::DimensionsTooLarge { width, height })?,
            ..Header::new(width, height)
        };

        let total = HEADER_LEN + palette.len() * PALETTE_ENTRY_LEN + runs.len() * RLE_ENTRY_LEN;
        if let Some(limits) = self.limits {
            limits.check_memory(total)?;
        }
        let mut out = Vec::with_capacity(total);
        header.write_to(&mut out);
        palette.write_to(&mut out);
        for entry in &runs {
            out.extend_from_slice(&entry.to_bytes());
        }
        trace!(
            "kif: encoded {}x{} into {} bytes ({} colors, {} runs)",
            width,
            height,
            out.len(),
            palette.len(),
            runs.len()
        );
        Ok((out, header))
    }

    /// Encode typed pixels (`RGB8` or `RGBA8`).
    #[cfg(feature = "rgb")]
    pub fn encode_pixels<P: crate::DecodePixel>(
        &self,
        pixels: &[P],
        width: u16,
        height: u16,
        stop: impl Stop,
    ) -> Result<(Vec<u8>, Header), KifError>
    where
        [P]: rgb::ComponentBytes<u8>,
    {
        use rgb::ComponentBytes;
        self.encode(pixels.as_bytes(), width, height, P::layout(), stop)
    }
}

fn to_rgba(pixels: &[u8], layout: PixelLayout) -> Cow<'_, [u8]> {
    match layout {
        PixelLayout::Rgba8 => Cow::Borrowed(pixels),
        PixelLayout::Rgb8 => Cow::Owned(
            pixels
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
        ),
    }
}
