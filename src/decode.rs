use alloc::vec::Vec;
use enough::Stop;
use log::{trace, warn};

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::KifError;
use crate::header::Header;
use crate::limits::Limits;
use crate::palette::parse_palette;
use crate::pixel::PixelLayout;
use crate::rle;

/// Decoded image output.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub header: Header,
    pub layout: PixelLayout,
}

impl DecodeOutput {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Split into the pixel buffer and the parsed header.
    pub fn into_parts(self) -> (Vec<u8>, Header) {
        (self.pixels, self.header)
    }

    pub fn width(&self) -> u16 {
        self.header.width
    }

    pub fn height(&self) -> u16 {
        self.header.height
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`crate::KifError::InvalidArgument`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], KifError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(KifError::InvalidArgument(alloc::format!(
                "decoded layout is {:?}, requested {:?}",
                self.layout,
                P::layout()
            )));
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, KifError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            usize::from(self.header.width),
            usize::from(self.header.height),
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, KifError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            usize::from(self.header.width),
            usize::from(self.header.height),
        ))
    }
}

/// Builder for decoding a KIF stream.
///
/// ```no_run
/// use zenkif::{DecodeRequest, PixelLayout, Unstoppable};
///
/// let data: &[u8] = &[]; // your .kif bytes
/// let decoded = DecodeRequest::new(data)
///     .with_layout(PixelLayout::Rgb8)
///     .decode(Unstoppable)?;
/// println!("{}x{}", decoded.width(), decoded.height());
/// # Ok::<(), zenkif::KifError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    layout: PixelLayout,
    limits: Option<&'a Limits>,
    permissive: bool,
}

impl<'a> DecodeRequest<'a> {
    /// Decode `data` to RGBA with strict header checks and no limits.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            layout: PixelLayout::Rgba8,
            limits: None,
            permissive: false,
        }
    }

    /// Output pixel layout (RGB drops the alpha channel).
    pub fn with_layout(mut self, layout: PixelLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Output bit depth, 24 or 32.
    pub fn with_bits_per_pixel(mut self, bits: u8) -> Result<Self, KifError> {
        self.layout = PixelLayout::from_bits_per_pixel(bits).ok_or_else(|| {
            KifError::InvalidArgument(alloc::format!(
                "output bits per pixel must be 24 or 32, got {bits}"
            ))
        })?;
        Ok(self)
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Accept any magic, bit depth, compression byte and zero dimensions.
    ///
    /// Palette, RLE and coverage checks still apply.
    pub fn permissive(mut self) -> Self {
        self.permissive = true;
        self
    }

    /// Decode the stream.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, KifError> {
        let data = self.data;
        let header = Header::parse(data, self.permissive)?;
        trace!(
            "kif: {}x{} palette={} rle={} bpp={}",
            header.width,
            header.height,
            header.palette_entries,
            header.rle_entries,
            header.bits_per_pixel
        );

        if let Some(limits) = self.limits {
            limits.check(header.width, header.height)?;
            limits.check_palette(header.palette_entries)?;
            limits.check_memory(
                header
                    .pixel_count()
                    .saturating_mul(self.layout.bytes_per_pixel()),
            )?;
        }
        // Each entry covers at most MAX_RUN pixels; reject before sizing any buffer.
        let max_covered = usize::try_from(header.rle_entries)
            .unwrap_or(usize::MAX)
            .saturating_mul(rle::MAX_RUN);
        if max_covered < header.pixel_count() {
            return Err(KifError::TruncatedData {
                expected: header.pixel_count(),
                covered: max_covered,
            });
        }
        stop.check()?;

        let palette = parse_palette(data, header.palette_entries)?;
        let rle = rle::rle_bytes(data, &header)?;
        let consumed = header.rle_offset() + rle.len();
        if consumed < data.len() {
            warn!("kif: ignoring {} trailing bytes", data.len() - consumed);
        }

        let pixels = rle::decode_runs(rle, &palette, header.pixel_count(), self.layout, &stop)?;
        trace!("kif: decoded {} bytes", pixels.len());
        Ok(DecodeOutput {
            pixels,
            header,
            layout: self.layout,
        })
    }
}
