/// Pixel memory layout of a raw buffer handed to or returned from the codec.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PixelLayout {
    /// 3 channels, 8-bit RGB (24 bits per pixel).
    Rgb8,
    /// 4 channels, 8-bit RGBA (32 bits per pixel).
    #[default]
    Rgba8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Bits per pixel (24 or 32).
    pub fn bits_per_pixel(&self) -> u8 {
        match self {
            Self::Rgb8 => 24,
            Self::Rgba8 => 32,
        }
    }

    /// Map a requested output bit depth to a layout. Only 24 and 32 are valid.
    pub fn from_bits_per_pixel(bits: u8) -> Option<Self> {
        match bits {
            24 => Some(Self::Rgb8),
            32 => Some(Self::Rgba8),
            _ => None,
        }
    }
}

/// Pixel types that can be viewed over a decoded buffer.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}
