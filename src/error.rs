use alloc::string::String;
use enough::StopReason;

/// Errors from KIF decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum KifError {
    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("unrecognized format magic: {0:#010x}")]
    UnrecognizedFormat(u32),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("palette index {index} out of range for palette of {palette_len} entries")]
    PaletteIndexOutOfRange { index: u8, palette_len: usize },

    #[error("truncated pixel data: runs cover {covered} of {expected} pixels")]
    TruncatedData { expected: usize, covered: usize },

    #[error("too many colors: palette needs more than {max} entries")]
    TooManyColors { max: usize },

    #[error("color {0:?} missing from palette")]
    ColorNotInPalette([u8; 4]),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u16, height: u16 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for KifError {
    fn from(r: StopReason) -> Self {
        KifError::Cancelled(r)
    }
}
