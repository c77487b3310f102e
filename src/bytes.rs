//! Bounds-checked little-endian reads from a byte slice.

use crate::error::KifError;

/// Borrow `len` bytes starting at `offset`, or fail with `UnexpectedEof`.
#[inline]
pub(crate) fn slice_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8], KifError> {
    let end = offset.checked_add(len).ok_or(KifError::UnexpectedEof)?;
    data.get(offset..end).ok_or(KifError::UnexpectedEof)
}

#[inline]
fn array_at<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], KifError> {
    let mut buf = [0u8; N];
    buf.copy_from_slice(slice_at(data, offset, N)?);
    Ok(buf)
}

#[inline]
pub(crate) fn read_u8(data: &[u8], offset: usize) -> Result<u8, KifError> {
    data.get(offset).copied().ok_or(KifError::UnexpectedEof)
}

#[inline]
pub(crate) fn read_u16_le(data: &[u8], offset: usize) -> Result<u16, KifError> {
    Ok(u16::from_le_bytes(array_at(data, offset)?))
}

#[inline]
pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, KifError> {
    Ok(u32::from_le_bytes(array_at(data, offset)?))
}
