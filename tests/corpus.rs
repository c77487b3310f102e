//! Test corpus: roundtrip and corruption tests across patterns and sizes.

use std::collections::HashSet;

use enough::Unstoppable;
use zenkif::*;

fn checkerboard(w: usize, h: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * 4];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * 4;
            let color = if (x + y) % 2 == 0 {
                [200, 220, 240, 255]
            } else {
                [10, 40, 70, 100]
            };
            pixels[off..off + 4].copy_from_slice(&color);
        }
    }
    pixels
}

/// Noise drawn from a fixed set of `colors` distinct colors.
fn noise_pattern(w: usize, h: usize, colors: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(w * h * 4);
    let mut state: u32 = 0xDEAD_BEEF;
    for _ in 0..w * h {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let c = state % colors;
        pixels.extend_from_slice(&[c as u8, (c >> 8) as u8, 0x5A, 255]);
    }
    pixels
}

/// Horizontal bands: long runs that cross row boundaries.
fn bands(w: usize, h: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(w * h * 4);
    for y in 0..h {
        let band = (y / 3) as u8;
        for _ in 0..w {
            pixels.extend_from_slice(&[band, band.wrapping_mul(3), 255 - band, 255]);
        }
    }
    pixels
}

/// `n` distinct opaque colors, one per pixel, in a single row.
fn distinct_colors(n: usize) -> Vec<u8> {
    (0..n)
        .flat_map(|i| [i as u8, (i >> 8) as u8, 1, 255])
        .collect()
}

fn assert_roundtrip(pixels: &[u8], w: u16, h: u16) -> Vec<u8> {
    let (encoded, header) = encode(pixels, w, h).unwrap();
    let (decoded, parsed) = decode(&encoded, 32).unwrap();
    assert_eq!(parsed, header);
    assert_eq!(decoded, pixels, "{w}x{h} roundtrip mismatch");
    encoded
}

fn assert_invariants(encoded: &[u8]) {
    let (header, palette, entries) = read_entries(encoded).unwrap();

    let covered: usize = entries.iter().map(|e| usize::from(e.run)).sum();
    assert_eq!(covered, header.pixel_count());
    assert!(entries.iter().all(|e| e.run >= 1));

    assert_eq!(palette[0], TRANSPARENT_BLACK);
    let unique: HashSet<Rgba> = palette.iter().copied().collect();
    assert_eq!(unique.len(), palette.len(), "palette has duplicates");
    assert!(entries.iter().all(|e| usize::from(e.index) < palette.len()));
}

// ── Roundtrips ───────────────────────────────────────────────────────

#[test]
fn checkerboard_roundtrip() {
    for (w, h) in [(1, 1), (2, 2), (8, 6), (31, 17)] {
        let pixels = checkerboard(w, h);
        let encoded = assert_roundtrip(&pixels, w as u16, h as u16);
        assert_invariants(&encoded);
    }
}

#[test]
fn noise_roundtrip() {
    for colors in [1, 2, 16, 100, 255] {
        let pixels = noise_pattern(23, 19, colors);
        let encoded = assert_roundtrip(&pixels, 23, 19);
        assert_invariants(&encoded);
    }
}

#[test]
fn bands_roundtrip() {
    let pixels = bands(300, 12);
    let encoded = assert_roundtrip(&pixels, 300, 12);
    assert_invariants(&encoded);
    let (_, _, entries) = read_entries(&encoded).unwrap();
    // 4 bands of 900 pixels each, 255 + 255 + 255 + 135
    assert_eq!(entries.len(), 16);
}

#[test]
fn large_single_color() {
    let pixels = [3u8, 1, 4, 1].repeat(256 * 256);
    let encoded = assert_roundtrip(&pixels, 256, 256);
    assert_invariants(&encoded);
    let header = Header::from_bytes(&encoded).unwrap();
    assert_eq!(header.rle_entries, (256 * 256usize).div_ceil(255) as u32);
}

#[test]
fn projection_matches_rgba() {
    let pixels = noise_pattern(13, 7, 40);
    let (encoded, _) = encode(&pixels, 13, 7).unwrap();
    let (rgba, _) = decode(&encoded, 32).unwrap();
    let (rgb, _) = decode(&encoded, 24).unwrap();
    assert_eq!(rgb.len(), 13 * 7 * 3);
    for (rgb_px, rgba_px) in rgb.chunks_exact(3).zip(rgba.chunks_exact(4)) {
        assert_eq!(rgb_px, &rgba_px[..3]);
    }
}

// ── Palette ceiling ──────────────────────────────────────────────────

#[test]
fn palette_ceiling_without_transparent_black() {
    // 255 colors + reserved slot fill all 256 indices
    let pixels = distinct_colors(255);
    let encoded = assert_roundtrip(&pixels, 255, 1);
    assert_eq!(Header::from_bytes(&encoded).unwrap().palette_entries, 256);

    let pixels = distinct_colors(256);
    assert!(matches!(
        encode(&pixels, 256, 1),
        Err(KifError::TooManyColors { max: 256 })
    ));
}

#[test]
fn palette_ceiling_with_transparent_black() {
    // transparent black reuses the reserved slot, so 256 distinct colors fit
    let mut pixels = distinct_colors(255);
    pixels.extend_from_slice(&TRANSPARENT_BLACK);
    let encoded = assert_roundtrip(&pixels, 256, 1);
    assert_eq!(Header::from_bytes(&encoded).unwrap().palette_entries, 256);
}

#[test]
fn three_hundred_colors_rejected() {
    let pixels = distinct_colors(300);
    assert!(matches!(
        encode(&pixels, 30, 10),
        Err(KifError::TooManyColors { .. })
    ));
}

// ── Argument validation ──────────────────────────────────────────────

#[test]
fn zero_dimensions_rejected() {
    assert!(matches!(encode(&[], 0, 0), Err(KifError::InvalidArgument(_))));
    assert!(matches!(encode(&[], 0, 5), Err(KifError::InvalidArgument(_))));
    assert!(matches!(encode(&[], 5, 0), Err(KifError::InvalidArgument(_))));
}

#[test]
fn buffer_size_mismatch_rejected() {
    let pixels = checkerboard(4, 4);
    assert!(matches!(
        encode(&pixels, 4, 5),
        Err(KifError::BufferSizeMismatch { .. })
    ));
    assert!(matches!(
        encode(&pixels[..pixels.len() - 1], 4, 4),
        Err(KifError::BufferSizeMismatch { .. })
    ));
    let mut longer = pixels.clone();
    longer.push(0);
    assert!(matches!(
        encode(&longer, 4, 4),
        Err(KifError::BufferSizeMismatch { .. })
    ));
}

// ── Corruption ───────────────────────────────────────────────────────

fn is_format_or_truncation(err: &KifError) -> bool {
    matches!(
        err,
        KifError::UnexpectedEof | KifError::InvalidData(_) | KifError::TruncatedData { .. }
    )
}

#[test]
fn every_truncation_fails_cleanly() {
    let pixels = noise_pattern(9, 5, 6);
    let (encoded, _) = encode(&pixels, 9, 5).unwrap();
    for len in 0..encoded.len() {
        let err = decode(&encoded[..len], 32).unwrap_err();
        assert!(is_format_or_truncation(&err), "len={len}: {err:?}");
    }
}

#[test]
fn out_of_range_palette_index() {
    let pixels = checkerboard(3, 3);
    let (mut encoded, header) = encode(&pixels, 3, 3).unwrap();
    let first_rle = header.rle_offset();
    encoded[first_rle] = header.palette_entries as u8;
    match decode(&encoded, 32) {
        Err(KifError::PaletteIndexOutOfRange { index, palette_len }) => {
            assert_eq!(usize::from(index), palette_len);
        }
        other => panic!("expected PaletteIndexOutOfRange, got {other:?}"),
    }
}

#[test]
fn short_runs_are_truncated_data() {
    let pixels = [9u8, 9, 9, 9].repeat(20);
    let (mut encoded, header) = encode(&pixels, 5, 4).unwrap();
    let run_byte = header.rle_offset() + 1;
    assert_eq!(encoded[run_byte], 20);
    encoded[run_byte] = 19;
    assert!(matches!(
        decode(&encoded, 32),
        Err(KifError::TruncatedData {
            expected: 20,
            covered: 19
        })
    ));
}

#[test]
fn max_dimensions_with_one_run_rejected_without_allocating() {
    let header = Header {
        palette_entries: 1,
        rle_entries: 1,
        ..Header::new(u16::MAX, u16::MAX)
    };
    let mut data = header.to_bytes().to_vec();
    data.extend_from_slice(&[0, 0, 0, 0, 0, 1]);
    assert_eq!(data.len(), 22);

    for bits in [24, 32] {
        assert!(matches!(
            decode(&data, bits),
            Err(KifError::TruncatedData {
                expected: 4_294_836_225,
                covered: 255
            })
        ));
    }
    assert!(matches!(
        DecodeRequest::new(&data).permissive().decode(Unstoppable),
        Err(KifError::TruncatedData { covered: 255, .. })
    ));
}

#[test]
fn long_runs_are_invalid_data() {
    let pixels = [9u8, 9, 9, 9].repeat(20);
    let (mut encoded, header) = encode(&pixels, 5, 4).unwrap();
    encoded[header.rle_offset() + 1] = 21;
    assert!(matches!(decode(&encoded, 32), Err(KifError::InvalidData(_))));
}

#[test]
fn inflated_counts_are_eof() {
    let pixels = checkerboard(4, 4);
    let (encoded, header) = encode(&pixels, 4, 4).unwrap();

    let mut more_palette = encoded.clone();
    more_palette[6..8].copy_from_slice(&(header.palette_entries + 100).to_le_bytes());
    assert!(matches!(
        decode(&more_palette, 32),
        Err(KifError::UnexpectedEof)
    ));

    let mut more_rle = encoded.clone();
    more_rle[12..16].copy_from_slice(&u32::MAX.to_le_bytes());
    assert!(matches!(decode(&more_rle, 32), Err(KifError::UnexpectedEof)));
}

#[test]
fn foreign_magic_needs_permissive() {
    let pixels = checkerboard(4, 2);
    let (mut encoded, _) = encode(&pixels, 4, 2).unwrap();
    encoded[..4].copy_from_slice(b"kif1");
    assert!(matches!(
        decode(&encoded, 32),
        Err(KifError::UnrecognizedFormat(_))
    ));
    let decoded = DecodeRequest::new(&encoded)
        .permissive()
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}
