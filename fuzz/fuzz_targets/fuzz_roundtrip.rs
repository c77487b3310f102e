#![no_main]
use libfuzzer_sys::fuzz_target;
use zenkif::*;

fuzz_target!(|data: &[u8]| {
    // First byte picks the width, the rest are RGBA pixels
    let Some((&w, rest)) = data.split_first() else {
        return;
    };
    let width = u16::from(w.max(1));
    let row_bytes = usize::from(width) * 4;
    let rows = rest.len() / row_bytes;
    if rows == 0 || rows > usize::from(u16::MAX) {
        return;
    }
    let pixels = &rest[..rows * row_bytes];

    let (encoded, header) = match encode(pixels, width, rows as u16) {
        Ok(out) => out,
        Err(KifError::TooManyColors { .. }) => return,
        Err(e) => panic!("encode failed: {e:?}"),
    };

    let Ok((decoded, parsed)) = decode(&encoded, 32) else {
        panic!("encoded data failed to decode");
    };
    assert_eq!(parsed, header);
    assert_eq!(decoded, pixels, "roundtrip pixel mismatch");

    let (_, _, entries) = read_entries(&encoded).expect("entries");
    let covered: usize = entries.iter().map(|e| usize::from(e.run)).sum();
    assert_eq!(covered, header.pixel_count());
});
