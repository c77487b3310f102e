#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(pal: u16, w: u16, h: u16, rle: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(16);
    out.extend_from_slice(&0x6B69_6631u32.to_le_bytes());
    out.push(4); // bytes per palette color
    out.push(0); // compression
    out.extend_from_slice(&pal.to_le_bytes());
    out.extend_from_slice(&w.to_le_bytes());
    out.extend_from_slice(&h.to_le_bytes());
    out.extend_from_slice(&rle.to_le_bytes());
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 2x1: red, transparent
    let mut tiny = header(2, 2, 1, 2);
    tiny.extend_from_slice(&[0, 0, 0, 0, 255, 0, 0, 255]);
    tiny.extend_from_slice(&[1, 1, 0, 1]);
    fs::write(format!("{dir}/tiny_2x1.kif"), tiny).unwrap();

    // 16x16 single color: runs of 255 + 1
    let mut solid = header(2, 16, 16, 2);
    solid.extend_from_slice(&[0, 0, 0, 0, 40, 80, 120, 255]);
    solid.extend_from_slice(&[1, 255, 1, 1]);
    fs::write(format!("{dir}/solid_16x16.kif"), solid).unwrap();

    // Out-of-range palette index
    let mut bad_index = header(1, 1, 1, 1);
    bad_index.extend_from_slice(&[0, 0, 0, 0]);
    bad_index.extend_from_slice(&[7, 1]);
    fs::write(format!("{dir}/bad_index.kif"), bad_index).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"1fik").unwrap();
    fs::write(format!("{dir}/header_only.bin"), header(4, 8, 8, 9)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
