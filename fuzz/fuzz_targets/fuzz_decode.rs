#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Strict and permissive decode at both output depths — must never panic
    let _ = zenkif::decode(data, 32);
    let _ = zenkif::decode(data, 24);
    let _ = zenkif::DecodeRequest::new(data)
        .permissive()
        .decode(enough::Unstoppable);
    let _ = zenkif::read_entries(data);
});
