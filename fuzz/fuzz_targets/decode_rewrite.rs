#![no_main]

use camino::Utf8Path;
use libfuzzer_sys::fuzz_target;
use nsprefix_edit::{DecodePolicy, decode};

fuzz_target!(|data: &[u8]| {
    let path = Utf8Path::new("fuzz.h");

    // Lenient decoding never fails; strict decoding fails exactly on invalid UTF-8.
    let (text, lossy) = decode(path, data, DecodePolicy::Lenient).expect("lenient decode");
    assert_eq!(lossy, std::str::from_utf8(data).is_err());
    assert_eq!(decode(path, data, DecodePolicy::Strict).is_ok(), !lossy);

    let rewrite = nsprefix_rewrite::apply(&text);
    let before = nsprefix_rewrite::count_namespaced(&text);
    let after = nsprefix_rewrite::count_namespaced(&rewrite.content);
    assert!(after.lowercase >= before.lowercase);
    assert!(after.uppercase >= before.uppercase);
});
