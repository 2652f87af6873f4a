#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };

    let once = nsprefix_rewrite::apply(s);
    let twice = nsprefix_rewrite::apply(&once.content);

    assert!(!twice.changed, "second pass changed {:?}", once.content);
    assert_eq!(once.changed, once.content != s);
    assert!(nsprefix_rewrite::find_unprefixed(&once.content).is_empty());
});
