//! X2AP Message Fuzzer
//!
//! Feeds arbitrary octets to the X2AP decoder. Whatever decodes must encode
//! again, and the re-encoded form must be a fixed point.
//!
//! Run with: cargo +nightly fuzz run fuzz_x2ap_message

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(msg) = x2ap::decode(data) else {
        return;
    };

    let first = x2ap::encode(&msg).expect("decoded message must encode");
    let again = x2ap::decode(&first).expect("encoded message must decode");
    let second = x2ap::encode(&again).expect("re-decoded message must encode");
    assert_eq!(first, second);
});
