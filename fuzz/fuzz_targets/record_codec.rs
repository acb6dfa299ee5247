#![no_main]

use libfuzzer_sys::fuzz_target;
use medical_records::codec::{decode, encode};

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must encode again and decode to the same record.
    if let Ok(record) = decode(data) {
        let bytes = encode(&record).expect("decoded record re-encodes");
        assert_eq!(decode(&bytes).expect("re-encoded record decodes"), record);
    }
});
