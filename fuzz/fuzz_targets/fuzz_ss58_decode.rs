#![no_main]

use conviction_crypto::{encode_address, ss58_decode, ss58_encode};
use conviction_types::NetworkId;
use libfuzzer_sys::fuzz_target;

// Decoding arbitrary text must never panic, and whatever decodes must
// re-encode to an address that decodes to the same key.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Some((prefix, key)) = ss58_decode(text) {
        let reencoded = ss58_encode(&key, prefix).expect("decoded prefix must re-encode");
        assert_eq!(ss58_decode(&reencoded), Some((prefix, key)));
    }

    for network in NetworkId::ALL {
        if let Some(encoded) = encode_address(text, network) {
            assert_eq!(encode_address(encoded.as_str(), network), Some(encoded));
        }
    }
});
