//! SS58 address codec.
//!
//! Layout: base58(prefix ++ public_key ++ checksum), where
//! checksum = Blake2b-512("SS58PRE" ++ prefix ++ public_key)[0..2].
//! Prefixes below 64 take one byte; 64..=16383 take two.

use crate::hash::blake2b_512;

const SS58_PRE: &[u8] = b"SS58PRE";
const PUBLIC_KEY_LEN: usize = 32;
const CHECKSUM_LEN: usize = 2;
/// Largest prefix expressible in the two-byte form (14 bits).
const MAX_PREFIX: u16 = 16_383;

fn prefix_bytes(prefix: u16) -> Option<Vec<u8>> {
    match prefix {
        0..=63 => Some(vec![prefix as u8]),
        64..=MAX_PREFIX => {
            let first = (((prefix & 0b0000_0000_1111_1100) >> 2) as u8) | 0b0100_0000;
            let second = ((prefix >> 8) as u8) | (((prefix & 0b0000_0000_0000_0011) as u8) << 6);
            Some(vec![first, second])
        }
        _ => None,
    }
}

fn checksum(prefixed_key: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = blake2b_512(&[SS58_PRE, prefixed_key]);
    [hash[0], hash[1]]
}

/// Encode a 32-byte public key for the given address-type prefix.
///
/// Returns `None` if the prefix does not fit in 14 bits.
pub fn ss58_encode(public_key: &[u8; PUBLIC_KEY_LEN], prefix: u16) -> Option<String> {
    let mut data = prefix_bytes(prefix)?;
    data.extend_from_slice(public_key);
    let sum = checksum(&data);
    data.extend_from_slice(&sum);
    Some(bs58::encode(data).into_string())
}

/// Decode an SS58 string into `(prefix, public_key)`.
///
/// Returns `None` on bad base58, an unsupported length, a reserved prefix
/// byte, or a checksum mismatch.
pub fn ss58_decode(address: &str) -> Option<(u16, [u8; PUBLIC_KEY_LEN])> {
    let data = bs58::decode(address).into_vec().ok()?;
    let first = *data.first()?;
    if first & 0b1000_0000 != 0 {
        return None;
    }

    let (prefix, prefix_len) = if first & 0b0100_0000 == 0 {
        (u16::from(first), 1)
    } else {
        let second = *data.get(1)?;
        let lower = (u16::from(first & 0b0011_1111) << 2) | u16::from(second >> 6);
        let upper = u16::from(second & 0b0011_1111) << 8;
        (lower | upper, 2)
    };

    if data.len() != prefix_len + PUBLIC_KEY_LEN + CHECKSUM_LEN {
        return None;
    }
    let (body, sum) = data.split_at(prefix_len + PUBLIC_KEY_LEN);
    if checksum(body) != sum {
        return None;
    }

    let mut public_key = [0u8; PUBLIC_KEY_LEN];
    public_key.copy_from_slice(&body[prefix_len..]);
    Some((prefix, public_key))
}

/// Extract the public key from either a `0x`-prefixed hex key or an SS58
/// address of any prefix.
pub fn decode_public_key(address: &str) -> Option<[u8; PUBLIC_KEY_LEN]> {
    let address = address.trim();
    if let Some(hex_key) = address.strip_prefix("0x") {
        let bytes = hex::decode(hex_key).ok()?;
        return bytes.try_into().ok();
    }
    ss58_decode(address).map(|(_, key)| key)
}
