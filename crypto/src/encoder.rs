//! Canonical per-network address form.

use conviction_types::{Address, AddressFormat, NetworkId};

use crate::ss58::{decode_public_key, ss58_encode};

const H160_HEX_LEN: usize = 40;

/// Puts an address into its network's canonical encoding.
///
/// `None` means the input is not an address of a kind the network accepts.
pub trait AddressEncoder: Send + Sync {
    fn encode(&self, address: &str, network: NetworkId) -> Option<Address>;
}

/// Encoder driven by each network's [`AddressFormat`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NetworkAddressEncoder;

impl AddressEncoder for NetworkAddressEncoder {
    fn encode(&self, address: &str, network: NetworkId) -> Option<Address> {
        encode_address(address, network)
    }
}

/// Encode `address` in `network`'s canonical form.
///
/// SS58 networks accept a hex public key or an SS58 address of any prefix;
/// H160 networks accept `0x` + 40 hex characters and yield lower case.
pub fn encode_address(address: &str, network: NetworkId) -> Option<Address> {
    let address = address.trim();
    if address.is_empty() {
        return None;
    }
    match network.address_format() {
        AddressFormat::Ss58(prefix) => {
            let key = decode_public_key(address)?;
            ss58_encode(&key, prefix).map(Address::new)
        }
        AddressFormat::H160 => {
            let hex_part = address
                .strip_prefix("0x")
                .or_else(|| address.strip_prefix("0X"))?;
            if hex_part.len() != H160_HEX_LEN || !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            Some(Address::new(format!("0x{}", hex_part.to_ascii_lowercase())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_HEX: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";
    const ALICE_GENERIC: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const ALICE_POLKADOT: &str = "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5";

    #[test]
    fn raw_and_encoded_forms_agree() {
        let from_hex = encode_address(ALICE_HEX, NetworkId::Polkadot).unwrap();
        let from_generic = encode_address(ALICE_GENERIC, NetworkId::Polkadot).unwrap();
        let from_native = encode_address(ALICE_POLKADOT, NetworkId::Polkadot).unwrap();
        assert_eq!(from_hex.as_str(), ALICE_POLKADOT);
        assert_eq!(from_hex, from_generic);
        assert_eq!(from_generic, from_native);
    }

    #[test]
    fn malformed_ss58_input_rejected() {
        assert!(encode_address("not-an-address", NetworkId::Kusama).is_none());
        assert!(encode_address("", NetworkId::Kusama).is_none());
        assert!(encode_address("0x1234", NetworkId::Westend).is_none());
    }

    #[test]
    fn h160_is_lower_cased() {
        let addr = encode_address("0xAbCdEf0123456789aBcDeF0123456789abCDef01", NetworkId::Moonbeam)
            .unwrap();
        assert_eq!(addr.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn h160_network_rejects_ss58() {
        assert!(encode_address(ALICE_GENERIC, NetworkId::Moonbeam).is_none());
        assert!(encode_address("0x123", NetworkId::Moonbeam).is_none());
    }

    #[test]
    fn trait_object_delegates_to_function() {
        let encoder: &dyn AddressEncoder = &NetworkAddressEncoder;
        assert_eq!(
            encoder.encode(ALICE_HEX, NetworkId::Polkadot),
            encode_address(ALICE_HEX, NetworkId::Polkadot)
        );
    }
}
