//! Address encoding for conviction analytics.
//!
//! - **SS58** decode/encode with the Blake2b-512 `SS58PRE` checksum
//! - **H160** normalisation for Ethereum-style networks
//! - [`AddressEncoder`], the seam the service uses to put every address
//!   into its network's canonical form before comparing keys

pub mod encoder;
pub mod hash;
pub mod ss58;

pub use encoder::{encode_address, AddressEncoder, NetworkAddressEncoder};
pub use hash::blake2b_512;
pub use ss58::{decode_public_key, ss58_decode, ss58_encode};
