//!
//! Address encoding for voting address book entries.
//!
//! Addresses are bech32m strings whose human-readable part names the network and whose payload
//! is a 20 byte key hash. The address book only needs syntax checks and fresh address encoding,
//! so no key material is handled here.
/// Bech32 codec and network prefixes
pub mod codec;

pub use codec::{ADDRESS_PAYLOAD_LEN, AddressError, Network, VotingAddress, is_valid_address_syntax};
