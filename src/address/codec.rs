use bech32::{Bech32m, Hrp};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of the key hash carried by every address.
pub const ADDRESS_PAYLOAD_LEN: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
	#[error("bech32 decoding failed: {0}")]
	Decode(String),
	#[error("bech32 encoding failed: {0}")]
	Encode(String),
	#[error("prefix '{found}' does not match network prefix '{expected}'")]
	PrefixMismatch { expected: String, found: String },
	#[error("payload must be {expected} bytes, got {found}")]
	PayloadLength { expected: usize, found: usize },
	#[error("unknown network '{0}'")]
	UnknownNetwork(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
	MainNet,
	#[default]
	TestNet,
	DevNet,
}

impl Network {
	/// Human-readable part used when encoding addresses for this network.
	pub fn hrp(&self) -> &'static str {
		match self {
			Network::MainNet => "vt",
			Network::TestNet => "tvt",
			Network::DevNet => "dvt",
		}
	}
}

impl fmt::Display for Network {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Network::MainNet => "mainnet",
			Network::TestNet => "testnet",
			Network::DevNet => "devnet",
		};
		f.write_str(name)
	}
}

impl FromStr for Network {
	type Err = AddressError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"mainnet" | "main" => Ok(Network::MainNet),
			"testnet" | "test" => Ok(Network::TestNet),
			"devnet" | "dev" => Ok(Network::DevNet),
			other => Err(AddressError::UnknownNetwork(other.to_string())),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotingAddress {
	pub network: Network,
	pub payload: [u8; ADDRESS_PAYLOAD_LEN],
}

impl VotingAddress {
	pub fn new(network: Network, payload: [u8; ADDRESS_PAYLOAD_LEN]) -> Self {
		Self { network, payload }
	}

	/// Fresh address with a random key hash.
	pub fn random(network: Network) -> Self {
		let mut payload = [0u8; ADDRESS_PAYLOAD_LEN];
		rand::rng().fill(&mut payload);
		Self { network, payload }
	}

	/// Decode `encoded` and check it belongs to `network`.
	pub fn decode(encoded: &str, network: Network) -> Result<Self, AddressError> {
		let (hrp, data) =
			bech32::decode(encoded).map_err(|e| AddressError::Decode(e.to_string()))?;

		if !hrp.as_str().eq_ignore_ascii_case(network.hrp()) {
			return Err(AddressError::PrefixMismatch {
				expected: network.hrp().to_string(),
				found: hrp.as_str().to_string(),
			});
		}

		let payload: [u8; ADDRESS_PAYLOAD_LEN] =
			data.as_slice()
				.try_into()
				.map_err(|_| AddressError::PayloadLength {
					expected: ADDRESS_PAYLOAD_LEN,
					found: data.len(),
				})?;

		Ok(Self { network, payload })
	}

	pub fn encode(&self) -> Result<String, AddressError> {
		let hrp = Hrp::parse(self.network.hrp()).map_err(|e| AddressError::Encode(e.to_string()))?;
		bech32::encode::<Bech32m>(hrp, &self.payload).map_err(|e| AddressError::Encode(e.to_string()))
	}
}

/// Syntax check used before an externally supplied address reaches the wallet.
pub fn is_valid_address_syntax(address: &str, network: Network) -> bool {
	VotingAddress::decode(address, network).is_ok()
}
