//! Runtime configuration for the voting address book.
//!
//! `VotingBookConfig` carries the network whose address rules apply, how many receive keys the
//! local wallet keeps pre-generated, where address book snapshots live, and the default log
//! filter. Values come from `Default`, a JSON document, or environment overrides.

use crate::address::{AddressError, Network};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_NETWORK: &str = "VOTING_BOOK_NETWORK";
pub const ENV_KEYPOOL: &str = "VOTING_BOOK_KEYPOOL";
pub const ENV_DATA_DIR: &str = "VOTING_BOOK_DATA_DIR";
pub const ENV_LOG: &str = "RUST_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Invalid network: {0}")]
	Network(#[from] AddressError),

	#[error("Invalid {name} value '{value}'")]
	InvalidValue { name: &'static str, value: String },

	#[error("Config parse error: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Configuration for the address book model and its local wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VotingBookConfig {
	/// Network whose address prefix is accepted and generated.
	pub network: Network,
	/// Number of receive addresses kept ready in the keypool.
	pub keypool_size: usize,
	/// Directory holding address book snapshots.
	pub data_dir: PathBuf,
	/// Default `tracing` filter directive when `RUST_LOG` is unset.
	pub log_filter: String,
}

impl Default for VotingBookConfig {
	fn default() -> Self {
		Self {
			network: Network::TestNet,
			keypool_size: 10,
			data_dir: PathBuf::from("./voting-book"),
			log_filter: "info".to_string(),
		}
	}
}

impl VotingBookConfig {
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Defaults overridden by any `VOTING_BOOK_*` variables present in the environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::default().with_overrides(|name| std::env::var(name).ok())
	}

	fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(network) = lookup(ENV_NETWORK) {
			self.network = network.parse()?;
		}
		if let Some(keypool) = lookup(ENV_KEYPOOL) {
			self.keypool_size = keypool.parse().map_err(|_| ConfigError::InvalidValue {
				name: ENV_KEYPOOL,
				value: keypool.clone(),
			})?;
		}
		if let Some(dir) = lookup(ENV_DATA_DIR) {
			self.data_dir = PathBuf::from(dir);
		}
		if let Some(filter) = lookup(ENV_LOG) {
			self.log_filter = filter;
		}
		Ok(self)
	}
}
