use crate::address::AddressError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an address belongs to the wallet or to a tracked counterparty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressRole {
	/// Externally owned address the user sends to
	Send,
	/// Wallet owned address backed by a generated key
	Receive,
}

impl fmt::Display for AddressRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AddressRole::Send => f.write_str("send"),
			AddressRole::Receive => f.write_str("receive"),
		}
	}
}

/// Kind of change reported by the wallet for one address book entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeType {
	New,
	Updated,
	Deleted,
}

/// One address book entry as stored by the wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBookRecord {
	pub address: String,
	pub label: String,
	pub nation: String,
	pub role: AddressRole,
}

impl AddressBookRecord {
	pub fn new(
		address: impl Into<String>,
		label: impl Into<String>,
		nation: impl Into<String>,
		role: AddressRole,
	) -> Self {
		Self {
			address: address.into(),
			label: label.into(),
			nation: nation.into(),
			role,
		}
	}
}

/// Notifications pushed by the wallet on every address book change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletNotification {
	AddressBookChanged {
		record: AddressBookRecord,
		change: ChangeType,
	},
	DefaultAddressChanged {
		address: String,
	},
}

#[allow(clippy::enum_variant_names)]
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
	#[error("Wallet is locked and could not be unlocked")]
	LockedCannotUnlock,

	#[error("Key generation failed: {0}")]
	KeyGenerationFailed(String),

	#[error("Address not in address book: {0}")]
	NotFound(String),

	#[error("Default address cannot be removed: {0}")]
	DefaultAddressProtected(String),

	#[error("Invalid address: {0}")]
	InvalidAddress(#[from] AddressError),

	#[error("Address book store error: {0}")]
	StoreError(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	#[error("Serialization error: {0}")]
	SerializationError(#[from] serde_json::Error),
}
