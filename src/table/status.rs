use crate::wallet::WalletError;

/// Result of the last mutating call on the table model.
///
/// Only meaningful right after the call that produced it; the next mutating call overwrites it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditStatus {
	/// Everything ok
	#[default]
	Ok,
	/// No changes were made during edit operation
	NoChanges,
	/// Unparseable address
	InvalidAddress,
	/// Address already in address book
	DuplicateAddress,
	/// Wallet could not be unlocked to create new receiving address
	WalletUnlockFailure,
	/// Generating a new key for a receiving address failed
	KeyGenerationFailure,
	/// The wallet refused or failed a write after validation passed
	StoreWriteFailure,
	/// Row or column outside the table, or a column that cannot be edited
	InvalidIndex,
}

impl EditStatus {
	pub fn is_ok(&self) -> bool {
		matches!(self, EditStatus::Ok | EditStatus::NoChanges)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum EditError {
	#[error("Invalid address: {0}")]
	InvalidAddress(String),

	#[error("Address already in address book: {0}")]
	DuplicateAddress(String),

	#[error("Wallet could not be unlocked: {0}")]
	WalletUnlockFailure(#[source] WalletError),

	#[error("Key generation failed: {0}")]
	KeyGenerationFailure(#[source] WalletError),

	#[error("Wallet write failed: {0}")]
	StoreWriteFailure(#[source] WalletError),

	#[error("Invalid index: {0}")]
	InvalidIndex(String),
}

impl EditError {
	pub fn status(&self) -> EditStatus {
		match self {
			EditError::InvalidAddress(_) => EditStatus::InvalidAddress,
			EditError::DuplicateAddress(_) => EditStatus::DuplicateAddress,
			EditError::WalletUnlockFailure(_) => EditStatus::WalletUnlockFailure,
			EditError::KeyGenerationFailure(_) => EditStatus::KeyGenerationFailure,
			EditError::StoreWriteFailure(_) => EditStatus::StoreWriteFailure,
			EditError::InvalidIndex(_) => EditStatus::InvalidIndex,
		}
	}
}
