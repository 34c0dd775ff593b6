//! Collaborator contract between the address book model and the wallet.
//!
//! The model never touches wallet storage, locking or key material directly. Everything goes
//! through `WalletBackend`, whose calls are synchronous and may block (an unlock can wait on the
//! user). Store changes, including the ones caused by the model itself, come back as
//! `WalletNotification`s on the receiver handed out by `subscribe`.

use crate::wallet::{AddressBookRecord, AddressRole, WalletError, WalletNotification};

use tokio::sync::mpsc::UnboundedReceiver;

/// Outcome of [`WalletBackend::ensure_unlocked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockState {
	/// The wallet was not locked to begin with.
	AlreadyUnlocked,
	/// The wallet was unlocked for this call and should be relocked afterwards.
	Temporary,
}

pub trait WalletBackend {
	/// Full snapshot of the address book, in no particular order.
	fn enumerate_address_book(&self) -> Result<Vec<AddressBookRecord>, WalletError>;

	/// Insert an entry, or overwrite it if the address is already known.
	fn add_address_book_entry(
		&self,
		address: &str,
		label: &str,
		nation: &str,
		role: AddressRole,
	) -> Result<(), WalletError>;

	fn update_address_book_entry(
		&self,
		address: &str,
		label: &str,
		nation: &str,
	) -> Result<(), WalletError>;

	fn delete_address_book_entry(&self, address: &str) -> Result<(), WalletError>;

	fn generate_new_receiving_address(&self) -> Result<String, WalletError>;

	fn ensure_unlocked(&self) -> Result<UnlockState, WalletError>;

	/// Undo a [`UnlockState::Temporary`] unlock.
	fn relock(&self);

	fn is_valid_address_syntax(&self, address: &str) -> bool;

	/// Register for address book and default address notifications.
	fn subscribe(&self) -> UnboundedReceiver<WalletNotification>;
}
