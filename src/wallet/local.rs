//! In-process wallet backing the address book.
//!
//! `LocalWallet` is a cloneable handle over a mutex guarded store holding the address book, the
//! lock state, a pool of pre-generated receive addresses and the default address. Every store
//! change is broadcast to all subscribers, whichever component made it.

use crate::address::{Network, VotingAddress, is_valid_address_syntax};
use crate::config::VotingBookConfig;
use crate::wallet::backend::{UnlockState, WalletBackend};
use crate::wallet::repositories::AddressBookSnapshot;
use crate::wallet::{AddressBookRecord, AddressRole, ChangeType, WalletError, WalletNotification};

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info, warn};

/// Source of a passphrase when a locked wallet needs to be opened without user interaction.
pub trait UnlockProvider: Send {
	/// Passphrase to try, or `None` to give up.
	fn request_passphrase(&self) -> Option<String>;
}

/// Unlock provider that always answers with the same passphrase.
pub struct StaticPassphrase(pub String);

impl UnlockProvider for StaticPassphrase {
	fn request_passphrase(&self) -> Option<String> {
		Some(self.0.clone())
	}
}

struct WalletStore {
	network: Network,
	keypool_size: usize,
	entries: BTreeMap<String, AddressBookRecord>,
	default_address: Option<String>,
	passphrase: Option<String>,
	locked: bool,
	keypool: VecDeque<String>,
	subscribers: Vec<UnboundedSender<WalletNotification>>,
}

impl WalletStore {
	fn notify(&mut self, notification: WalletNotification) {
		self.subscribers
			.retain(|subscriber| subscriber.send(notification.clone()).is_ok());
	}

	fn top_up_keypool(&mut self) -> Result<(), WalletError> {
		if self.locked {
			return Err(WalletError::LockedCannotUnlock);
		}
		while self.keypool.len() < self.keypool_size {
			let address = VotingAddress::random(self.network)
				.encode()
				.map_err(|e| WalletError::KeyGenerationFailed(e.to_string()))?;
			self.keypool.push_back(address);
		}
		Ok(())
	}
}

#[derive(Clone)]
pub struct LocalWallet {
	store: Arc<Mutex<WalletStore>>,
	unlock_provider: Arc<Mutex<Option<Box<dyn UnlockProvider>>>>,
}

impl LocalWallet {
	/// Create an empty, unencrypted wallet with a full keypool.
	pub fn new(config: &VotingBookConfig) -> Self {
		let mut store = WalletStore {
			network: config.network,
			keypool_size: config.keypool_size,
			entries: BTreeMap::new(),
			default_address: None,
			passphrase: None,
			locked: false,
			keypool: VecDeque::new(),
			subscribers: Vec::new(),
		};
		if let Err(e) = store.top_up_keypool() {
			warn!("Failed to fill keypool: {}", e);
		}

		Self {
			store: Arc::new(Mutex::new(store)),
			unlock_provider: Arc::new(Mutex::new(None)),
		}
	}

	/// Rebuild a wallet from a persisted address book snapshot.
	pub fn from_snapshot(config: &VotingBookConfig, snapshot: AddressBookSnapshot) -> Self {
		if snapshot.network != config.network {
			warn!(
				"Snapshot was written for {} but wallet runs on {}",
				snapshot.network, config.network
			);
		}

		let wallet = Self::new(config);
		{
			let mut store = wallet.store();
			for record in snapshot.entries {
				store.entries.insert(record.address.clone(), record);
			}
			store.default_address = snapshot.default_address;
			info!("Restored {} address book entries", store.entries.len());
		}
		wallet
	}

	pub fn snapshot(&self) -> AddressBookSnapshot {
		let store = self.store();
		AddressBookSnapshot {
			network: store.network,
			entries: store.entries.values().cloned().collect(),
			default_address: store.default_address.clone(),
		}
	}

	fn store(&self) -> MutexGuard<'_, WalletStore> {
		self.store.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Protect the wallet with `passphrase` and lock it.
	pub fn encrypt(&self, passphrase: &str) {
		let mut store = self.store();
		store.passphrase = Some(passphrase.to_string());
		store.locked = true;
	}

	pub fn lock(&self) {
		let mut store = self.store();
		if store.passphrase.is_some() {
			store.locked = true;
		}
	}

	pub fn unlock(&self, passphrase: &str) -> Result<(), WalletError> {
		let mut store = self.store();
		if store.passphrase.as_deref() != Some(passphrase) {
			return Err(WalletError::LockedCannotUnlock);
		}
		store.locked = false;
		store.top_up_keypool()
	}

	pub fn is_locked(&self) -> bool {
		self.store().locked
	}

	pub fn set_unlock_provider(&self, provider: Box<dyn UnlockProvider>) {
		*self
			.unlock_provider
			.lock()
			.unwrap_or_else(PoisonError::into_inner) = Some(provider);
	}

	pub fn keypool_len(&self) -> usize {
		self.store().keypool.len()
	}

	pub fn default_address(&self) -> Option<String> {
		self.store().default_address.clone()
	}

	/// Mark an address book entry as the address receiving change.
	pub fn set_default_address(&self, address: &str) -> Result<(), WalletError> {
		let address = address.to_ascii_lowercase();
		let address = address.as_str();
		let mut store = self.store();
		if !store.entries.contains_key(address) {
			return Err(WalletError::NotFound(address.to_string()));
		}
		store.default_address = Some(address.to_string());
		info!("Default address set to {}", address);
		store.notify(WalletNotification::DefaultAddressChanged {
			address: address.to_string(),
		});
		Ok(())
	}
}

impl WalletBackend for LocalWallet {
	fn enumerate_address_book(&self) -> Result<Vec<AddressBookRecord>, WalletError> {
		Ok(self.store().entries.values().cloned().collect())
	}

	fn add_address_book_entry(
		&self,
		address: &str,
		label: &str,
		nation: &str,
		role: AddressRole,
	) -> Result<(), WalletError> {
		let mut store = self.store();
		let address = VotingAddress::decode(address, store.network)?.encode()?;
		let address = address.as_str();

		let record = AddressBookRecord::new(address, label, nation, role);
		let change = match store.entries.insert(address.to_string(), record.clone()) {
			Some(_) => ChangeType::Updated,
			None => ChangeType::New,
		};
		debug!("Address book {:?}: {}", change, address);
		store.notify(WalletNotification::AddressBookChanged { record, change });
		Ok(())
	}

	fn update_address_book_entry(
		&self,
		address: &str,
		label: &str,
		nation: &str,
	) -> Result<(), WalletError> {
		let address = address.to_ascii_lowercase();
		let address = address.as_str();
		let mut store = self.store();
		let record = store
			.entries
			.get_mut(address)
			.ok_or_else(|| WalletError::NotFound(address.to_string()))?;
		record.label = label.to_string();
		record.nation = nation.to_string();

		let record = record.clone();
		debug!("Address book Updated: {}", address);
		store.notify(WalletNotification::AddressBookChanged {
			record,
			change: ChangeType::Updated,
		});
		Ok(())
	}

	fn delete_address_book_entry(&self, address: &str) -> Result<(), WalletError> {
		let address = address.to_ascii_lowercase();
		let address = address.as_str();
		let mut store = self.store();
		if store.default_address.as_deref() == Some(address) {
			return Err(WalletError::DefaultAddressProtected(address.to_string()));
		}
		let record = store
			.entries
			.remove(address)
			.ok_or_else(|| WalletError::NotFound(address.to_string()))?;
		debug!("Address book Deleted: {}", address);
		store.notify(WalletNotification::AddressBookChanged {
			record,
			change: ChangeType::Deleted,
		});
		Ok(())
	}

	fn generate_new_receiving_address(&self) -> Result<String, WalletError> {
		let mut store = self.store();
		if store.keypool.is_empty() {
			store
				.top_up_keypool()
				.map_err(|e| WalletError::KeyGenerationFailed(e.to_string()))?;
		}
		let address = store
			.keypool
			.pop_front()
			.ok_or_else(|| WalletError::KeyGenerationFailed("keypool exhausted".to_string()))?;
		// The popped address is handed out even when the refill fails.
		match store.top_up_keypool() {
			Ok(()) => {}
			Err(WalletError::LockedCannotUnlock) => {
				debug!("Keypool left at {} while locked", store.keypool.len());
			}
			Err(e) => warn!("Failed to refill keypool after handing out {}: {}", address, e),
		}
		Ok(address)
	}

	fn ensure_unlocked(&self) -> Result<UnlockState, WalletError> {
		if !self.is_locked() {
			return Ok(UnlockState::AlreadyUnlocked);
		}

		let passphrase = self
			.unlock_provider
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.as_ref()
			.and_then(|provider| provider.request_passphrase())
			.ok_or(WalletError::LockedCannotUnlock)?;

		self.unlock(&passphrase)?;
		Ok(UnlockState::Temporary)
	}

	fn relock(&self) {
		self.lock();
	}

	fn is_valid_address_syntax(&self, address: &str) -> bool {
		is_valid_address_syntax(address, self.store().network)
	}

	fn subscribe(&self) -> UnboundedReceiver<WalletNotification> {
		let (tx, rx) = unbounded_channel();
		self.store().subscribers.push(tx);
		rx
	}
}
