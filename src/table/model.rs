//! Table model over the wallet address book.
//!
//! `VotingTableModel` is the only gateway for edits coming from a view. Every edit first drains
//! the wallet notifications still queued, so it is validated against the wallet's current book.
//! It is then written to the wallet, the wallet's echo is drained, and the edit is applied to the
//! `AddressCache` through the same `apply_event` path the notifications take. The direct apply is
//! a no-op when the echo already landed, so no notification is ever replayed onto stale rows. Views read rows and
//! cells from the model and learn about changes from the `TableEvent`s it dispatches.
//!
//! Mutating calls return their outcome directly and also leave it in a status register
//! (`edit_status`). The register holds the result of the most recent mutating call only; reading
//! it after a later edit yields that edit's result.

use crate::table::cache::{AddressCache, Entry};
use crate::table::events::{EventDispatcher, RowChange, TableEvent, TableEventHandler};
use crate::table::stats::CacheStats;
use crate::table::status::{EditError, EditStatus};
use crate::wallet::{AddressRole, ChangeType, UnlockState, WalletBackend, WalletNotification};

use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{debug, error, info};

/// Visible columns, numbered as the view lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
	Nation = 0,
	Address = 1,
	Label = 2,
}

impl Column {
	pub const ALL: [Column; 3] = [Column::Nation, Column::Address, Column::Label];

	pub fn from_index(index: usize) -> Option<Self> {
		Self::ALL.get(index).copied()
	}

	pub fn index(self) -> usize {
		self as usize
	}

	pub fn is_editable(self) -> bool {
		matches!(self, Column::Nation | Column::Label)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFlags {
	pub selectable: bool,
	pub editable: bool,
}

pub struct VotingTableModel<W: WalletBackend> {
	wallet: W,
	cache: AddressCache,
	row_changes: UnboundedReceiver<RowChange>,
	notifications: UnboundedReceiver<WalletNotification>,
	dispatcher: EventDispatcher,
	edit_status: EditStatus,
}

impl<W: WalletBackend> VotingTableModel<W> {
	/// Subscribe to `wallet` and load its current address book.
	pub fn new(wallet: W) -> Self {
		let (tx, row_changes) = unbounded_channel();
		let notifications = wallet.subscribe();
		let mut cache = AddressCache::new(tx);
		cache.refresh_all(&wallet);
		info!("Voting table loaded with {} entries", cache.len());

		Self {
			wallet,
			cache,
			row_changes,
			notifications,
			dispatcher: EventDispatcher::new(),
			edit_status: EditStatus::Ok,
		}
	}

	pub fn register_handler(&mut self, handler: Box<dyn TableEventHandler>) {
		debug!("Registering view handler {}", handler.name());
		self.dispatcher.register_handler(handler);
		debug!("{} view handlers registered", self.dispatcher.handler_count());
	}

	pub fn wallet(&self) -> &W {
		&self.wallet
	}

	// ==================== View contract ====================

	pub fn row_count(&self) -> usize {
		self.cache.len()
	}

	pub fn column_count(&self) -> usize {
		Column::ALL.len()
	}

	/// Rows in display order.
	pub fn entries(&self) -> &[Entry] {
		self.cache.entries()
	}

	pub fn entry(&self, row: usize) -> Option<&Entry> {
		self.cache.entry_at(row).ok()
	}

	pub fn cell(&self, row: usize, column: Column) -> Option<&str> {
		let entry = self.entry(row)?;
		Some(match column {
			Column::Nation => entry.nation(),
			Column::Address => entry.address(),
			Column::Label => entry.label(),
		})
	}

	/// Whether the row is one of the wallet's own addresses or a tracked counterparty.
	pub fn role_at(&self, row: usize) -> Option<AddressRole> {
		self.entry(row).map(Entry::role)
	}

	pub fn flags(&self, row: usize, column: Column) -> CellFlags {
		if row >= self.row_count() {
			return CellFlags::default();
		}
		CellFlags {
			selectable: true,
			editable: column.is_editable(),
		}
	}

	/// Result of the most recent `add_row`, `set_cell` or `remove_rows`.
	pub fn edit_status(&self) -> EditStatus {
		self.edit_status
	}

	pub fn stats(&self) -> &CacheStats {
		self.cache.stats()
	}

	// ==================== Lookups ====================

	pub fn find(&self, address: &str) -> Option<usize> {
		self.cache.find(address)
	}

	/// Row of `address`, or -1 when it is not in the table.
	pub fn lookup_address(&self, address: &str) -> isize {
		self.cache.find(address).map_or(-1, |row| row as isize)
	}

	/// Label and nation for `address`; both empty when the address is unknown.
	pub fn labels_for_address(&self, address: &str) -> (String, String) {
		self.cache
			.find(address)
			.and_then(|row| self.cache.entry_at(row).ok())
			.map(|entry| (entry.label().to_string(), entry.nation().to_string()))
			.unwrap_or_default()
	}

	// ==================== Edits ====================

	/// Add a row and return its address.
	///
	/// An empty `address` asks the wallet for a new receiving address; anything else is tracked
	/// as a send address after a syntax check. Addresses are case-insensitive and are stored in
	/// their lowercase form.
	pub fn add_row(&mut self, label: &str, address: &str, nation: &str) -> Result<String, EditError> {
		let result = self.try_add_row(label, address, nation);
		self.edit_status = match &result {
			Ok(_) => EditStatus::Ok,
			Err(e) => e.status(),
		};
		result
	}

	fn try_add_row(&mut self, label: &str, address: &str, nation: &str) -> Result<String, EditError> {
		self.process_notifications();

		let (address, role) = if address.is_empty() {
			(self.generate_receiving_address()?, AddressRole::Receive)
		} else {
			if !self.wallet.is_valid_address_syntax(address) {
				return Err(EditError::InvalidAddress(address.to_string()));
			}
			// bech32 rejects mixed case, so lowercasing a valid address yields its canonical form.
			(address.to_ascii_lowercase(), AddressRole::Send)
		};

		if self.cache.find(&address).is_some() {
			return Err(EditError::DuplicateAddress(address));
		}

		self.wallet
			.add_address_book_entry(&address, label, nation, role)
			.map_err(|e| {
				error!("Failed to add {} to address book: {}", address, e);
				EditError::StoreWriteFailure(e)
			})?;
		self.process_notifications();

		self.update_entry(&address, label, nation, role, ChangeType::New);
		info!("Added {} address {}", role, address);
		Ok(address)
	}

	fn generate_receiving_address(&self) -> Result<String, EditError> {
		let unlock = self
			.wallet
			.ensure_unlocked()
			.map_err(EditError::WalletUnlockFailure)?;

		let generated = self
			.wallet
			.generate_new_receiving_address()
			.map_err(EditError::KeyGenerationFailure);

		if unlock == UnlockState::Temporary {
			self.wallet.relock();
		}
		generated
	}

	/// Change the label or nation of a row.
	///
	/// Returns [`EditStatus::NoChanges`] without touching the wallet when `value` is already
	/// the cell's content.
	pub fn set_cell(&mut self, row: usize, column: Column, value: &str) -> Result<EditStatus, EditError> {
		let result = self.try_set_cell(row, column, value);
		self.edit_status = match &result {
			Ok(status) => *status,
			Err(e) => e.status(),
		};
		result
	}

	fn try_set_cell(&mut self, row: usize, column: Column, value: &str) -> Result<EditStatus, EditError> {
		self.process_notifications();

		let entry = self
			.cache
			.entry_at(row)
			.map_err(|e| EditError::InvalidIndex(e.to_string()))?;

		let (label, nation) = match column {
			Column::Label => (value, entry.nation()),
			Column::Nation => (entry.label(), value),
			Column::Address => {
				return Err(EditError::InvalidIndex(format!(
					"column {:?} is not editable",
					column
				)));
			}
		};
		if label == entry.label() && nation == entry.nation() {
			return Ok(EditStatus::NoChanges);
		}

		let address = entry.address().to_string();
		let role = entry.role();
		let (label, nation) = (label.to_string(), nation.to_string());

		self.wallet
			.update_address_book_entry(&address, &label, &nation)
			.map_err(|e| {
				error!("Failed to update {} in address book: {}", address, e);
				EditError::StoreWriteFailure(e)
			})?;
		self.process_notifications();

		self.update_entry(&address, &label, &nation, role, ChangeType::Updated);
		Ok(EditStatus::Ok)
	}

	/// Delete `count` rows starting at `start`.
	///
	/// Rows are resolved to addresses up front, then deleted one at a time; a wallet refusal
	/// stops the loop and keeps the rows removed so far.
	pub fn remove_rows(&mut self, start: usize, count: usize) -> Result<(), EditError> {
		let result = self.try_remove_rows(start, count);
		self.edit_status = match &result {
			Ok(()) => EditStatus::Ok,
			Err(e) => e.status(),
		};
		result
	}

	fn try_remove_rows(&mut self, start: usize, count: usize) -> Result<(), EditError> {
		self.process_notifications();

		let end = start
			.checked_add(count)
			.filter(|end| count > 0 && *end <= self.cache.len())
			.ok_or_else(|| {
				EditError::InvalidIndex(format!(
					"cannot remove {} rows at {} from {} rows",
					count,
					start,
					self.cache.len()
				))
			})?;

		let doomed: Vec<Entry> = self.cache.entries()[start..end].to_vec();
		for entry in doomed {
			self.wallet
				.delete_address_book_entry(entry.address())
				.map_err(|e| {
					error!("Failed to remove {} from address book: {}", entry.address(), e);
					EditError::StoreWriteFailure(e)
				})?;
			self.process_notifications();

			self.update_entry(
				entry.address(),
				entry.label(),
				entry.nation(),
				entry.role(),
				ChangeType::Deleted,
			);
			info!("Removed address {}", entry.address());
		}
		Ok(())
	}

	// ==================== Wallet notifications ====================

	/// Apply one address book change and tell the views about it.
	pub fn update_entry(
		&mut self,
		address: &str,
		label: &str,
		nation: &str,
		role: AddressRole,
		change: ChangeType,
	) {
		self.cache.apply_event(address, label, nation, role, change);
		self.flush_row_changes();
	}

	pub fn handle_notification(&mut self, notification: WalletNotification) {
		match notification {
			WalletNotification::AddressBookChanged { record, change } => {
				self.cache.apply_record(&record, change);
				self.flush_row_changes();
			}
			WalletNotification::DefaultAddressChanged { address } => {
				debug!("Default address changed to {}", address);
				self.dispatcher
					.dispatch(&TableEvent::DefaultAddressChanged { address });
			}
		}
	}

	/// Apply every notification the wallet has queued, returning how many there were.
	pub fn process_notifications(&mut self) -> usize {
		let mut processed = 0;
		while let Ok(notification) = self.notifications.try_recv() {
			self.handle_notification(notification);
			processed += 1;
		}
		processed
	}

	/// Reload the whole table from the wallet.
	pub fn refresh(&mut self) {
		self.cache.refresh_all(&self.wallet);
		self.dispatcher.dispatch(&TableEvent::ModelReset);
	}

	fn flush_row_changes(&mut self) {
		while let Ok(change) = self.row_changes.try_recv() {
			self.dispatcher.dispatch(&change.into());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::address::{ADDRESS_PAYLOAD_LEN, Network, VotingAddress};
	use crate::config::VotingBookConfig;
	use crate::table::events::testing::RecordingHandler;
	use crate::wallet::{AddressBookRecord, LocalWallet, StaticPassphrase, WalletError};

	fn address(byte: u8) -> String {
		VotingAddress::new(Network::TestNet, [byte; ADDRESS_PAYLOAD_LEN])
			.encode()
			.unwrap()
	}

	fn wallet(keypool_size: usize) -> LocalWallet {
		LocalWallet::new(&VotingBookConfig {
			keypool_size,
			..VotingBookConfig::default()
		})
	}

	/// Wallet whose store accepts reads but refuses every write.
	struct ReadOnlyWallet(LocalWallet);

	impl WalletBackend for ReadOnlyWallet {
		fn enumerate_address_book(&self) -> Result<Vec<AddressBookRecord>, WalletError> {
			self.0.enumerate_address_book()
		}
		fn add_address_book_entry(&self, _: &str, _: &str, _: &str, _: AddressRole) -> Result<(), WalletError> {
			Err(WalletError::StoreError("read-only store".to_string()))
		}
		fn update_address_book_entry(&self, _: &str, _: &str, _: &str) -> Result<(), WalletError> {
			Err(WalletError::StoreError("read-only store".to_string()))
		}
		fn delete_address_book_entry(&self, _: &str) -> Result<(), WalletError> {
			Err(WalletError::StoreError("read-only store".to_string()))
		}
		fn generate_new_receiving_address(&self) -> Result<String, WalletError> {
			self.0.generate_new_receiving_address()
		}
		fn ensure_unlocked(&self) -> Result<UnlockState, WalletError> {
			self.0.ensure_unlocked()
		}
		fn relock(&self) {
			self.0.relock();
		}
		fn is_valid_address_syntax(&self, address: &str) -> bool {
			self.0.is_valid_address_syntax(address)
		}
		fn subscribe(&self) -> UnboundedReceiver<WalletNotification> {
			self.0.subscribe()
		}
	}

	fn model_with(
		wallet: LocalWallet,
		sends: &[u8],
	) -> (VotingTableModel<LocalWallet>, RecordingHandler) {
		for byte in sends {
			wallet
				.add_address_book_entry(&address(*byte), &format!("label{}", byte), "US", AddressRole::Send)
				.unwrap();
		}
		let mut model = VotingTableModel::new(wallet);
		let recorder = RecordingHandler::default();
		model.register_handler(Box::new(recorder.clone()));
		(model, recorder)
	}

	#[test]
	fn test_loads_sorted_snapshot() {
		let (model, _) = model_with(wallet(1), &[9, 3, 5]);
		assert_eq!(model.row_count(), 3);
		assert_eq!(model.column_count(), 3);
		let addresses: Vec<&str> = model.entries().iter().map(Entry::address).collect();
		let mut sorted = addresses.clone();
		sorted.sort();
		assert_eq!(addresses, sorted);
	}

	#[test]
	fn test_add_send_address() {
		let (mut model, recorder) = model_with(wallet(1), &[1, 2]);
		let new = address(7);

		let added = model.add_row("carol", &new, "DE").unwrap();

		assert_eq!(added, new);
		assert_eq!(model.edit_status(), EditStatus::Ok);
		let row = model.find(&new).unwrap();
		assert_eq!(model.role_at(row), Some(AddressRole::Send));
		assert_eq!(model.cell(row, Column::Label), Some("carol"));
		assert_eq!(model.cell(row, Column::Nation), Some("DE"));
		assert_eq!(
			recorder.take(),
			vec![TableEvent::RowsInserted { first: row, last: row }]
		);
		assert_eq!(model.wallet().enumerate_address_book().unwrap().len(), 3);
	}

	#[test]
	fn test_add_rejects_duplicates() {
		let (mut model, recorder) = model_with(wallet(1), &[1, 2]);
		let before = model.entries().to_vec();

		let err = model.add_row("again", &address(1), "FR").unwrap_err();

		assert!(matches!(err, EditError::DuplicateAddress(_)));
		assert_eq!(model.edit_status(), EditStatus::DuplicateAddress);
		assert_eq!(model.entries(), before.as_slice());
		assert!(recorder.take().is_empty());
	}

	#[test]
	fn test_add_rejects_uppercase_duplicate() {
		let (mut model, recorder) = model_with(wallet(1), &[]);
		let a = address(1);
		model.add_row("a", &a, "").unwrap();
		recorder.take();

		let err = model.add_row("b", &a.to_ascii_uppercase(), "").unwrap_err();

		assert!(matches!(err, EditError::DuplicateAddress(_)));
		assert_eq!(model.edit_status(), EditStatus::DuplicateAddress);
		assert_eq!(model.row_count(), 1);
		assert_eq!(model.wallet().enumerate_address_book().unwrap().len(), 1);
		assert!(recorder.take().is_empty());
	}

	#[test]
	fn test_add_stores_lowercase_address() {
		let (mut model, _) = model_with(wallet(1), &[]);
		let b = address(2);

		let added = model.add_row("b", &b.to_ascii_uppercase(), "").unwrap();

		assert_eq!(added, b);
		assert_eq!(model.lookup_address(&b), 0);
		assert_eq!(model.wallet().enumerate_address_book().unwrap()[0].address, b);
	}

	#[test]
	fn test_add_rejects_bad_syntax() {
		let (mut model, _) = model_with(wallet(1), &[]);
		let mainnet = VotingAddress::new(Network::MainNet, [1; ADDRESS_PAYLOAD_LEN])
			.encode()
			.unwrap();

		assert!(model.add_row("x", "nonsense", "").is_err());
		assert_eq!(model.edit_status(), EditStatus::InvalidAddress);
		assert!(model.add_row("x", &mainnet, "").is_err());
		assert_eq!(model.edit_status(), EditStatus::InvalidAddress);
		assert_eq!(model.row_count(), 0);
	}

	#[test]
	fn test_add_with_empty_address_generates_receive_address() {
		let (mut model, recorder) = model_with(wallet(2), &[1, 2, 3]);

		let generated = model.add_row("bob", "", "US").unwrap();

		assert_eq!(model.edit_status(), EditStatus::Ok);
		assert_eq!(model.row_count(), 4);
		let row = model.find(&generated).unwrap();
		assert_eq!(model.role_at(row), Some(AddressRole::Receive));
		assert_eq!(
			recorder.take(),
			vec![TableEvent::RowsInserted { first: row, last: row }]
		);
	}

	#[test]
	fn test_locked_wallet_without_unlock_fails() {
		let wallet = wallet(2);
		wallet.encrypt("secret");
		let (mut model, recorder) = model_with(wallet, &[]);

		assert!(model.add_row("bob", "", "US").is_err());
		assert_eq!(model.edit_status(), EditStatus::WalletUnlockFailure);
		assert_eq!(model.row_count(), 0);
		assert!(recorder.take().is_empty());
	}

	#[test]
	fn test_temporary_unlock_is_undone() {
		let wallet = wallet(2);
		wallet.encrypt("secret");
		wallet.set_unlock_provider(Box::new(StaticPassphrase("secret".to_string())));
		let (mut model, _) = model_with(wallet, &[]);

		model.add_row("bob", "", "US").unwrap();

		assert_eq!(model.edit_status(), EditStatus::Ok);
		assert!(model.wallet().is_locked());
	}

	#[test]
	fn test_key_generation_failure() {
		let (mut model, _) = model_with(wallet(0), &[]);

		assert!(matches!(
			model.add_row("bob", "", "US"),
			Err(EditError::KeyGenerationFailure(_))
		));
		assert_eq!(model.edit_status(), EditStatus::KeyGenerationFailure);
	}

	#[test]
	fn test_set_cell_without_change_skips_wallet() {
		let (mut model, recorder) = model_with(wallet(1), &[1]);
		let mut wallet_events = model.wallet().subscribe();
		let current = model.cell(0, Column::Label).unwrap().to_string();

		assert_eq!(
			model.set_cell(0, Column::Label, &current).unwrap(),
			EditStatus::NoChanges
		);
		assert_eq!(model.edit_status(), EditStatus::NoChanges);
		assert!(wallet_events.try_recv().is_err());
		assert!(recorder.take().is_empty());
	}

	#[test]
	fn test_set_cell_writes_through() {
		let (mut model, recorder) = model_with(wallet(1), &[1, 2]);
		let target = model.entry(1).unwrap().address().to_string();

		assert_eq!(
			model.set_cell(1, Column::Nation, "JP").unwrap(),
			EditStatus::Ok
		);

		assert_eq!(model.cell(1, Column::Nation), Some("JP"));
		assert_eq!(recorder.take(), vec![TableEvent::RowsChanged { first: 1, last: 1 }]);
		let stored = model
			.wallet()
			.enumerate_address_book()
			.unwrap()
			.into_iter()
			.find(|record| record.address == target)
			.unwrap();
		assert_eq!(stored.nation, "JP");
		assert_eq!(model.labels_for_address(&target), (stored.label, "JP".to_string()));
	}

	#[test]
	fn test_set_cell_rejects_address_column() {
		let (mut model, _) = model_with(wallet(1), &[1]);
		assert!(matches!(
			model.set_cell(0, Column::Address, &address(9)),
			Err(EditError::InvalidIndex(_))
		));
		assert_eq!(model.edit_status(), EditStatus::InvalidIndex);
		assert_eq!(Column::from_index(Column::Address.index()), Some(Column::Address));
		assert_eq!(Column::from_index(3), None);
		assert!(!model.flags(0, Column::Address).editable);
		assert!(model.flags(0, Column::Label).editable);
		assert_eq!(model.flags(5, Column::Label), CellFlags::default());
	}

	#[test]
	fn test_queued_changes_apply_before_edit() {
		let (mut model, recorder) = model_with(wallet(1), &[1]);
		let target = model.entry(0).unwrap().address().to_string();
		// Deleted behind the model's back, notification not yet processed.
		model.wallet().delete_address_book_entry(&target).unwrap();

		assert!(matches!(
			model.set_cell(0, Column::Label, "renamed"),
			Err(EditError::InvalidIndex(_))
		));
		assert_eq!(model.row_count(), 0);
		assert_eq!(recorder.take(), vec![TableEvent::RowsRemoved { first: 0, last: 0 }]);
		assert_eq!(model.process_notifications(), 0);
	}

	#[test]
	fn test_failed_wallet_write_leaves_cache_untouched() {
		let inner = wallet(1);
		for byte in [1, 2] {
			inner
				.add_address_book_entry(&address(byte), "kept", "US", AddressRole::Send)
				.unwrap();
		}
		let mut model = VotingTableModel::new(ReadOnlyWallet(inner));
		let recorder = RecordingHandler::default();
		model.register_handler(Box::new(recorder.clone()));
		let before = model.entries().to_vec();

		assert!(matches!(
			model.add_row("new", &address(3), ""),
			Err(EditError::StoreWriteFailure(_))
		));
		assert_eq!(model.edit_status(), EditStatus::StoreWriteFailure);
		assert!(matches!(
			model.set_cell(0, Column::Label, "renamed"),
			Err(EditError::StoreWriteFailure(_))
		));
		assert!(model.remove_rows(0, 1).is_err());
		assert_eq!(model.edit_status(), EditStatus::StoreWriteFailure);

		assert_eq!(model.entries(), before.as_slice());
		assert!(recorder.take().is_empty());
	}

	#[test]
	fn test_remove_range_shifts_rows() {
		let (mut model, recorder) = model_with(wallet(1), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
		let former_row_4 = model.entry(4).unwrap().clone();
		let removed = [
			model.entry(2).unwrap().address().to_string(),
			model.entry(3).unwrap().address().to_string(),
		];

		model.remove_rows(2, 2).unwrap();

		assert_eq!(model.edit_status(), EditStatus::Ok);
		assert_eq!(model.row_count(), 8);
		assert_eq!(model.entry(2), Some(&former_row_4));
		assert_eq!(
			recorder.take(),
			vec![
				TableEvent::RowsRemoved { first: 2, last: 2 },
				TableEvent::RowsRemoved { first: 2, last: 2 },
			]
		);
		for address in &removed {
			assert_eq!(model.lookup_address(address), -1);
		}

		// The wallet's echoes were consumed by the edit itself.
		assert_eq!(model.process_notifications(), 0);
		assert_eq!(model.stats().ignored, 2);
		assert!(recorder.take().is_empty());
	}

	#[test]
	fn test_remove_rows_out_of_range() {
		let (mut model, _) = model_with(wallet(1), &[1, 2]);
		assert!(model.remove_rows(1, 2).is_err());
		assert_eq!(model.edit_status(), EditStatus::InvalidIndex);
		assert!(model.remove_rows(0, 0).is_err());
		assert!(model.remove_rows(usize::MAX, 2).is_err());
		assert_eq!(model.row_count(), 2);
	}

	#[test]
	fn test_default_address_is_not_removed() {
		let (mut model, recorder) = model_with(wallet(1), &[1, 2]);
		let change = model.entry(0).unwrap().address().to_string();
		model.wallet().set_default_address(&change).unwrap();
		model.process_notifications();
		assert_eq!(
			recorder.take(),
			vec![TableEvent::DefaultAddressChanged {
				address: change.clone()
			}]
		);

		assert!(matches!(
			model.remove_rows(0, 2),
			Err(EditError::StoreWriteFailure(_))
		));
		assert_eq!(model.edit_status(), EditStatus::StoreWriteFailure);
		assert_eq!(model.row_count(), 2);
		assert_eq!(model.lookup_address(&change), 0);
	}

	#[test]
	fn test_remove_stops_at_refused_row() {
		let (mut model, recorder) = model_with(wallet(1), &[1, 2, 3]);
		let first = model.entry(0).unwrap().address().to_string();
		let middle = model.entry(1).unwrap().address().to_string();
		let last = model.entry(2).unwrap().address().to_string();
		model.wallet().set_default_address(&middle).unwrap();
		model.process_notifications();
		recorder.take();

		assert!(matches!(
			model.remove_rows(0, 3),
			Err(EditError::StoreWriteFailure(_))
		));

		assert_eq!(model.edit_status(), EditStatus::StoreWriteFailure);
		assert_eq!(model.lookup_address(&first), -1);
		assert_eq!(model.lookup_address(&middle), 0);
		assert_eq!(model.lookup_address(&last), 1);
		assert_eq!(recorder.take(), vec![TableEvent::RowsRemoved { first: 0, last: 0 }]);
		assert_eq!(model.wallet().enumerate_address_book().unwrap().len(), 2);
	}

	#[test]
	fn test_external_changes_flow_into_table() {
		let (mut model, recorder) = model_with(wallet(1), &[1]);
		let external = address(4);
		model
			.wallet()
			.add_address_book_entry(&external, "from rpc", "IT", AddressRole::Send)
			.unwrap();

		assert_eq!(model.process_notifications(), 1);

		let row = model.find(&external).unwrap();
		assert_eq!(
			recorder.take(),
			vec![TableEvent::RowsInserted { first: row, last: row }]
		);
		assert_eq!(
			model.labels_for_address(&external),
			("from rpc".to_string(), "IT".to_string())
		);
	}

	#[test]
	fn test_own_insert_echo_is_ignored() {
		let (mut model, recorder) = model_with(wallet(1), &[]);
		model.add_row("dave", &address(5), "").unwrap();
		recorder.take();

		assert_eq!(model.process_notifications(), 0);
		assert!(recorder.take().is_empty());
		assert_eq!(model.stats().ignored, 1);
	}

	#[test]
	fn test_add_then_remove_never_revives_row() {
		let (mut model, recorder) = model_with(wallet(1), &[]);
		let wallet_rows = |model: &VotingTableModel<LocalWallet>| {
			model.wallet().enumerate_address_book().unwrap().len()
		};

		model.add_row("frank", &address(6), "").unwrap();
		assert_eq!((model.row_count(), wallet_rows(&model)), (1, 1));
		model.remove_rows(0, 1).unwrap();
		assert_eq!((model.row_count(), wallet_rows(&model)), (0, 0));

		assert_eq!(model.process_notifications(), 0);
		assert_eq!(model.row_count(), 0);
		assert_eq!(
			recorder.take(),
			vec![
				TableEvent::RowsInserted { first: 0, last: 0 },
				TableEvent::RowsRemoved { first: 0, last: 0 },
			]
		);
	}

	#[test]
	fn test_own_update_notifies_once() {
		let (mut model, recorder) = model_with(wallet(1), &[1]);

		model.set_cell(0, Column::Label, "renamed").unwrap();

		assert_eq!(recorder.take(), vec![TableEvent::RowsChanged { first: 0, last: 0 }]);
		assert_eq!(model.process_notifications(), 0);
		assert_eq!(model.stats().updated, 1);
		assert_eq!(model.stats().ignored, 1);
	}

	#[test]
	fn test_reads_leave_status_alone() {
		let (mut model, _) = model_with(wallet(1), &[1]);
		let _ = model.add_row("dup", &address(1), "");
		assert_eq!(model.edit_status(), EditStatus::DuplicateAddress);
		assert!(!model.edit_status().is_ok());

		model.find(&address(1));
		model.lookup_address("missing");
		assert_eq!(model.labels_for_address("missing"), (String::new(), String::new()));
		assert_eq!(model.edit_status(), EditStatus::DuplicateAddress);
	}

	#[test]
	fn test_refresh_resets_view() {
		let (mut model, recorder) = model_with(wallet(1), &[1, 2]);
		model.refresh();
		assert_eq!(recorder.take(), vec![TableEvent::ModelReset]);
		assert_eq!(model.row_count(), 2);
		assert_eq!(model.stats().refreshes, 2);
	}
}
