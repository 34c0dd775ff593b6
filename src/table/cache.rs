//! Sorted, row indexed mirror of the wallet address book.
//!
//! `AddressCache` keeps its entries strictly ordered by address with no duplicates, so row `n` of
//! the table is always the `n`th entry. Upstream changes arrive through `apply_event` and are
//! applied idempotently: a repeated insert or a delete of an absent address leaves the cache
//! untouched, as does an update that changes no field. The model relies on this when it applies its
//! own write after the wallet's echo of the same change has already landed. Each effective change is sent as a `RowChange` carrying the row it
//! occupies after the change.

use crate::table::events::RowChange;
use crate::table::stats::CacheStats;
use crate::wallet::{AddressBookRecord, AddressRole, ChangeType, WalletBackend};

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
	#[error("Row {row} out of range for {len} entries")]
	OutOfRange { row: usize, len: usize },
}

/// One row of the table. The address is fixed once the entry exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	address: String,
	label: String,
	nation: String,
	role: AddressRole,
}

impl Entry {
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

	pub fn address(&self) -> &str {
		&self.address
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn nation(&self) -> &str {
		&self.nation
	}

	pub fn role(&self) -> AddressRole {
		self.role
	}
}

impl From<AddressBookRecord> for Entry {
	fn from(record: AddressBookRecord) -> Self {
		Self {
			address: record.address,
			label: record.label,
			nation: record.nation,
			role: record.role,
		}
	}
}

pub struct AddressCache {
	entries: Vec<Entry>,
	changes: UnboundedSender<RowChange>,
	stats: CacheStats,
}

impl AddressCache {
	/// Empty cache reporting its row changes on `changes`.
	pub fn new(changes: UnboundedSender<RowChange>) -> Self {
		Self {
			entries: Vec::new(),
			changes,
			stats: CacheStats::default(),
		}
	}

	/// Replace the cache with a fresh enumeration of the wallet's address book.
	///
	/// A wallet that cannot enumerate leaves the cache empty.
	pub fn refresh_all<W>(&mut self, wallet: &W) -> &[Entry]
	where
		W: WalletBackend + ?Sized,
	{
		let mut entries: Vec<Entry> = match wallet.enumerate_address_book() {
			Ok(records) => records.into_iter().map(Entry::from).collect(),
			Err(e) => {
				warn!("Failed to enumerate address book, cache left empty: {}", e);
				Vec::new()
			}
		};

		entries.sort_by(|a, b| a.address.cmp(&b.address));
		entries.dedup_by(|later, earlier| later.address == earlier.address);

		self.stats.record_refresh(entries.len());
		debug!("Address cache refreshed with {} entries", entries.len());
		self.entries = entries;
		&self.entries
	}

	fn search(&self, address: &str) -> Result<usize, usize> {
		self.entries
			.binary_search_by(|entry| entry.address.as_str().cmp(address))
	}

	/// Row currently holding `address`.
	pub fn find(&self, address: &str) -> Option<usize> {
		self.search(address).ok()
	}

	pub fn apply_event(
		&mut self,
		address: &str,
		label: &str,
		nation: &str,
		role: AddressRole,
		change: ChangeType,
	) {
		match change {
			ChangeType::New => self.insert(address, label, nation, role),
			ChangeType::Updated => match self.find(address) {
				Some(row) => {
					let entry = &mut self.entries[row];
					if entry.label == label && entry.nation == nation && entry.role == role {
						debug!("Got update for {} with unchanged fields, ignoring", address);
						self.stats.record_ignored();
						return;
					}
					entry.label = label.to_string();
					entry.nation = nation.to_string();
					entry.role = role;
					self.stats.record_update();
					self.emit(RowChange::Changed(row));
				}
				None => {
					warn!("Got update for {} which is not cached, inserting", address);
					self.insert(address, label, nation, role);
				}
			},
			ChangeType::Deleted => match self.find(address) {
				Some(row) => {
					self.entries.remove(row);
					self.stats.record_remove();
					self.emit(RowChange::Removed(row));
				}
				None => {
					debug!("Got delete for {} which is not cached, ignoring", address);
					self.stats.record_ignored();
				}
			},
		}
	}

	pub fn apply_record(&mut self, record: &AddressBookRecord, change: ChangeType) {
		self.apply_event(
			&record.address,
			&record.label,
			&record.nation,
			record.role,
			change,
		);
	}

	fn insert(&mut self, address: &str, label: &str, nation: &str, role: AddressRole) {
		match self.search(address) {
			Ok(_) => {
				debug!("Got insert for {} which is already cached, ignoring", address);
				self.stats.record_ignored();
			}
			Err(row) => {
				self.entries
					.insert(row, Entry::new(address, label, nation, role));
				self.stats.record_insert();
				self.emit(RowChange::Inserted(row));
			}
		}
	}

	fn emit(&self, change: RowChange) {
		debug!("Address cache {:?}", change);
		if self.changes.send(change).is_err() {
			debug!("Row change receiver dropped");
		}
	}

	pub fn entry_at(&self, row: usize) -> Result<&Entry, CacheError> {
		self.entries.get(row).ok_or(CacheError::OutOfRange {
			row,
			len: self.entries.len(),
		})
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	pub fn stats(&self) -> &CacheStats {
		&self.stats
	}

	/// True when entries are strictly increasing by address.
	pub fn is_sorted(&self) -> bool {
		self.entries
			.windows(2)
			.all(|pair| pair[0].address < pair[1].address)
	}
}
