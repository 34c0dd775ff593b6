use crate::address::Network;
use crate::wallet::{AddressBookRecord, WalletError};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

const BOOK_FILENAME: &str = "address_book.json";
const META_FILENAME: &str = "address_book.meta.json";

/// Persisted form of the local wallet's address book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressBookSnapshot {
	pub network: Network,
	pub entries: Vec<AddressBookRecord>,
	pub default_address: Option<String>,
}

/// Repository for address book persistence
#[async_trait::async_trait]
pub trait AddressBookRepository {
	async fn save(&self, snapshot: &AddressBookSnapshot) -> Result<(), WalletError>;
	async fn load(&self) -> Result<Option<AddressBookSnapshot>, WalletError>;
}

/// File-based implementation of AddressBookRepository
pub struct FileAddressBookRepository {
	data_dir: PathBuf,
}

impl FileAddressBookRepository {
	pub fn new(data_dir: PathBuf) -> Self {
		Self { data_dir }
	}

	fn book_filename(&self) -> PathBuf {
		self.data_dir.join(BOOK_FILENAME)
	}

	fn metadata_filename(&self) -> PathBuf {
		self.data_dir.join(META_FILENAME)
	}
}

#[async_trait::async_trait]
impl AddressBookRepository for FileAddressBookRepository {
	async fn save(&self, snapshot: &AddressBookSnapshot) -> Result<(), WalletError> {
		tokio::fs::create_dir_all(&self.data_dir).await?;

		// Create metadata
		let metadata = serde_json::json!({
			"entries": snapshot.entries.len(),
			"network": snapshot.network,
			"timestamp": chrono::Utc::now().to_rfc3339(),
		});
		tokio::fs::write(
			self.metadata_filename(),
			serde_json::to_string_pretty(&metadata)?,
		)
		.await?;

		let filename = self.book_filename();
		tokio::fs::write(&filename, serde_json::to_string_pretty(snapshot)?).await?;

		info!(
			"Saved {} address book entries to {:?}",
			snapshot.entries.len(),
			filename
		);
		Ok(())
	}

	async fn load(&self) -> Result<Option<AddressBookSnapshot>, WalletError> {
		let filename = self.book_filename();

		// Check if file exists
		if !tokio::fs::try_exists(&filename).await? {
			return Ok(None);
		}

		let content = tokio::fs::read_to_string(&filename).await?;
		let snapshot: AddressBookSnapshot = serde_json::from_str(&content)?;

		info!(
			"Loaded {} address book entries from {:?}",
			snapshot.entries.len(),
			filename
		);
		Ok(Some(snapshot))
	}
}
