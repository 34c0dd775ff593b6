use tracing::{error, info, warn};
use voting_book_sync::address::VotingAddress;
use voting_book_sync::table::{Column, EditStatus, TableEvent, TableEventHandler, VotingTableModel};
use voting_book_sync::wallet::{AddressBookRepository, FileAddressBookRepository, LocalWallet};
use voting_book_sync::VotingBookConfig;

/// Stands in for a table view by logging what it would repaint.
struct LoggingView;

impl TableEventHandler for LoggingView {
	fn handle(&mut self, event: &TableEvent) {
		info!("View event: {:?}", event);
	}

	fn name(&self) -> &'static str {
		"LoggingView"
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
	let (config, config_error) = match VotingBookConfig::from_env() {
		Ok(config) => (config, None),
		Err(e) => (VotingBookConfig::default(), Some(e)),
	};

	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
		)
		.with_target(false)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_file(false)
		.with_line_number(false)
		.init();

	if let Some(e) = config_error {
		warn!("Ignoring environment configuration: {}", e);
	}
	info!(
		"Starting voting address book on {} with data in {:?}",
		config.network, config.data_dir
	);

	let repository = FileAddressBookRepository::new(config.data_dir.clone());
	let wallet = match repository.load().await {
		Ok(Some(snapshot)) => LocalWallet::from_snapshot(&config, snapshot),
		Ok(None) => {
			info!("No address book found, starting empty");
			LocalWallet::new(&config)
		}
		Err(e) => {
			error!("Failed to load address book: {}", e);
			return;
		}
	};

	let mut model = VotingTableModel::new(wallet.clone());
	model.register_handler(Box::new(LoggingView));

	if wallet.default_address().is_none() {
		match model.add_row("change", "", "") {
			Ok(address) => {
				if let Err(e) = wallet.set_default_address(&address) {
					warn!("Failed to set default address: {}", e);
				}
			}
			Err(e) => warn!("Failed to create receiving address: {}", e),
		}
	}

	match VotingAddress::random(config.network).encode() {
		Ok(counterparty) => {
			if let Err(e) = model.add_row("counterparty", &counterparty, "") {
				warn!("Failed to add {}: {} ({:?})", counterparty, e, model.edit_status());
			}
		}
		Err(e) => warn!("Failed to encode counterparty address: {}", e),
	}

	if model.row_count() > 0 {
		match model.set_cell(0, Column::Nation, "home") {
			Ok(EditStatus::NoChanges) => info!("Row 0 already tagged"),
			Ok(_) => info!("Tagged row 0"),
			Err(e) => warn!("Failed to tag row 0: {}", e),
		}
	}

	let echoed = model.process_notifications();
	info!("Processed {} wallet notifications", echoed);

	for (row, entry) in model.entries().iter().enumerate() {
		info!(
			"{:>3} [{}] {} label={:?} nation={:?}",
			row,
			entry.role(),
			entry.address(),
			entry.label(),
			entry.nation()
		);
	}
	model.stats().log();

	if let Err(e) = repository.save(&wallet.snapshot()).await {
		error!("Failed to save address book: {}", e);
	}
}
