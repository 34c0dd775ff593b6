pub mod address;
pub mod config;
pub mod table;
pub mod wallet;

pub use config::VotingBookConfig;
pub use table::{EditStatus, TableEvent, VotingTableModel};
pub use wallet::{LocalWallet, WalletBackend};
