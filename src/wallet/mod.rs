//! Wallet side of the voting address book.
//!
//! - `backend`: the `WalletBackend` trait the table model talks to.
//! - `local`: `LocalWallet`, an in-process implementation with locking, a keypool and
//!   change notifications.
//! - `repositories`: snapshot persistence for the local wallet's address book.
//! - `types`: records, roles, change kinds, notifications and errors shared by all of the above.

pub mod backend;
pub mod local;
pub mod repositories;
pub mod types;

pub use backend::{UnlockState, WalletBackend};
pub use local::{LocalWallet, StaticPassphrase, UnlockProvider};
pub use repositories::{AddressBookRepository, AddressBookSnapshot, FileAddressBookRepository};
pub use types::*;
