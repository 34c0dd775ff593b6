//! Address Book Table Module
//!
//! This module keeps a sorted, row indexed projection of the wallet address book in step with
//! the wallet and exposes it to table views. It is composed of several submodules:
//!
//! - `cache`: `AddressCache`, the ordered entry sequence and its idempotent change application.
//! - `events`: Row changes emitted by the cache and the `TableEvent`s dispatched to views.
//! - `model`: `VotingTableModel`, which validates edits, writes them to the wallet and feeds the
//!   result back through the cache.
//! - `stats`: Counters describing how upstream events were reconciled.
//! - `status`: The edit status register and the errors behind it.
//!
//! All mutation of the cache goes through `AddressCache::apply_event`, whether the change was
//! made by the model itself or reported by the wallet.

/// Sorted mirror of the address book
pub mod cache;
/// Row change and view event plumbing
pub mod events;
/// Validated edit gateway and view contract
pub mod model;
/// Reconciliation counters
pub mod stats;
/// Edit outcomes
pub mod status;

pub use cache::{AddressCache, CacheError, Entry};
pub use events::{EventDispatcher, RowChange, TableEvent, TableEventHandler};
pub use model::{CellFlags, Column, VotingTableModel};
pub use stats::CacheStats;
pub use status::{EditError, EditStatus};
