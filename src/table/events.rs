//! Event system for the address book table.
//!
//! The cache reports every effective mutation as a `RowChange` on the channel it was given at
//! construction. The model drains that channel after each mutation and republishes the changes as
//! `TableEvent`s through the `EventDispatcher`, together with model level events such as default
//! address changes and full resets. Views register a `TableEventHandler` to be told which rows to
//! repaint; row numbers are always valid against the table as it is when the event is delivered.

use tracing::debug;

/// A single row level change made by the cache, positioned after the change was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    Inserted(usize),
    Changed(usize),
    Removed(usize),
}

/// Events delivered to table views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// Rows `first..=last` were inserted
    RowsInserted { first: usize, last: usize },
    /// Cells in rows `first..=last` changed
    RowsChanged { first: usize, last: usize },
    /// Rows `first..=last` were removed
    RowsRemoved { first: usize, last: usize },
    /// The wallet designated a new default address
    DefaultAddressChanged { address: String },
    /// The whole table was rebuilt from the wallet
    ModelReset,
}

impl From<RowChange> for TableEvent {
    fn from(change: RowChange) -> Self {
        match change {
            RowChange::Inserted(row) => TableEvent::RowsInserted {
                first: row,
                last: row,
            },
            RowChange::Changed(row) => TableEvent::RowsChanged {
                first: row,
                last: row,
            },
            RowChange::Removed(row) => TableEvent::RowsRemoved {
                first: row,
                last: row,
            },
        }
    }
}

/// Trait for handling table events.
pub trait TableEventHandler {
    fn handle(&mut self, event: &TableEvent);

    /// Get the name of this handler for logging and diagnostics.
    fn name(&self) -> &'static str;
}

/// Event dispatcher that manages multiple event handlers.
///
/// Handlers are called in the order they are registered.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Box<dyn TableEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register_handler(&mut self, handler: Box<dyn TableEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn dispatch(&mut self, event: &TableEvent) {
        for handler in &mut self.handlers {
            debug!("Dispatching {:?} to {}", event, handler.name());
            handler.handle(event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}
