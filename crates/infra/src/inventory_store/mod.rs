//! Inventory document store boundary.
//!
//! Stores persist whole inventory documents and apply lifecycle commands to
//! them atomically. They hold no business rules: deciding whether a command
//! is allowed is delegated to the `Inventory` aggregate.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryInventoryStore;
pub use postgres::PostgresInventoryStore;
pub use r#trait::{InventoryKey, InventoryStore, StoreError};
