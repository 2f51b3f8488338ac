//! Stockroom Core Library
//!
//! Domain models and business logic for the inventory and sales tracker,
//! plus the collaborator traits the web layer talks to.

pub mod error;
pub mod identity;
pub mod product;
pub mod profile;
pub mod sale;
pub mod store;

pub use error::{StockError, StockResult};
pub use identity::{Identity, IdentityProvider, StaticIdentityProvider};
pub use store::{InventoryStore, MemoryStore};
