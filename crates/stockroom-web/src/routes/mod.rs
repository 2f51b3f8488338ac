//! Route handlers.

pub mod products;
pub mod profile;
pub mod root;
pub mod sales;
