//! Database models backing the delivery repository.

pub mod config;
pub mod deliverer;
pub mod delivery_entry;
pub mod delivery_type;
