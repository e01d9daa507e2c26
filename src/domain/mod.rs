//! Domain entities of the delivery log and the value objects they are built from.

pub mod deliverer;
pub mod delivery_entry;
pub mod delivery_type;
pub mod period;
pub mod role;
pub mod summary;
pub mod types;
