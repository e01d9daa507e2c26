//! DTO modules that bridge services with templates and APIs.

pub mod api;
pub mod delivery_types;
pub mod entries;
pub mod summary;
