//! HTTP handlers. Each delegates to a service and maps its errors to flash
//! messages, redirects or status codes.

use chrono::NaiveDate;

pub mod api;
pub mod delivery_types;
pub mod entries;
pub mod main;
pub mod summary;

/// Calendar day of the server, used to pick default periods and dates.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
