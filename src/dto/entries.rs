//! DTOs for the deliverer pages.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::deliverer::Deliverer;
use crate::domain::delivery_type::DeliveryType;
use crate::domain::period::BillingPeriod;
use crate::domain::summary::DeliverySummary;
use crate::services::gateway::DataSource;

/// Data required to render the entry form.
#[derive(Debug, Serialize)]
pub struct EntryPageData {
    pub deliverer: Deliverer,
    /// Types with a fixed price, one quantity input each.
    pub delivery_types: Vec<DeliveryType>,
    /// Catch-all type for extra rows, when the hub has one.
    pub extra_type: Option<DeliveryType>,
    pub today: NaiveDate,
    pub source: DataSource,
}

/// One line of a past entry.
#[derive(Debug, Serialize)]
pub struct EntryItemRow {
    pub type_name: String,
    pub quantity: u32,
    pub value: f64,
    pub amount: f64,
    pub is_extra: bool,
}

/// A past entry as shown in the history table.
#[derive(Debug, Serialize)]
pub struct EntryRow {
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub items: Vec<EntryItemRow>,
    pub total: f64,
}

/// Data required to render the deliverer's own history.
#[derive(Debug, Serialize)]
pub struct HistoryPageData {
    pub deliverer: Deliverer,
    pub period: BillingPeriod,
    pub period_label: String,
    pub entries: Vec<EntryRow>,
    pub summary: Option<DeliverySummary>,
    pub source: Option<DataSource>,
}
