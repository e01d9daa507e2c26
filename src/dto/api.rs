//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

use crate::domain::delivery_type::DeliveryType;
use crate::domain::period::BillingPeriod;
use crate::domain::summary::DeliverySummary;
use crate::services::gateway::DataSource;

/// Body of `GET /api/v1/summary`.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub period: BillingPeriod,
    /// `null` when neither store could be read.
    pub source: Option<DataSource>,
    pub summaries: Vec<DeliverySummary>,
}

/// Body of `GET /api/v1/delivery-types`.
#[derive(Debug, Serialize)]
pub struct DeliveryTypesResponse {
    pub source: DataSource,
    pub delivery_types: Vec<DeliveryType>,
}
