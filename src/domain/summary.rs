//! Per-deliverer report rows derived from entries over a billing period.

use serde::Serialize;

use crate::domain::types::{DelivererId, DeliveryTypeId};

/// Quantity of one delivery type within a summary.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TypeTotal {
    pub type_id: DeliveryTypeId,
    pub type_name: String,
    pub quantity: u64,
    /// Nominal per-unit price of the type.
    pub value: f64,
    pub is_extra: bool,
}

/// Aggregated deliveries of one deliverer. Never stored.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DeliverySummary {
    pub deliverer_id: DelivererId,
    pub deliverer_name: String,
    pub total_deliveries: u64,
    pub deliveries_by_type: Vec<TypeTotal>,
    pub total_extras: u64,
    pub extra_values: f64,
    /// Regular items priced at their logged value plus `extra_values`.
    pub total_value: f64,
}

impl DeliverySummary {
    pub fn quantity_of(&self, type_id: DeliveryTypeId) -> Option<u64> {
        self.deliveries_by_type
            .iter()
            .find(|row| row.type_id == type_id)
            .map(|row| row.quantity)
    }
}
