//! Delivery entries logged by deliverers.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{DelivererId, DeliveryEntryId, DeliveryTypeId, HubId, UnitValue};

/// One counted line of an entry.
///
/// `value` is the per-unit price applied to this item: the type's canonical
/// price for regular types, the caller's own price for extras.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeliveryItem {
    pub type_id: DeliveryTypeId,
    pub quantity: u32,
    pub value: UnitValue,
}

impl DeliveryItem {
    #[must_use]
    pub fn new(type_id: DeliveryTypeId, quantity: u32, value: UnitValue) -> Self {
        Self {
            type_id,
            quantity,
            value,
        }
    }

    /// Monetary amount of the item (`quantity * value`).
    pub fn amount(&self) -> f64 {
        f64::from(self.quantity) * self.value.get()
    }
}

/// Everything one deliverer logged in a single submission for one day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeliveryEntry {
    pub id: DeliveryEntryId,
    pub hub_id: HubId,
    pub deliverer_id: DelivererId,
    pub date: NaiveDate,
    pub items: Vec<DeliveryItem>,
    pub created_at: NaiveDateTime,
}

/// A validated submission awaiting persistence.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewDeliveryEntry {
    pub hub_id: HubId,
    pub deliverer_id: DelivererId,
    pub date: NaiveDate,
    pub items: Vec<DeliveryItem>,
}

impl NewDeliveryEntry {
    /// Builds a submission, dropping items with zero quantity.
    #[must_use]
    pub fn new(
        hub_id: HubId,
        deliverer_id: DelivererId,
        date: NaiveDate,
        items: Vec<DeliveryItem>,
    ) -> Self {
        Self {
            hub_id,
            deliverer_id,
            date,
            items: items.into_iter().filter(|item| item.quantity > 0).collect(),
        }
    }

    /// Attaches storage-assigned identity to the submission.
    #[must_use]
    pub fn into_entry(self, id: DeliveryEntryId, created_at: NaiveDateTime) -> DeliveryEntry {
        DeliveryEntry {
            id,
            hub_id: self.hub_id,
            deliverer_id: self.deliverer_id,
            date: self.date,
            items: self.items,
            created_at,
        }
    }
}
