//! Billable delivery categories maintained per hub.

use serde::{Deserialize, Serialize};

use crate::domain::types::{DeliveryTypeId, DeliveryTypeName, HubId, UnitValue};

/// A delivery category with its canonical per-unit price.
///
/// The `is_extra` type is the catch-all category whose items carry their own
/// per-instance value instead of `unit_value`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeliveryType {
    pub id: DeliveryTypeId,
    pub hub_id: HubId,
    pub name: DeliveryTypeName,
    pub unit_value: UnitValue,
    pub is_extra: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewDeliveryType {
    pub hub_id: HubId,
    pub name: DeliveryTypeName,
    pub unit_value: UnitValue,
    pub is_extra: bool,
}

impl NewDeliveryType {
    #[must_use]
    pub fn new(hub_id: HubId, name: DeliveryTypeName, unit_value: UnitValue, is_extra: bool) -> Self {
        Self {
            hub_id,
            name,
            unit_value,
            is_extra,
        }
    }
}

/// Changes applied to an existing type. The extra flag is fixed at creation.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateDeliveryType {
    pub name: DeliveryTypeName,
    pub unit_value: UnitValue,
}

impl UpdateDeliveryType {
    #[must_use]
    pub fn new(name: DeliveryTypeName, unit_value: UnitValue) -> Self {
        Self { name, unit_value }
    }
}

/// Returns the hub's catch-all extra type, if one is configured.
pub fn find_extra_type(types: &[DeliveryType]) -> Option<&DeliveryType> {
    types.iter().find(|delivery_type| delivery_type.is_extra)
}
