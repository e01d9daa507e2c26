//! Forms for maintaining the hub's delivery types.

use serde::Deserialize;
use validator::Validate;

use crate::domain::delivery_type::{NewDeliveryType, UpdateDeliveryType};
use crate::domain::types::{DeliveryTypeId, DeliveryTypeName, HubId, UnitValue};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a delivery type.
pub struct AddDeliveryTypeForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub unit_value: f64,
    /// Checkbox; present only when ticked.
    #[serde(default)]
    pub is_extra: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for renaming or repricing a delivery type.
pub struct UpdateDeliveryTypeForm {
    pub id: i32,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub unit_value: f64,
}

pub struct AddDeliveryTypePayload {
    pub name: DeliveryTypeName,
    pub unit_value: UnitValue,
    pub is_extra: bool,
}

impl TryFrom<AddDeliveryTypeForm> for AddDeliveryTypePayload {
    type Error = FormError;

    fn try_from(form: AddDeliveryTypeForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: DeliveryTypeName::new(form.name).map_err(|_| FormError::InvalidName)?,
            unit_value: UnitValue::new(form.unit_value).map_err(|_| FormError::InvalidValue)?,
            is_extra: form.is_extra.is_some(),
        })
    }
}

impl AddDeliveryTypePayload {
    pub fn into_domain(self, hub_id: HubId) -> NewDeliveryType {
        NewDeliveryType::new(hub_id, self.name, self.unit_value, self.is_extra)
    }
}

pub struct UpdateDeliveryTypePayload {
    pub id: DeliveryTypeId,
    pub updates: UpdateDeliveryType,
}

impl TryFrom<UpdateDeliveryTypeForm> for UpdateDeliveryTypePayload {
    type Error = FormError;

    fn try_from(form: UpdateDeliveryTypeForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = DeliveryTypeName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let unit_value = UnitValue::new(form.unit_value).map_err(|_| FormError::InvalidValue)?;

        Ok(Self {
            id: DeliveryTypeId::new(form.id).map_err(|_| FormError::UnknownDeliveryType)?,
            updates: UpdateDeliveryType::new(name, unit_value),
        })
    }
}
