//! Diesel models for delivery types.

use diesel::prelude::*;

use crate::domain::delivery_type::{
    DeliveryType as DomainDeliveryType, NewDeliveryType as DomainNewDeliveryType,
    UpdateDeliveryType as DomainUpdateDeliveryType,
};
use crate::domain::types::{DeliveryTypeId, DeliveryTypeName, HubId, TypeConstraintError, UnitValue};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::delivery_types)]
/// Diesel model for [`crate::domain::delivery_type::DeliveryType`].
pub struct DeliveryType {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub unit_value: f64,
    pub is_extra: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::delivery_types)]
/// Insertable form of [`DeliveryType`].
pub struct NewDeliveryType<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub unit_value: f64,
    pub is_extra: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::delivery_types)]
/// Data used when updating a [`DeliveryType`] record.
pub struct UpdateDeliveryType<'a> {
    pub name: &'a str,
    pub unit_value: f64,
}

impl TryFrom<DeliveryType> for DomainDeliveryType {
    type Error = TypeConstraintError;

    fn try_from(value: DeliveryType) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DeliveryTypeId::try_from(value.id)?,
            hub_id: HubId::try_from(value.hub_id)?,
            name: DeliveryTypeName::new(value.name)?,
            unit_value: UnitValue::new(value.unit_value)?,
            is_extra: value.is_extra,
        })
    }
}

impl<'a> From<&'a DomainNewDeliveryType> for NewDeliveryType<'a> {
    fn from(value: &'a DomainNewDeliveryType) -> Self {
        Self {
            hub_id: value.hub_id.get(),
            name: value.name.as_str(),
            unit_value: value.unit_value.get(),
            is_extra: value.is_extra,
        }
    }
}

impl<'a> From<&'a DomainUpdateDeliveryType> for UpdateDeliveryType<'a> {
    fn from(value: &'a DomainUpdateDeliveryType) -> Self {
        Self {
            name: value.name.as_str(),
            unit_value: value.unit_value.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_row_converts_into_domain() {
        let row = DeliveryType {
            id: 4,
            hub_id: 1,
            name: "Extra".to_string(),
            unit_value: 0.0,
            is_extra: true,
        };

        let domain = DomainDeliveryType::try_from(row).unwrap();

        assert_eq!(domain.id.get(), 4);
        assert_eq!(domain.name.as_str(), "Extra");
        assert!(domain.is_extra);
    }

    #[test]
    fn negative_price_in_db_is_rejected() {
        let row = DeliveryType {
            id: 1,
            hub_id: 1,
            name: "Entrega Local".to_string(),
            unit_value: -1.0,
            is_extra: false,
        };

        assert_eq!(
            DomainDeliveryType::try_from(row),
            Err(TypeConstraintError::InvalidMoney)
        );
    }

    #[test]
    fn domain_new_type_converts_into_insertable() {
        let domain = DomainNewDeliveryType::new(
            HubId::new(3).unwrap(),
            DeliveryTypeName::new("Entrega Distante").unwrap(),
            UnitValue::new(7.4).unwrap(),
            false,
        );

        let insertable: NewDeliveryType = (&domain).into();

        assert_eq!(insertable.hub_id, 3);
        assert_eq!(insertable.name, "Entrega Distante");
        assert_eq!(insertable.unit_value, 7.4);
        assert!(!insertable.is_extra);
    }
}
