//! Diesel models for delivery entries and their items.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::delivery_entry::{
    DeliveryEntry as DomainDeliveryEntry, DeliveryItem as DomainDeliveryItem,
};
use crate::domain::types::{
    DelivererId, DeliveryEntryId, DeliveryTypeId, HubId, TypeConstraintError, UnitValue,
    quantity_from_db,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::delivery_entries)]
/// Diesel model for the header of [`crate::domain::delivery_entry::DeliveryEntry`].
pub struct DeliveryEntry {
    pub id: i32,
    pub hub_id: i32,
    pub deliverer_id: i32,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::delivery_entries)]
pub struct NewDeliveryEntry {
    pub hub_id: i32,
    pub deliverer_id: i32,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::delivery_items)]
#[diesel(belongs_to(DeliveryEntry, foreign_key = entry_id))]
/// One item row owned by a [`DeliveryEntry`].
pub struct DeliveryItem {
    pub id: i32,
    pub entry_id: i32,
    pub type_id: i32,
    pub quantity: i32,
    pub value: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::delivery_items)]
pub struct NewDeliveryItem {
    pub entry_id: i32,
    pub type_id: i32,
    pub quantity: i32,
    pub value: f64,
}

impl NewDeliveryItem {
    pub fn from_domain(entry_id: i32, item: &DomainDeliveryItem) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            entry_id,
            type_id: item.type_id.get(),
            quantity: i32::try_from(item.quantity).map_err(|_| {
                TypeConstraintError::InvalidValue(format!("quantity {} is too large", item.quantity))
            })?,
            value: item.value.get(),
        })
    }
}

impl TryFrom<DeliveryItem> for DomainDeliveryItem {
    type Error = TypeConstraintError;

    fn try_from(value: DeliveryItem) -> Result<Self, Self::Error> {
        Ok(Self {
            type_id: DeliveryTypeId::try_from(value.type_id)?,
            quantity: quantity_from_db(value.quantity)?,
            value: UnitValue::new(value.value)?,
        })
    }
}

impl TryFrom<(DeliveryEntry, Vec<DeliveryItem>)> for DomainDeliveryEntry {
    type Error = TypeConstraintError;

    fn try_from((entry, items): (DeliveryEntry, Vec<DeliveryItem>)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DeliveryEntryId::try_from(entry.id)?,
            hub_id: HubId::try_from(entry.hub_id)?,
            deliverer_id: DelivererId::try_from(entry.deliverer_id)?,
            date: entry.date,
            items: items
                .into_iter()
                .map(DomainDeliveryItem::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            created_at: entry.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> DeliveryEntry {
        DeliveryEntry {
            id: 10,
            hub_id: 1,
            deliverer_id: 2,
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            created_at: NaiveDate::from_ymd_opt(2024, 2, 1)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn header_and_items_convert_into_domain_entry() {
        let items = vec![DeliveryItem {
            id: 1,
            entry_id: 10,
            type_id: 4,
            quantity: 2,
            value: 10.0,
        }];

        let entry = DomainDeliveryEntry::try_from((header(), items)).unwrap();

        assert_eq!(entry.id.get(), 10);
        assert_eq!(entry.deliverer_id.get(), 2);
        assert_eq!(entry.items.len(), 1);
        assert_eq!(entry.items[0].quantity, 2);
        assert_eq!(entry.items[0].value.get(), 10.0);
    }

    #[test]
    fn negative_quantity_row_is_rejected() {
        let items = vec![DeliveryItem {
            id: 1,
            entry_id: 10,
            type_id: 1,
            quantity: -2,
            value: 3.7,
        }];

        assert_eq!(
            DomainDeliveryEntry::try_from((header(), items)),
            Err(TypeConstraintError::NegativeQuantity)
        );
    }
}
