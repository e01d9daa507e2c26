//! Diesel repository for delivery types.

use diesel::prelude::*;

use crate::domain::delivery_type::{DeliveryType, NewDeliveryType, UpdateDeliveryType};
use crate::domain::types::{DeliveryTypeId, HubId};
use crate::models::delivery_type::{
    DeliveryType as DbDeliveryType, NewDeliveryType as DbNewDeliveryType,
    UpdateDeliveryType as DbUpdateDeliveryType,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, DeliveryTypeReader, DeliveryTypeWriter};

impl DeliveryTypeReader for DieselRepository {
    fn list_delivery_types(&self, hub_id: HubId) -> RepositoryResult<Vec<DeliveryType>> {
        use crate::schema::delivery_types;

        let mut conn = self.conn()?;
        delivery_types::table
            .filter(delivery_types::hub_id.eq(hub_id.get()))
            .order(delivery_types::id.asc())
            .select(DbDeliveryType::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(|row| DeliveryType::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn get_delivery_type_by_id(
        &self,
        id: DeliveryTypeId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<DeliveryType>> {
        use crate::schema::delivery_types;

        let mut conn = self.conn()?;
        let row = delivery_types::table
            .filter(delivery_types::id.eq(id.get()))
            .filter(delivery_types::hub_id.eq(hub_id.get()))
            .select(DbDeliveryType::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(|row| DeliveryType::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }
}

impl DeliveryTypeWriter for DieselRepository {
    fn create_delivery_type(&self, new_type: &NewDeliveryType) -> RepositoryResult<DeliveryType> {
        use crate::schema::delivery_types;

        let mut conn = self.conn()?;
        let insertable: DbNewDeliveryType = new_type.into();

        let row = diesel::insert_into(delivery_types::table)
            .values(&insertable)
            .get_result::<DbDeliveryType>(&mut conn)?;

        DeliveryType::try_from(row).map_err(RepositoryError::from)
    }

    fn update_delivery_type(
        &self,
        id: DeliveryTypeId,
        hub_id: HubId,
        updates: &UpdateDeliveryType,
    ) -> RepositoryResult<DeliveryType> {
        use crate::schema::delivery_types;

        let mut conn = self.conn()?;
        let changes: DbUpdateDeliveryType = updates.into();

        let row = diesel::update(
            delivery_types::table
                .filter(delivery_types::id.eq(id.get()))
                .filter(delivery_types::hub_id.eq(hub_id.get())),
        )
        .set(&changes)
        .get_result::<DbDeliveryType>(&mut conn)?;

        DeliveryType::try_from(row).map_err(RepositoryError::from)
    }
}
