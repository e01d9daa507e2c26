//! Diesel repository for deliverer profiles.

use diesel::{prelude::*, upsert::excluded};

use crate::domain::deliverer::{Deliverer, NewDeliverer};
use crate::domain::role::Role;
use crate::domain::types::{DelivererEmail, HubId};
use crate::models::deliverer::{Deliverer as DbDeliverer, NewDeliverer as DbNewDeliverer};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DelivererReader, DelivererWriter, DieselRepository};

impl DelivererWriter for DieselRepository {
    fn create_or_update_deliverer(
        &self,
        new_deliverer: &NewDeliverer,
    ) -> RepositoryResult<Deliverer> {
        use crate::schema::deliverers;

        let mut conn = self.conn()?;
        let insertable: DbNewDeliverer = new_deliverer.into();

        let row = diesel::insert_into(deliverers::table)
            .values(&insertable)
            .on_conflict((deliverers::hub_id, deliverers::email))
            .do_update()
            .set((
                deliverers::name.eq(excluded(deliverers::name)),
                deliverers::role.eq(excluded(deliverers::role)),
            ))
            .get_result::<DbDeliverer>(&mut conn)?;

        Deliverer::try_from(row).map_err(RepositoryError::from)
    }
}

impl DelivererReader for DieselRepository {
    fn list_deliverers(&self, hub_id: HubId) -> RepositoryResult<Vec<Deliverer>> {
        use crate::schema::deliverers;

        let mut conn = self.conn()?;
        deliverers::table
            .filter(deliverers::hub_id.eq(hub_id.get()))
            .filter(deliverers::role.eq(Role::Deliverer.as_str()))
            .order(deliverers::id.asc())
            .select(DbDeliverer::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(|row| Deliverer::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn get_deliverer_by_email(
        &self,
        email: &DelivererEmail,
        hub_id: HubId,
    ) -> RepositoryResult<Option<Deliverer>> {
        use crate::schema::deliverers;

        let mut conn = self.conn()?;
        let row = deliverers::table
            .filter(deliverers::email.eq(email.as_str()))
            .filter(deliverers::hub_id.eq(hub_id.get()))
            .select(DbDeliverer::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(|row| Deliverer::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }
}
