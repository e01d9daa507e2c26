//! Diesel repository for delivery entries and their items.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::delivery_entry::{DeliveryEntry, NewDeliveryEntry};
use crate::domain::types::DeliveryEntryId;
use crate::models::delivery_entry::{
    DeliveryEntry as DbDeliveryEntry, DeliveryItem as DbDeliveryItem,
    NewDeliveryEntry as DbNewDeliveryEntry, NewDeliveryItem as DbNewDeliveryItem,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DeliveryEntryReader, DeliveryEntryWriter, DieselRepository, EntryListQuery};

impl DeliveryEntryReader for DieselRepository {
    fn list_entries(&self, query: EntryListQuery) -> RepositoryResult<Vec<DeliveryEntry>> {
        use crate::schema::delivery_entries;

        let mut conn = self.conn()?;

        let mut headers_query = delivery_entries::table
            .filter(delivery_entries::hub_id.eq(query.hub_id.get()))
            .filter(delivery_entries::date.ge(query.start))
            .filter(delivery_entries::date.le(query.end))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(deliverer_id) = query.deliverer_id {
            headers_query =
                headers_query.filter(delivery_entries::deliverer_id.eq(deliverer_id.get()));
        }

        let headers = headers_query
            .order((delivery_entries::date.asc(), delivery_entries::id.asc()))
            .load::<DbDeliveryEntry>(&mut conn)?;

        let items = DbDeliveryItem::belonging_to(&headers)
            .select(DbDeliveryItem::as_select())
            .load(&mut conn)?
            .grouped_by(&headers);

        // An unreadable row is left out of the listing instead of failing it.
        Ok(headers
            .into_iter()
            .zip(items)
            .filter_map(|(header, items)| {
                let id = header.id;
                DeliveryEntry::try_from((header, items))
                    .inspect_err(|e| log::warn!("Skipping unreadable delivery entry {id}: {e}"))
                    .ok()
            })
            .collect())
    }
}

impl DeliveryEntryWriter for DieselRepository {
    fn create_entry(&self, new_entry: &NewDeliveryEntry) -> RepositoryResult<DeliveryEntry> {
        use crate::schema::{delivery_entries, delivery_items};

        if new_entry.items.is_empty() {
            return Err(RepositoryError::ValidationError(
                "entry has no items".to_string(),
            ));
        }

        let mut conn = self.conn()?;
        let header = DbNewDeliveryEntry {
            hub_id: new_entry.hub_id.get(),
            deliverer_id: new_entry.deliverer_id.get(),
            date: new_entry.date,
            created_at: Utc::now().naive_utc(),
        };

        conn.transaction::<DeliveryEntry, RepositoryError, _>(|conn| {
            let stored = diesel::insert_into(delivery_entries::table)
                .values(&header)
                .get_result::<DbDeliveryEntry>(conn)?;

            let rows = new_entry
                .items
                .iter()
                .map(|item| DbNewDeliveryItem::from_domain(stored.id, item))
                .collect::<Result<Vec<_>, _>>()?;

            diesel::insert_into(delivery_items::table)
                .values(&rows)
                .execute(conn)?;

            Ok(new_entry
                .clone()
                .into_entry(DeliveryEntryId::new(stored.id)?, stored.created_at))
        })
    }
}
