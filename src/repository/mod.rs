use chrono::NaiveDate;

use crate::db::{DbConnection, DbPool};
use crate::domain::deliverer::{Deliverer, NewDeliverer};
use crate::domain::delivery_entry::{DeliveryEntry, NewDeliveryEntry};
use crate::domain::delivery_type::{DeliveryType, NewDeliveryType, UpdateDeliveryType};
use crate::domain::period::BillingPeriod;
use crate::domain::types::{DelivererEmail, DelivererId, DeliveryTypeId, HubId};
use crate::repository::errors::RepositoryResult;

pub mod deliverer;
pub mod delivery_entry;
pub mod delivery_type;
pub mod errors;
pub mod local;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Diesel-backed store shared by all request handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Filter for entries dated inside an inclusive window.
#[derive(Debug, Clone)]
pub struct EntryListQuery {
    pub hub_id: HubId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub deliverer_id: Option<DelivererId>,
}

impl EntryListQuery {
    pub fn new(hub_id: HubId, period: &BillingPeriod) -> Self {
        Self {
            hub_id,
            start: period.start,
            end: period.end,
            deliverer_id: None,
        }
    }

    pub fn deliverer(mut self, deliverer_id: DelivererId) -> Self {
        self.deliverer_id = Some(deliverer_id);
        self
    }

    pub fn matches(&self, entry: &DeliveryEntry) -> bool {
        entry.hub_id == self.hub_id
            && self.start <= entry.date
            && entry.date <= self.end
            && self
                .deliverer_id
                .is_none_or(|deliverer_id| deliverer_id == entry.deliverer_id)
    }
}

pub trait DeliveryTypeReader {
    fn list_delivery_types(&self, hub_id: HubId) -> RepositoryResult<Vec<DeliveryType>>;
    fn get_delivery_type_by_id(
        &self,
        id: DeliveryTypeId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<DeliveryType>>;
}

pub trait DeliveryTypeWriter {
    fn create_delivery_type(&self, new_type: &NewDeliveryType) -> RepositoryResult<DeliveryType>;
    fn update_delivery_type(
        &self,
        id: DeliveryTypeId,
        hub_id: HubId,
        updates: &UpdateDeliveryType,
    ) -> RepositoryResult<DeliveryType>;
}

pub trait DelivererReader {
    /// Lists profiles with the deliverer role, ordered by id.
    fn list_deliverers(&self, hub_id: HubId) -> RepositoryResult<Vec<Deliverer>>;
    fn get_deliverer_by_email(
        &self,
        email: &DelivererEmail,
        hub_id: HubId,
    ) -> RepositoryResult<Option<Deliverer>>;
}

pub trait DelivererWriter {
    fn create_or_update_deliverer(&self, new_deliverer: &NewDeliverer)
    -> RepositoryResult<Deliverer>;
}

pub trait DeliveryEntryReader {
    /// Lists entries matching `query`, ordered by date then id.
    fn list_entries(&self, query: EntryListQuery) -> RepositoryResult<Vec<DeliveryEntry>>;
}

pub trait DeliveryEntryWriter {
    fn create_entry(&self, new_entry: &NewDeliveryEntry) -> RepositoryResult<DeliveryEntry>;
}
