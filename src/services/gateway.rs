//! Remote-then-local access to delivery data.
//!
//! Reads go to the remote repository first. When any part of a read fails the
//! whole result is taken from the [`LocalStore`] instead, so a single view
//! never mixes both sources. Successful remote reads refresh the local copy.
//! Writes only go to the remote repository and are never retried.

use serde::Serialize;

use crate::domain::deliverer::{Deliverer, NewDeliverer};
use crate::domain::delivery_entry::{DeliveryEntry, NewDeliveryEntry};
use crate::domain::delivery_type::DeliveryType;
use crate::domain::types::HubId;
use crate::repository::errors::RepositoryResult;
use crate::repository::local::LocalStore;
use crate::repository::{
    DelivererReader, DelivererWriter, DeliveryEntryReader, DeliveryEntryWriter,
    DeliveryTypeReader, EntryListQuery,
};
use crate::services::{ServiceError, ServiceResult};

/// Store a read was answered from.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Remote,
    Local,
}

/// Data tagged with the store it came from.
#[derive(Debug)]
pub struct Fetched<T> {
    pub data: T,
    pub source: DataSource,
}

/// Everything needed to summarize one period, read from a single store.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub delivery_types: Vec<DeliveryType>,
    pub deliverers: Vec<Deliverer>,
    pub entries: Vec<DeliveryEntry>,
}

pub struct DeliveryGateway<'a, R: ?Sized> {
    remote: &'a R,
    local: &'a LocalStore,
}

impl<'a, R: ?Sized> DeliveryGateway<'a, R> {
    pub fn new(remote: &'a R, local: &'a LocalStore) -> Self {
        Self { remote, local }
    }

    fn read<T>(
        &self,
        what: &str,
        remote: impl FnOnce(&R) -> RepositoryResult<T>,
        local: impl FnOnce(&LocalStore) -> RepositoryResult<T>,
    ) -> ServiceResult<Fetched<T>> {
        match remote(self.remote) {
            Ok(data) => Ok(Fetched {
                data,
                source: DataSource::Remote,
            }),
            Err(remote_err) => {
                log::warn!("Remote read of {what} failed, using local store: {remote_err}");
                local(self.local)
                    .map(|data| Fetched {
                        data,
                        source: DataSource::Local,
                    })
                    .map_err(|local_err| {
                        log::error!("Local read of {what} failed: {local_err}");
                        ServiceError::FetchFailure(format!("{remote_err}; {local_err}"))
                    })
            }
        }
    }
}

impl<R> DeliveryGateway<'_, R>
where
    R: DeliveryTypeReader + DelivererReader + DeliveryEntryReader + ?Sized,
{
    pub fn fetch_delivery_types(&self, hub_id: HubId) -> ServiceResult<Fetched<Vec<DeliveryType>>> {
        self.read(
            "delivery types",
            |remote| remote.list_delivery_types(hub_id),
            |local| local.list_delivery_types(hub_id),
        )
    }

    pub fn fetch_deliverers(&self, hub_id: HubId) -> ServiceResult<Fetched<Vec<Deliverer>>> {
        self.read(
            "deliverers",
            |remote| remote.list_deliverers(hub_id),
            |local| local.list_deliverers(hub_id),
        )
    }

    pub fn fetch_entries(&self, query: EntryListQuery) -> ServiceResult<Fetched<Vec<DeliveryEntry>>> {
        let local_query = query.clone();
        self.read(
            "entries",
            |remote| remote.list_entries(query),
            |local| local.list_entries(local_query),
        )
    }

    /// Reads types, deliverers and entries matching `query` from one store.
    pub fn fetch_snapshot(&self, query: EntryListQuery) -> ServiceResult<Fetched<Snapshot>> {
        let cache_query = query.clone();
        let local_query = query.clone();

        let fetched = self.read(
            "delivery snapshot",
            |remote| load_snapshot(remote, query),
            |local| load_snapshot(local, local_query),
        )?;

        if fetched.source == DataSource::Remote {
            let snapshot = &fetched.data;
            if let Err(err) = self.local.cache_snapshot(
                &cache_query,
                &snapshot.delivery_types,
                &snapshot.deliverers,
                &snapshot.entries,
            ) {
                log::warn!("Failed to refresh local store: {err}");
            }
        }

        Ok(fetched)
    }
}

impl<R> DeliveryGateway<'_, R>
where
    R: DeliveryEntryWriter + ?Sized,
{
    /// Persists a submission remotely and mirrors it into the local store.
    pub fn submit_entry(&self, new_entry: &NewDeliveryEntry) -> ServiceResult<DeliveryEntry> {
        let entry = self.remote.create_entry(new_entry).map_err(|err| {
            log::error!("Failed to save delivery entry: {err}");
            ServiceError::WriteFailure(err.to_string())
        })?;

        if let Err(err) = self.local.cache_entry(&entry) {
            log::warn!("Failed to mirror entry {} locally: {err}", entry.id);
        }

        Ok(entry)
    }
}

impl<R> DeliveryGateway<'_, R>
where
    R: DelivererWriter + ?Sized,
{
    /// Upserts the caller's profile remotely.
    ///
    /// While the remote store is unreachable a profile already known to the
    /// local store is returned instead, so read-only pages keep working.
    pub fn sync_deliverer(&self, new_deliverer: &NewDeliverer) -> ServiceResult<Deliverer> {
        match self.remote.create_or_update_deliverer(new_deliverer) {
            Ok(deliverer) => Ok(deliverer),
            Err(remote_err) => {
                log::warn!("Failed to upsert deliverer profile: {remote_err}");
                self.local
                    .get_deliverer_by_email(&new_deliverer.email, new_deliverer.hub_id)?
                    .ok_or_else(|| ServiceError::FetchFailure(remote_err.to_string()))
            }
        }
    }
}

fn load_snapshot<S>(store: &S, query: EntryListQuery) -> RepositoryResult<Snapshot>
where
    S: DeliveryTypeReader + DelivererReader + DeliveryEntryReader + ?Sized,
{
    Ok(Snapshot {
        delivery_types: store.list_delivery_types(query.hub_id)?,
        deliverers: store.list_deliverers(query.hub_id)?,
        entries: store.list_entries(query)?,
    })
}
