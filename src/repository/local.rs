//! Local fallback store.
//!
//! Keeps the last known reference data and entries per hub, optionally
//! persisted to a JSON file. The store is an explicit collaborator handed to
//! the gateway; nothing in it is process-global.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::deliverer::Deliverer;
use crate::domain::delivery_entry::{DeliveryEntry, DeliveryItem};
use crate::domain::delivery_type::DeliveryType;
use crate::domain::role::Role;
use crate::domain::types::{
    DelivererEmail, DelivererId, DelivererName, DeliveryEntryId, DeliveryTypeId,
    DeliveryTypeName, HubId, UnitValue,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DelivererReader, DeliveryEntryReader, DeliveryTypeReader, EntryListQuery};

#[derive(Debug, Default, Serialize, Deserialize)]
struct LocalState {
    #[serde(default)]
    delivery_types: Vec<DeliveryType>,
    #[serde(default)]
    deliverers: Vec<Deliverer>,
    #[serde(default)]
    entries: Vec<DeliveryEntry>,
}

#[derive(Debug)]
pub struct LocalStore {
    path: Option<PathBuf>,
    state: RwLock<LocalState>,
}

impl LocalStore {
    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(LocalState::default()),
        }
    }

    /// Opens the store backed by `path`, starting empty when the file is missing.
    pub fn open(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            LocalState::default()
        };

        Ok(Self {
            path: Some(path),
            state: RwLock::new(state),
        })
    }

    /// Seeds the demo pharmacy when the hub has no delivery types yet.
    ///
    /// Returns `true` when data was added.
    pub fn seed_demo(&self, hub_id: HubId, today: NaiveDate) -> RepositoryResult<bool> {
        let mut state = self.write()?;
        if state.delivery_types.iter().any(|t| t.hub_id == hub_id) {
            return Ok(false);
        }

        let demo = demo_data(hub_id, today)?;
        state.delivery_types.extend(demo.delivery_types);
        state.deliverers.extend(demo.deliverers);
        state.entries.extend(demo.entries);

        self.persist(&state)?;
        Ok(true)
    }

    /// Replaces the hub's cached reference data and every cached entry
    /// matching `query` with a snapshot read remotely for that query.
    pub fn cache_snapshot(
        &self,
        query: &EntryListQuery,
        delivery_types: &[DeliveryType],
        deliverers: &[Deliverer],
        entries: &[DeliveryEntry],
    ) -> RepositoryResult<()> {
        let hub_id = query.hub_id;
        let mut state = self.write()?;

        state.delivery_types.retain(|t| t.hub_id != hub_id);
        state.delivery_types.extend_from_slice(delivery_types);
        state.deliverers.retain(|d| d.hub_id != hub_id);
        state.deliverers.extend_from_slice(deliverers);
        state.entries.retain(|entry| !query.matches(entry));
        for entry in entries {
            upsert_entry(&mut state.entries, entry.clone());
        }

        self.persist(&state)
    }

    /// Records an entry the remote store has just accepted.
    pub fn cache_entry(&self, entry: &DeliveryEntry) -> RepositoryResult<()> {
        let mut state = self.write()?;
        upsert_entry(&mut state.entries, entry.clone());
        self.persist(&state)
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, LocalState>> {
        self.state
            .read()
            .map_err(|_| RepositoryError::LocalStore("lock poisoned".to_string()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, LocalState>> {
        self.state
            .write()
            .map_err(|_| RepositoryError::LocalStore("lock poisoned".to_string()))
    }

    fn persist(&self, state: &LocalState) -> RepositoryResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(state)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn upsert_entry(entries: &mut Vec<DeliveryEntry>, entry: DeliveryEntry) {
    match entries.iter_mut().find(|stored| stored.id == entry.id) {
        Some(stored) => *stored = entry,
        None => entries.push(entry),
    }
}

impl DeliveryTypeReader for LocalStore {
    fn list_delivery_types(&self, hub_id: HubId) -> RepositoryResult<Vec<DeliveryType>> {
        let state = self.read()?;
        let mut types: Vec<DeliveryType> = state
            .delivery_types
            .iter()
            .filter(|t| t.hub_id == hub_id)
            .cloned()
            .collect();
        types.sort_by_key(|t| t.id);
        Ok(types)
    }

    fn get_delivery_type_by_id(
        &self,
        id: DeliveryTypeId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<DeliveryType>> {
        let state = self.read()?;
        Ok(state
            .delivery_types
            .iter()
            .find(|t| t.id == id && t.hub_id == hub_id)
            .cloned())
    }
}

impl DelivererReader for LocalStore {
    fn list_deliverers(&self, hub_id: HubId) -> RepositoryResult<Vec<Deliverer>> {
        let state = self.read()?;
        let mut deliverers: Vec<Deliverer> = state
            .deliverers
            .iter()
            .filter(|d| d.hub_id == hub_id && d.role == Role::Deliverer)
            .cloned()
            .collect();
        deliverers.sort_by_key(|d| d.id);
        Ok(deliverers)
    }

    fn get_deliverer_by_email(
        &self,
        email: &DelivererEmail,
        hub_id: HubId,
    ) -> RepositoryResult<Option<Deliverer>> {
        let state = self.read()?;
        Ok(state
            .deliverers
            .iter()
            .find(|d| &d.email == email && d.hub_id == hub_id)
            .cloned())
    }
}

impl DeliveryEntryReader for LocalStore {
    fn list_entries(&self, query: EntryListQuery) -> RepositoryResult<Vec<DeliveryEntry>> {
        let state = self.read()?;
        let mut entries: Vec<DeliveryEntry> = state
            .entries
            .iter()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.date, entry.id));
        Ok(entries)
    }
}

fn demo_data(hub_id: HubId, today: NaiveDate) -> RepositoryResult<LocalState> {
    let delivery_type = |id: i32, name: &str, value: f64, is_extra: bool| {
        Ok::<_, RepositoryError>(DeliveryType {
            id: DeliveryTypeId::new(id)?,
            hub_id,
            name: DeliveryTypeName::new(name)?,
            unit_value: UnitValue::new(value)?,
            is_extra,
        })
    };
    let deliverer = |id: i32, name: &str, email: &str| {
        Ok::<_, RepositoryError>(Deliverer {
            id: DelivererId::new(id)?,
            hub_id,
            name: DelivererName::new(name)?,
            email: DelivererEmail::new(email)?,
            role: Role::Deliverer,
        })
    };
    let item = |type_id: i32, quantity: u32, value: f64| {
        Ok::<_, RepositoryError>(DeliveryItem::new(
            DeliveryTypeId::new(type_id)?,
            quantity,
            UnitValue::new(value)?,
        ))
    };

    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    let created_at = |date: NaiveDate| date.and_hms_opt(18, 0, 0).unwrap_or_default();

    Ok(LocalState {
        delivery_types: vec![
            delivery_type(1, "Entrega Local", 3.7, false)?,
            delivery_type(2, "Entrega Padrão", 5.0, false)?,
            delivery_type(3, "Entrega Distante", 7.4, false)?,
            delivery_type(4, "Extra", 0.0, true)?,
        ],
        deliverers: vec![
            deliverer(1, "Arimateia", "arimateia@farmacia.com")?,
            deliverer(2, "Ewerton", "ewerton@farmacia.com")?,
        ],
        entries: vec![
            DeliveryEntry {
                id: DeliveryEntryId::new(1)?,
                hub_id,
                deliverer_id: DelivererId::new(1)?,
                date: yesterday,
                items: vec![item(1, 5, 3.7)?, item(2, 2, 5.0)?, item(4, 1, 10.0)?],
                created_at: created_at(yesterday),
            },
            DeliveryEntry {
                id: DeliveryEntryId::new(2)?,
                hub_id,
                deliverer_id: DelivererId::new(2)?,
                date: today,
                items: vec![item(1, 3, 3.7)?, item(3, 4, 7.4)?],
                created_at: created_at(today),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::period::BillingPeriod;

    fn hub() -> HubId {
        HubId::new(1).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
    }

    fn entry(id: i32, on: NaiveDate, quantity: u32) -> DeliveryEntry {
        DeliveryEntry {
            id: DeliveryEntryId::new(id).unwrap(),
            hub_id: hub(),
            deliverer_id: DelivererId::new(1).unwrap(),
            date: on,
            items: vec![DeliveryItem::new(
                DeliveryTypeId::new(1).unwrap(),
                quantity,
                UnitValue::new(3.7).unwrap(),
            )],
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn seed_adds_demo_pharmacy_once() {
        let store = LocalStore::in_memory();

        assert!(store.seed_demo(hub(), today()).unwrap());
        assert!(!store.seed_demo(hub(), today()).unwrap());

        let types = store.list_delivery_types(hub()).unwrap();
        assert_eq!(types.len(), 4);
        assert!(types[3].is_extra);
        assert_eq!(store.list_deliverers(hub()).unwrap().len(), 2);
    }

    #[test]
    fn entries_are_filtered_by_period_and_deliverer() {
        let store = LocalStore::in_memory();
        store.seed_demo(hub(), today()).unwrap();
        let period = BillingPeriod::resolve(2, 2024).unwrap();

        let all = store
            .list_entries(EntryListQuery::new(hub(), &period))
            .unwrap();
        assert_eq!(all.len(), 2);

        let only_ewerton = store
            .list_entries(
                EntryListQuery::new(hub(), &period).deliverer(DelivererId::new(2).unwrap()),
            )
            .unwrap();
        assert_eq!(only_ewerton.len(), 1);
        assert_eq!(only_ewerton[0].date, today());

        let march = BillingPeriod::resolve(3, 2024).unwrap();
        assert!(
            store
                .list_entries(EntryListQuery::new(hub(), &march))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn cached_entries_are_merged_by_id() {
        let store = LocalStore::in_memory();
        store.cache_entry(&entry(7, today(), 1)).unwrap();
        store.cache_entry(&entry(7, today(), 9)).unwrap();
        store.cache_entry(&entry(8, today(), 2)).unwrap();

        let period = BillingPeriod::containing(today());
        let entries = store
            .list_entries(EntryListQuery::new(hub(), &period))
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].items[0].quantity, 9);
    }

    #[test]
    fn snapshot_replaces_reference_data_of_the_hub_only() {
        let store = LocalStore::in_memory();
        let other_hub = HubId::new(2).unwrap();
        store.seed_demo(hub(), today()).unwrap();
        store.seed_demo(other_hub, today()).unwrap();

        let period = BillingPeriod::containing(today());
        store
            .cache_snapshot(&EntryListQuery::new(hub(), &period), &[], &[], &[])
            .unwrap();

        assert!(store.list_delivery_types(hub()).unwrap().is_empty());
        assert_eq!(store.list_delivery_types(other_hub).unwrap().len(), 4);
        assert_eq!(
            store
                .list_entries(EntryListQuery::new(other_hub, &period))
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn snapshot_is_authoritative_for_its_window() {
        let store = LocalStore::in_memory();
        store.seed_demo(hub(), today()).unwrap();
        let january_day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        store.cache_entry(&entry(50, january_day, 4)).unwrap();

        let period = BillingPeriod::containing(today());
        let query = EntryListQuery::new(hub(), &period);
        let types = store.list_delivery_types(hub()).unwrap();
        let deliverers = store.list_deliverers(hub()).unwrap();
        store
            .cache_snapshot(&query, &types, &deliverers, &[entry(101, today(), 8)])
            .unwrap();

        let cached = store.list_entries(query).unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id.get(), 101);

        let january = BillingPeriod::containing(january_day);
        let older = store
            .list_entries(EntryListQuery::new(hub(), &january))
            .unwrap();
        assert_eq!(older.len(), 1);
        assert_eq!(older[0].id.get(), 50);
    }

    #[test]
    fn deliverer_snapshot_keeps_other_deliverers_entries() {
        let store = LocalStore::in_memory();
        store.seed_demo(hub(), today()).unwrap();

        let period = BillingPeriod::containing(today());
        let own = EntryListQuery::new(hub(), &period).deliverer(DelivererId::new(1).unwrap());
        let types = store.list_delivery_types(hub()).unwrap();
        let deliverers = store.list_deliverers(hub()).unwrap();
        store.cache_snapshot(&own, &types, &deliverers, &[]).unwrap();

        let remaining = store
            .list_entries(EntryListQuery::new(hub(), &period))
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].deliverer_id.get(), 2);
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deliveries.json");

        {
            let store = LocalStore::open(&path).unwrap();
            store.seed_demo(hub(), today()).unwrap();
        }

        let reopened = LocalStore::open(&path).unwrap();
        assert_eq!(reopened.list_delivery_types(hub()).unwrap().len(), 4);
        let email = DelivererEmail::new("ewerton@farmacia.com").unwrap();
        assert!(
            reopened
                .get_deliverer_by_email(&email, hub())
                .unwrap()
                .is_some()
        );
    }
}
