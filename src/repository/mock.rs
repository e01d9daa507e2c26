//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::deliverer::{Deliverer, NewDeliverer};
use crate::domain::delivery_entry::{DeliveryEntry, NewDeliveryEntry};
use crate::domain::delivery_type::{DeliveryType, NewDeliveryType, UpdateDeliveryType};
use crate::domain::types::{DelivererEmail, DeliveryTypeId, HubId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DelivererReader, DelivererWriter, DeliveryEntryReader, DeliveryEntryWriter,
    DeliveryTypeReader, DeliveryTypeWriter, EntryListQuery,
};

mock! {
    pub Repository {}

    impl DeliveryTypeReader for Repository {
        fn list_delivery_types(&self, hub_id: HubId) -> RepositoryResult<Vec<DeliveryType>>;
        fn get_delivery_type_by_id(
            &self,
            id: DeliveryTypeId,
            hub_id: HubId,
        ) -> RepositoryResult<Option<DeliveryType>>;
    }

    impl DeliveryTypeWriter for Repository {
        fn create_delivery_type(&self, new_type: &NewDeliveryType) -> RepositoryResult<DeliveryType>;
        fn update_delivery_type(
            &self,
            id: DeliveryTypeId,
            hub_id: HubId,
            updates: &UpdateDeliveryType,
        ) -> RepositoryResult<DeliveryType>;
    }

    impl DelivererReader for Repository {
        fn list_deliverers(&self, hub_id: HubId) -> RepositoryResult<Vec<Deliverer>>;
        fn get_deliverer_by_email(
            &self,
            email: &DelivererEmail,
            hub_id: HubId,
        ) -> RepositoryResult<Option<Deliverer>>;
    }

    impl DelivererWriter for Repository {
        fn create_or_update_deliverer(
            &self,
            new_deliverer: &NewDeliverer,
        ) -> RepositoryResult<Deliverer>;
    }

    impl DeliveryEntryReader for Repository {
        fn list_entries(&self, query: EntryListQuery) -> RepositoryResult<Vec<DeliveryEntry>>;
    }

    impl DeliveryEntryWriter for Repository {
        fn create_entry(&self, new_entry: &NewDeliveryEntry) -> RepositoryResult<DeliveryEntry>;
    }
}
