//! Services maintaining the hub's delivery types.

use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::delivery_type::{DeliveryType, find_extra_type};
use crate::domain::role::Capability;
use crate::dto::delivery_types::DeliveryTypesPageData;
use crate::forms::FormError;
use crate::forms::delivery_types::{
    AddDeliveryTypeForm, AddDeliveryTypePayload, UpdateDeliveryTypeForm,
    UpdateDeliveryTypePayload,
};
use crate::repository::{DeliveryTypeReader, DeliveryTypeWriter};
use crate::services::{ServiceError, ServiceResult, authorize, user_hub};

/// Lists the hub's delivery types for the administration page.
pub fn list_delivery_types<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<DeliveryTypesPageData>
where
    R: DeliveryTypeReader + ?Sized,
{
    authorize(user, Capability::ManageDeliveryTypes)?;

    let hub_id = user_hub(user)?;
    let delivery_types = repo.list_delivery_types(hub_id).map_err(|err| {
        log::error!("Failed to list delivery types: {err}");
        err
    })?;

    Ok(DeliveryTypesPageData {
        has_extra_type: find_extra_type(&delivery_types).is_some(),
        delivery_types,
    })
}

/// Creates a delivery type. A hub has at most one extra type.
pub fn add_delivery_type<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddDeliveryTypeForm,
) -> ServiceResult<DeliveryType>
where
    R: DeliveryTypeReader + DeliveryTypeWriter + ?Sized,
{
    authorize(user, Capability::ManageDeliveryTypes)?;

    let payload = AddDeliveryTypePayload::try_from(form)?;
    let hub_id = user_hub(user)?;

    if payload.is_extra && find_extra_type(&repo.list_delivery_types(hub_id)?).is_some() {
        return Err(FormError::DuplicateExtraType.into());
    }

    let created = repo
        .create_delivery_type(&payload.into_domain(hub_id))
        .map_err(|err| {
            log::error!("Failed to add delivery type: {err}");
            err
        })?;

    Ok(created)
}

/// Renames or reprices a delivery type of the caller's hub.
///
/// Entries keep the unit value they were logged with.
pub fn update_delivery_type<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: UpdateDeliveryTypeForm,
) -> ServiceResult<DeliveryType>
where
    R: DeliveryTypeReader + DeliveryTypeWriter + ?Sized,
{
    authorize(user, Capability::ManageDeliveryTypes)?;

    let payload = UpdateDeliveryTypePayload::try_from(form)?;
    let hub_id = user_hub(user)?;

    repo.get_delivery_type_by_id(payload.id, hub_id)?
        .ok_or(ServiceError::NotFound)?;

    let updated = repo
        .update_delivery_type(payload.id, hub_id, &payload.updates)
        .map_err(|err| {
            log::error!("Failed to update delivery type: {err}");
            err
        })?;

    Ok(updated)
}
