//! Deliverer workflows: logging deliveries and reviewing one's own history.

use std::collections::HashMap;

use chrono::NaiveDate;
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::aggregation::summarize;
use crate::domain::deliverer::{Deliverer, NewDeliverer};
use crate::domain::delivery_entry::DeliveryEntry;
use crate::domain::delivery_type::DeliveryType;
use crate::domain::role::Capability;
use crate::dto::entries::{EntryItemRow, EntryPageData, EntryRow, HistoryPageData};
use crate::dto::summary::{PeriodQuery, period_label};
use crate::forms::entries::{SubmitEntryForm, SubmitEntryPayload};
use crate::repository::local::LocalStore;
use crate::repository::{
    DelivererReader, DelivererWriter, DeliveryEntryReader, DeliveryEntryWriter,
    DeliveryTypeReader, EntryListQuery,
};
use crate::services::gateway::DeliveryGateway;
use crate::services::{ServiceError, ServiceResult, authorize};

fn current_deliverer<R>(
    gateway: &DeliveryGateway<'_, R>,
    user: &AuthenticatedUser,
) -> ServiceResult<Deliverer>
where
    R: DelivererWriter + ?Sized,
{
    let new_deliverer = NewDeliverer::try_from(user)?;
    gateway.sync_deliverer(&new_deliverer).map_err(|err| {
        log::error!("Failed to update deliverer profile: {err}");
        err
    })
}

/// Loads the delivery types offered on the entry form.
pub fn load_entry_page<R>(
    repo: &R,
    local: &LocalStore,
    user: &AuthenticatedUser,
    today: NaiveDate,
) -> ServiceResult<EntryPageData>
where
    R: DelivererWriter + DeliveryTypeReader + DelivererReader + DeliveryEntryReader + ?Sized,
{
    authorize(user, Capability::LogDeliveries)?;

    let gateway = DeliveryGateway::new(repo, local);
    let deliverer = current_deliverer(&gateway, user)?;
    let fetched = gateway.fetch_delivery_types(deliverer.hub_id)?;

    let (extras, delivery_types): (Vec<DeliveryType>, Vec<DeliveryType>) =
        fetched.data.into_iter().partition(|t| t.is_extra);

    Ok(EntryPageData {
        deliverer,
        delivery_types,
        extra_type: extras.into_iter().next(),
        today,
        source: fetched.source,
    })
}

/// Validates an urlencoded submission and stores it for the caller.
pub fn submit_entry<R>(
    repo: &R,
    local: &LocalStore,
    user: &AuthenticatedUser,
    body: &[u8],
) -> ServiceResult<DeliveryEntry>
where
    R: DelivererWriter
        + DeliveryTypeReader
        + DelivererReader
        + DeliveryEntryReader
        + DeliveryEntryWriter
        + ?Sized,
{
    authorize(user, Capability::LogDeliveries)?;

    let form = SubmitEntryForm::from_bytes(body)?;
    let payload = SubmitEntryPayload::try_from(form)?;

    let gateway = DeliveryGateway::new(repo, local);
    let deliverer = current_deliverer(&gateway, user)?;
    let types = gateway.fetch_delivery_types(deliverer.hub_id)?.data;

    let new_entry = payload.into_domain(deliverer.hub_id, deliverer.id, &types)?;

    let entry = gateway.submit_entry(&new_entry)?;
    log::info!(
        "Deliverer {} logged {} item(s) for {}",
        deliverer.id,
        entry.items.len(),
        entry.date
    );

    Ok(entry)
}

/// Loads the caller's entries and own summary for a billing period.
pub fn load_history<R>(
    repo: &R,
    local: &LocalStore,
    user: &AuthenticatedUser,
    query: PeriodQuery,
    today: NaiveDate,
) -> ServiceResult<HistoryPageData>
where
    R: DelivererWriter + DeliveryTypeReader + DelivererReader + DeliveryEntryReader + ?Sized,
{
    authorize(user, Capability::ViewOwnHistory)?;

    let period = query.resolve(today)?;
    let gateway = DeliveryGateway::new(repo, local);
    let deliverer = current_deliverer(&gateway, user)?;

    let list_query = EntryListQuery::new(deliverer.hub_id, &period).deliverer(deliverer.id);
    let fetched = match gateway.fetch_snapshot(list_query) {
        Ok(fetched) => fetched,
        Err(ServiceError::FetchFailure(err)) => {
            log::error!("No history available for deliverer {}: {err}", deliverer.id);
            return Ok(HistoryPageData {
                deliverer,
                period,
                period_label: period_label(&period),
                entries: Vec::new(),
                summary: None,
                source: None,
            });
        }
        Err(err) => return Err(err),
    };

    let snapshot = fetched.data;
    let summary = summarize(
        &snapshot.entries,
        &snapshot.delivery_types,
        std::slice::from_ref(&deliverer),
        &period,
    )
    .into_iter()
    .next();
    let entries = entry_rows(&snapshot.entries, &snapshot.delivery_types);

    Ok(HistoryPageData {
        deliverer,
        period,
        period_label: period_label(&period),
        entries,
        summary,
        source: Some(fetched.source),
    })
}

/// Newest first. Items of unknown types are labelled by id.
fn entry_rows(entries: &[DeliveryEntry], types: &[DeliveryType]) -> Vec<EntryRow> {
    let by_id: HashMap<_, _> = types.iter().map(|t| (t.id, t)).collect();

    let mut rows: Vec<EntryRow> = entries
        .iter()
        .map(|entry| {
            let items: Vec<EntryItemRow> = entry
                .items
                .iter()
                .map(|item| {
                    let known = by_id.get(&item.type_id);
                    EntryItemRow {
                        type_name: known
                            .map(|t| t.name.to_string())
                            .unwrap_or_else(|| format!("#{}", item.type_id)),
                        quantity: item.quantity,
                        value: item.value.get(),
                        amount: item.amount(),
                        is_extra: known.is_some_and(|t| t.is_extra),
                    }
                })
                .collect();
            EntryRow {
                date: entry.date,
                created_at: entry.created_at,
                total: items.iter().map(|item| item.amount).sum(),
                items,
            }
        })
        .collect();

    rows.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
    rows
}
