//! JSON views of the report and reference data.

use chrono::NaiveDate;
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::dto::api::{DeliveryTypesResponse, SummaryResponse};
use crate::dto::summary::PeriodQuery;
use crate::repository::local::LocalStore;
use crate::repository::{DelivererReader, DeliveryEntryReader, DeliveryTypeReader};
use crate::services::gateway::DeliveryGateway;
use crate::services::summary::load_summary_page;
use crate::services::{ServiceResult, member_role, user_hub};

/// Report for managers, with the store it was read from.
pub fn summary<R>(
    repo: &R,
    local: &LocalStore,
    user: &AuthenticatedUser,
    query: PeriodQuery,
    today: NaiveDate,
) -> ServiceResult<SummaryResponse>
where
    R: DeliveryTypeReader + DelivererReader + DeliveryEntryReader + ?Sized,
{
    let data = load_summary_page(repo, local, user, query, today)?;

    Ok(SummaryResponse {
        period: data.period,
        source: data.source,
        summaries: data.summaries,
    })
}

/// Delivery types of the caller's hub, for any member.
pub fn delivery_types<R>(
    repo: &R,
    local: &LocalStore,
    user: &AuthenticatedUser,
) -> ServiceResult<DeliveryTypesResponse>
where
    R: DeliveryTypeReader + DelivererReader + DeliveryEntryReader + ?Sized,
{
    member_role(user)?;

    let fetched = DeliveryGateway::new(repo, local).fetch_delivery_types(user_hub(user)?)?;

    Ok(DeliveryTypesResponse {
        source: fetched.source,
        delivery_types: fetched.data,
    })
}
