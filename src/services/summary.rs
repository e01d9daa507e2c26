//! Manager report over a billing period.

use std::collections::HashSet;

use chrono::NaiveDate;
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::aggregation::summarize;
use crate::domain::period::BillingPeriod;
use crate::domain::role::Capability;
use crate::dto::summary::{PeriodQuery, SummaryPageData, period_label};
use crate::repository::local::LocalStore;
use crate::repository::{DelivererReader, DeliveryEntryReader, DeliveryTypeReader, EntryListQuery};
use crate::services::gateway::{DeliveryGateway, Snapshot};
use crate::services::{ServiceError, ServiceResult, authorize, user_hub};

/// Builds the per-deliverer report for the requested period.
///
/// When neither store can be read the page is still rendered, with no rows
/// and no data source.
pub fn load_summary_page<R>(
    repo: &R,
    local: &LocalStore,
    user: &AuthenticatedUser,
    query: PeriodQuery,
    today: NaiveDate,
) -> ServiceResult<SummaryPageData>
where
    R: DeliveryTypeReader + DelivererReader + DeliveryEntryReader + ?Sized,
{
    authorize(user, Capability::ViewReports)?;

    let hub_id = user_hub(user)?;
    let period = query.resolve(today)?;

    let gateway = DeliveryGateway::new(repo, local);
    let fetched = match gateway.fetch_snapshot(EntryListQuery::new(hub_id, &period)) {
        Ok(fetched) => fetched,
        Err(ServiceError::FetchFailure(err)) => {
            log::error!("No delivery data available for {hub_id}: {err}");
            return Ok(SummaryPageData::unavailable(period));
        }
        Err(err) => return Err(err),
    };

    log_unknown_references(&fetched.data, &period);

    let Snapshot {
        delivery_types,
        deliverers,
        entries,
    } = fetched.data;
    let summaries = summarize(&entries, &delivery_types, &deliverers, &period);

    Ok(SummaryPageData {
        period,
        period_label: period_label(&period),
        delivery_types,
        summaries,
        source: Some(fetched.source),
    })
}

/// Renders the report as CSV, one row per deliverer.
pub fn export_summary_csv<R>(
    repo: &R,
    local: &LocalStore,
    user: &AuthenticatedUser,
    query: PeriodQuery,
    today: NaiveDate,
) -> ServiceResult<(String, Vec<u8>)>
where
    R: DeliveryTypeReader + DelivererReader + DeliveryEntryReader + ?Sized,
{
    let data = load_summary_page(repo, local, user, query, today)?;
    let file_name = format!(
        "entregas-{}-{:02}.csv",
        data.period.year, data.period.month
    );

    let body = write_csv(&data).map_err(|err| {
        log::error!("Failed to write summary CSV: {err}");
        ServiceError::Export(err.to_string())
    })?;

    Ok((file_name, body))
}

fn write_csv(data: &SummaryPageData) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Entregador".to_string()];
    header.extend(data.delivery_types.iter().map(|t| t.name.to_string()));
    header.extend(
        ["Total de Entregas", "Entregas Extras", "Valor Extras", "Total"].map(String::from),
    );
    writer.write_record(&header)?;

    for summary in &data.summaries {
        let mut row = vec![summary.deliverer_name.clone()];
        row.extend(
            summary
                .deliveries_by_type
                .iter()
                .map(|total| total.quantity.to_string()),
        );
        row.push(summary.total_deliveries.to_string());
        row.push(summary.total_extras.to_string());
        row.push(format!("{:.2}", summary.extra_values));
        row.push(format!("{:.2}", summary.total_value));
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

/// Aggregation skips items that point at unknown deliverers or types.
fn log_unknown_references(snapshot: &Snapshot, period: &BillingPeriod) {
    let type_ids: HashSet<_> = snapshot.delivery_types.iter().map(|t| t.id).collect();
    let deliverer_ids: HashSet<_> = snapshot.deliverers.iter().map(|d| d.id).collect();

    for entry in snapshot.entries.iter().filter(|e| period.contains(e.date)) {
        if !deliverer_ids.contains(&entry.deliverer_id) {
            log::debug!(
                "Entry {} skipped: unknown deliverer {}",
                entry.id,
                entry.deliverer_id
            );
            continue;
        }
        for item in entry.items.iter().filter(|i| !type_ids.contains(&i.type_id)) {
            log::debug!(
                "Item of entry {} skipped: unknown delivery type {}",
                entry.id,
                item.type_id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::delivery_entry::{DeliveryEntry, DeliveryItem};
    use crate::domain::types::{DelivererId, DeliveryEntryId, DeliveryTypeId, HubId, UnitValue};
    use crate::services::gateway::DataSource;
    use crate::services::test_support::{FakeRepo, deliverer_user, manager_user};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
    }

    fn february() -> PeriodQuery {
        PeriodQuery {
            month: Some(2),
            year: Some(2024),
        }
    }

    fn log_arimateia(repo: &FakeRepo) {
        repo.entries.borrow_mut().push(DeliveryEntry {
            id: DeliveryEntryId::new(1).unwrap(),
            hub_id: HubId::new(1).unwrap(),
            deliverer_id: DelivererId::new(1).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 1, 26).unwrap(),
            items: vec![
                DeliveryItem::new(
                    DeliveryTypeId::new(1).unwrap(),
                    5,
                    UnitValue::new(3.7).unwrap(),
                ),
                DeliveryItem::new(
                    DeliveryTypeId::new(4).unwrap(),
                    1,
                    UnitValue::new(10.0).unwrap(),
                ),
            ],
            created_at: NaiveDateTime::default(),
        });
    }

    #[test]
    fn manager_sees_the_period_report() {
        let repo = FakeRepo::pharmacy();
        log_arimateia(&repo);
        let local = LocalStore::in_memory();

        let data =
            load_summary_page(&repo, &local, &manager_user(), february(), today()).unwrap();

        assert_eq!(data.source, Some(DataSource::Remote));
        assert_eq!(data.period_label, "Fevereiro de 2024");
        assert_eq!(data.summaries.len(), 1);
        let arimateia = &data.summaries[0];
        assert_eq!(arimateia.total_deliveries, 6);
        assert_eq!(arimateia.total_extras, 1);
        assert!((arimateia.extra_values - 10.0).abs() < 1e-9);
    }

    #[test]
    fn deliverers_cannot_view_reports() {
        let repo = FakeRepo::pharmacy();
        let local = LocalStore::in_memory();

        let result = load_summary_page(&repo, &local, &deliverer_user(), february(), today());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn invalid_month_is_reported() {
        let repo = FakeRepo::pharmacy();
        let local = LocalStore::in_memory();
        let query = PeriodQuery {
            month: Some(0),
            year: Some(2024),
        };

        let result = load_summary_page(&repo, &local, &manager_user(), query, today());

        assert!(matches!(result, Err(ServiceError::InvalidPeriod(_))));
    }

    #[test]
    fn report_is_read_locally_when_remote_is_down() {
        let repo = FakeRepo::pharmacy();
        repo.offline.set(true);
        let local = LocalStore::in_memory();
        local.seed_demo(HubId::new(1).unwrap(), today()).unwrap();

        let data =
            load_summary_page(&repo, &local, &manager_user(), february(), today()).unwrap();

        assert_eq!(data.source, Some(DataSource::Local));
        assert_eq!(data.summaries.len(), 2);
    }

    #[test]
    fn csv_export_has_one_row_per_deliverer() {
        let repo = FakeRepo::pharmacy();
        log_arimateia(&repo);
        let local = LocalStore::in_memory();

        let (file_name, body) =
            export_summary_csv(&repo, &local, &manager_user(), february(), today()).unwrap();
        let text = String::from_utf8(body).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(file_name, "entregas-2024-02.csv");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Entregador,Entrega Local,"));
        assert_eq!(lines[1], "Arimateia,5,0,0,1,6,1,10.00,28.50");
    }
}
