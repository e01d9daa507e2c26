use chrono::NaiveDate;
use diesel::RunQueryDsl;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_delivery::domain::types::HubId;
use pushkind_delivery::dto::summary::PeriodQuery;
use pushkind_delivery::repository::local::LocalStore;
use pushkind_delivery::repository::{DeliveryTypeReader, DieselRepository};
use pushkind_delivery::services::delivery_types::add_delivery_type;
use pushkind_delivery::services::entries::submit_entry;
use pushkind_delivery::services::gateway::DataSource;
use pushkind_delivery::services::summary::{export_summary_csv, load_summary_page};
use pushkind_delivery::{SERVICE_ACCESS_ROLE, SERVICE_MANAGER_ROLE};

mod common;

fn user(email: &str, name: &str, roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: email.to_string(),
        email: email.to_string(),
        hub_id: 1,
        name: name.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp: 0,
    }
}

fn manager() -> AuthenticatedUser {
    user(
        "gerente@farmacia.com",
        "Gerente",
        &[SERVICE_ACCESS_ROLE, SERVICE_MANAGER_ROLE],
    )
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
}

fn february() -> PeriodQuery {
    PeriodQuery {
        month: Some(2),
        year: Some(2024),
    }
}

fn setup_pharmacy(repo: &DieselRepository) {
    for body in [
        "name=Entrega+Local&unit_value=3.7",
        "name=Entrega+Padr%C3%A3o&unit_value=5.0",
        "name=Entrega+Distante&unit_value=7.4",
        "name=Extra&unit_value=0&is_extra=on",
    ] {
        let form = serde_html_form::from_str(body).unwrap();
        add_delivery_type(repo, &manager(), form).unwrap();
    }
}

#[test]
fn test_monthly_report_from_logged_entries() {
    let test_db = common::TestDb::new("test_monthly_report_from_logged_entries.db");
    let repo = DieselRepository::new(test_db.pool());
    let local = LocalStore::in_memory();
    setup_pharmacy(&repo);

    let arimateia = user("arimateia@farmacia.com", "Arimateia", &[SERVICE_ACCESS_ROLE]);
    let ewerton = user("ewerton@farmacia.com", "Ewerton", &[SERVICE_ACCESS_ROLE]);
    let types = repo.list_delivery_types(HubId::new(1).unwrap()).unwrap();
    let id_of = |name: &str| types.iter().find(|t| t.name.as_str() == name).unwrap().id;

    let body = format!(
        "date=2024-01-26&type_id={}&quantity=5&type_id={}&quantity=&extra_quantity=1&extra_value=10,00",
        id_of("Entrega Local"),
        id_of("Entrega Padrão"),
    );
    submit_entry(&repo, &local, &arimateia, body.as_bytes()).unwrap();

    let body = format!("date=2024-02-25&type_id={}&quantity=4", id_of("Entrega Distante"));
    submit_entry(&repo, &local, &ewerton, body.as_bytes()).unwrap();

    // Outside the period.
    let body = format!("date=2024-02-26&type_id={}&quantity=9", id_of("Entrega Local"));
    submit_entry(&repo, &local, &ewerton, body.as_bytes()).unwrap();

    let data = load_summary_page(&repo, &local, &manager(), february(), today()).unwrap();

    assert_eq!(data.source, Some(DataSource::Remote));
    assert_eq!(data.summaries.len(), 2);

    let first = &data.summaries[0];
    assert_eq!(first.deliverer_name, "Arimateia");
    assert_eq!(first.total_deliveries, 6);
    assert_eq!(first.total_extras, 1);
    assert!((first.extra_values - 10.0).abs() < 1e-9);
    assert!((first.total_value - 28.5).abs() < 1e-9);

    let second = &data.summaries[1];
    assert_eq!(second.deliverer_name, "Ewerton");
    assert_eq!(second.total_deliveries, 4);
    assert!((second.total_value - 29.6).abs() < 1e-9);

    let (_, csv) = export_summary_csv(&repo, &local, &manager(), february(), today()).unwrap();
    let text = String::from_utf8(csv).unwrap();
    assert!(text.contains("Arimateia,5,0,0,1,6,1,10.00,28.50"));
}

#[test]
fn test_report_falls_back_to_local_snapshot() {
    let test_db = common::TestDb::new("test_report_falls_back_to_local_snapshot.db");
    let repo = DieselRepository::new(test_db.pool());
    let local = LocalStore::in_memory();
    setup_pharmacy(&repo);

    let arimateia = user("arimateia@farmacia.com", "Arimateia", &[SERVICE_ACCESS_ROLE]);
    let types = repo.list_delivery_types(HubId::new(1).unwrap()).unwrap();
    let body = format!("date=2024-02-01&type_id={}&quantity=3", types[0].id);
    submit_entry(&repo, &local, &arimateia, body.as_bytes()).unwrap();

    // A successful read refreshes the local snapshot.
    let remote = load_summary_page(&repo, &local, &manager(), february(), today()).unwrap();
    assert_eq!(remote.source, Some(DataSource::Remote));

    let mut conn = test_db.pool().get().unwrap();
    diesel::sql_query("DROP TABLE delivery_items")
        .execute(&mut conn)
        .unwrap();

    let fallback = load_summary_page(&repo, &local, &manager(), february(), today()).unwrap();

    assert_eq!(fallback.source, Some(DataSource::Local));
    assert_eq!(fallback.summaries, remote.summaries);
}
