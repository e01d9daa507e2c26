//! Routes for the manager report.

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Datelike;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::dto::summary::{PeriodQuery, month_options};
use crate::repository::DieselRepository;
use crate::repository::local::LocalStore;
use crate::routes::today;
use crate::services::{ServiceError, summary as summary_service};

#[get("/summary")]
/// Show per-deliverer totals for the selected billing period.
pub async fn show_summary(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    local: web::Data<LocalStore>,
    query: web::Query<PeriodQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let today = today();
    match summary_service::load_summary_page(
        repo.get_ref(),
        local.get_ref(),
        &user,
        query.into_inner(),
        today,
    ) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "summary",
                &server_config.auth_service_url,
            );
            let years: Vec<i32> = (today.year() - 2..=today.year() + 1).collect();
            context.insert("period", &data.period);
            context.insert("period_label", &data.period_label);
            context.insert("delivery_types", &data.delivery_types);
            context.insert("summaries", &data.summaries);
            context.insert("source", &data.source);
            context.insert("months", &month_options());
            context.insert("years", &years);

            render_template(&tera, "summary/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Acesso não permitido.").send();
            redirect("/na")
        }
        Err(ServiceError::InvalidPeriod(message)) => {
            log::warn!("Rejected summary period: {message}");
            FlashMessage::error("Período inválido.").send();
            redirect("/summary")
        }
        Err(err) => {
            log::error!("Failed to load the summary: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/summary/export")]
/// Download the selected period's report as CSV.
pub async fn export_summary(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    local: web::Data<LocalStore>,
    query: web::Query<PeriodQuery>,
) -> impl Responder {
    match summary_service::export_summary_csv(
        repo.get_ref(),
        local.get_ref(),
        &user,
        query.into_inner(),
        today(),
    ) {
        Ok((file_name, body)) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ))
            .body(body),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Acesso não permitido.").send();
            redirect("/na")
        }
        Err(ServiceError::InvalidPeriod(_)) => {
            FlashMessage::error("Período inválido.").send();
            redirect("/summary")
        }
        Err(err) => {
            log::error!("Failed to export the summary: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
