//! Routes for logging deliveries and reviewing one's own history.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::dto::summary::{PeriodQuery, month_options};
use crate::repository::DieselRepository;
use crate::repository::local::LocalStore;
use crate::routes::today;
use crate::services::{ServiceError, entries as entries_service};

#[post("/entries")]
/// Store the submitted delivery counts for the current deliverer.
pub async fn submit_entry(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    local: web::Data<LocalStore>,
    form: web::Bytes,
) -> impl Responder {
    match entries_service::submit_entry(repo.get_ref(), local.get_ref(), &user, form.as_ref()) {
        Ok(entry) => {
            FlashMessage::success(format!(
                "Entregas registradas com sucesso para {}.",
                entry.date.format("%d/%m/%Y")
            ))
            .send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Acesso não permitido.").send();
            redirect("/na")
        }
        Err(ServiceError::Validation(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to submit deliveries: {err}");
            FlashMessage::error("Não foi possível registrar as entregas.").send();
            redirect("/")
        }
    }
}

#[get("/entries")]
/// Show the current deliverer's entries for a billing period.
pub async fn show_history(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    local: web::Data<LocalStore>,
    query: web::Query<PeriodQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match entries_service::load_history(
        repo.get_ref(),
        local.get_ref(),
        &user,
        query.into_inner(),
        today(),
    ) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "history",
                &server_config.auth_service_url,
            );
            context.insert("deliverer", &data.deliverer);
            context.insert("period", &data.period);
            context.insert("period_label", &data.period_label);
            context.insert("entries", &data.entries);
            context.insert("summary", &data.summary);
            context.insert("source", &data.source);
            context.insert("months", &month_options());

            render_template(&tera, "entries/history.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Acesso não permitido.").send();
            redirect("/na")
        }
        Err(ServiceError::InvalidPeriod(message)) => {
            log::warn!("Rejected history period: {message}");
            FlashMessage::error("Período inválido.").send();
            redirect("/entries")
        }
        Err(err) => {
            log::error!("Failed to load delivery history: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
