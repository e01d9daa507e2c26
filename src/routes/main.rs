use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::domain::role::Role;
use crate::repository::DieselRepository;
use crate::repository::local::LocalStore;
use crate::routes::today;
use crate::services::{ServiceError, entries as entries_service};

#[get("/")]
/// Entry form for deliverers; managers land on the report.
pub async fn show_index(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    local: web::Data<LocalStore>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match Role::from_roles(&user.roles) {
        Some(Role::Manager) => return redirect("/summary"),
        None => return redirect("/na"),
        Some(Role::Deliverer) => {}
    }

    match entries_service::load_entry_page(repo.get_ref(), local.get_ref(), &user, today()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "index",
                &server_config.auth_service_url,
            );
            context.insert("deliverer", &data.deliverer);
            context.insert("delivery_types", &data.delivery_types);
            context.insert("extra_type", &data.extra_type);
            context.insert("today", &data.today);
            context.insert("source", &data.source);

            render_template(&tera, "entries/new.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Acesso não permitido.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load the entry form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/na")]
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(
        &flash_messages,
        &user,
        "index",
        &server_config.auth_service_url,
    );

    render_template(&tera, "main/not_assigned.html", &context)
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/")
}
