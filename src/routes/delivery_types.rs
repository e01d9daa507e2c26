//! Routes for maintaining delivery types.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::delivery_types::{AddDeliveryTypeForm, UpdateDeliveryTypeForm};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, delivery_types as delivery_types_service};

#[get("/delivery-types")]
pub async fn show_delivery_types(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match delivery_types_service::list_delivery_types(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "delivery_types",
                &server_config.auth_service_url,
            );
            context.insert("delivery_types", &data.delivery_types);
            context.insert("has_extra_type", &data.has_extra_type);

            render_template(&tera, "delivery_types/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Acesso não permitido.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list delivery types: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/delivery-types/add")]
pub async fn add_delivery_type(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddDeliveryTypeForm>,
) -> impl Responder {
    match delivery_types_service::add_delivery_type(repo.get_ref(), &user, form) {
        Ok(created) => {
            FlashMessage::success(format!("Tipo \"{}\" adicionado.", created.name)).send();
            redirect("/delivery-types")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Acesso não permitido.").send();
            redirect("/na")
        }
        Err(ServiceError::Validation(message)) => {
            FlashMessage::error(message).send();
            redirect("/delivery-types")
        }
        Err(err) => {
            log::error!("Failed to add delivery type: {err}");
            FlashMessage::error("Erro ao adicionar o tipo de entrega.").send();
            redirect("/delivery-types")
        }
    }
}

#[post("/delivery-types/update")]
pub async fn update_delivery_type(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateDeliveryTypeForm>,
) -> impl Responder {
    match delivery_types_service::update_delivery_type(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Tipo de entrega atualizado.").send();
            redirect("/delivery-types")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Acesso não permitido.").send();
            redirect("/na")
        }
        Err(ServiceError::Validation(message)) => {
            FlashMessage::error(message).send();
            redirect("/delivery-types")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Tipo de entrega não encontrado.").send();
            redirect("/delivery-types")
        }
        Err(err) => {
            log::error!("Failed to update delivery type: {err}");
            FlashMessage::error("Erro ao atualizar o tipo de entrega.").send();
            redirect("/delivery-types")
        }
    }
}
