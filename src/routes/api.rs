use actix_web::{HttpResponse, Responder, get, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::dto::summary::PeriodQuery;
use crate::repository::DieselRepository;
use crate::repository::local::LocalStore;
use crate::routes::today;
use crate::services::{ServiceError, api as api_service};

#[get("/v1/summary")]
pub async fn api_v1_summary(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    local: web::Data<LocalStore>,
    query: web::Query<PeriodQuery>,
) -> impl Responder {
    match api_service::summary(
        repo.get_ref(),
        local.get_ref(),
        &user,
        query.into_inner(),
        today(),
    ) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::InvalidPeriod(message)) => HttpResponse::BadRequest().body(message),
        Err(err) => {
            log::error!("Failed to build summary: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/delivery-types")]
pub async fn api_v1_delivery_types(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    local: web::Data<LocalStore>,
) -> impl Responder {
    match api_service::delivery_types(repo.get_ref(), local.get_ref(), &user) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to list delivery types: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
