#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use pushkind_common::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use pushkind_common::models::config::CommonServerConfig;
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::domain::types::HubId;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::repository::local::LocalStore;
#[cfg(feature = "server")]
use crate::routes::api::{api_v1_delivery_types, api_v1_summary};
#[cfg(feature = "server")]
use crate::routes::delivery_types::{add_delivery_type, show_delivery_types, update_delivery_type};
#[cfg(feature = "server")]
use crate::routes::entries::{show_history, submit_entry};
#[cfg(feature = "server")]
use crate::routes::main::{logout, not_assigned, show_index};
#[cfg(feature = "server")]
use crate::routes::summary::{export_summary, show_summary};

pub mod aggregation;
pub mod db;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Role every member of the delivery service carries.
pub const SERVICE_ACCESS_ROLE: &str = "delivery";
/// Additional role that turns a member into a manager.
pub const SERVICE_MANAGER_ROLE: &str = "delivery_manager";

#[cfg(feature = "server")]
fn open_local_store(server_config: &ServerConfig) -> std::io::Result<LocalStore> {
    let local_store = match &server_config.local_store_path {
        Some(path) => LocalStore::open(path)
            .map_err(|e| std::io::Error::other(format!("Failed to open local store: {e}")))?,
        None => LocalStore::in_memory(),
    };

    if server_config.seed_demo_data {
        let hub_id = HubId::new(server_config.demo_hub_id)
            .map_err(|e| std::io::Error::other(format!("Invalid demo hub: {e}")))?;
        let seeded = local_store
            .seed_demo(hub_id, chrono::Local::now().date_naive())
            .map_err(|e| std::io::Error::other(format!("Failed to seed local store: {e}")))?;
        if seeded {
            log::info!("Seeded local store with demo data for hub {hub_id}");
        }
    }

    Ok(local_store)
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let common_config = CommonServerConfig {
        auth_service_url: server_config.auth_service_url.to_string(),
        secret: server_config.secret.clone(),
    };

    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // One fallback store shared by all workers.
    let local_store = web::Data::new(open_local_store(&server_config)?);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(
                web::scope("/api")
                    .service(api_v1_summary)
                    .service(api_v1_delivery_types),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(not_assigned)
                    .service(submit_entry)
                    .service(show_history)
                    .service(show_summary)
                    .service(export_summary)
                    .service(show_delivery_types)
                    .service(add_delivery_type)
                    .service(update_delivery_type)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(local_store.clone())
            .app_data(web::Data::new(common_config.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
