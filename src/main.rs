use actix_web::{
    self,
    middleware::{from_fn, Logger},
    web, App, HttpServer,
};
use std::{
    sync::{Arc, LazyLock},
    time::Duration,
};

use crate::{
    configs::{connect_database, http_client},
    constants::StoreBackend,
    middlewares::request_timeout,
    modules::{
        conversation::repository_http::ConversationRepositoryHttp,
        relationship::{
            repository::RelationshipRepository, repository_memory::RelationshipRepositoryMemory,
            repository_pg::RelationshipRepositoryPg, service::RelationshipService,
        },
        user::repository_http::UserRepositoryHttp,
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

async fn relationship_store() -> std::io::Result<Arc<dyn RelationshipRepository + Send + Sync>> {
    match ENV.store_backend {
        StoreBackend::Postgres => {
            let database_url = ENV
                .database_url
                .as_deref()
                .ok_or_else(|| std::io::Error::other("DATABASE_URL is not set"))?;
            let db_pool = connect_database(database_url).await.map_err(|e| {
                log::error!("{e}");
                std::io::Error::other("Database connection error")
            })?;
            Ok(Arc::new(RelationshipRepositoryPg::new(db_pool)))
        }
        StoreBackend::Memory => {
            log::warn!("Using the in-memory relationship store, data is lost on exit");
            Ok(Arc::new(RelationshipRepositoryMemory::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let relationship_repo = relationship_store().await?;

    let client = http_client(Duration::from_secs(ENV.upstream_timeout_secs))
        .map_err(|_| std::io::Error::other("HTTP client error"))?;
    let user_repo = UserRepositoryHttp::new(client.clone(), ENV.user_service_url.clone());
    let conversation_repo = ConversationRepositoryHttp::new(client, ENV.text_chat_service_url.clone());

    let relationship_service = RelationshipService::with_dependencies(
        relationship_repo,
        Arc::new(user_repo),
        Arc::new(conversation_repo),
        ENV.verify_users,
    );
    let app_service = relationship_service.clone();
    let timeout = Duration::from_secs(ENV.request_timeout_secs);

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(request_timeout(timeout)))
            .wrap(Logger::default())
            .app_data(web::Data::new(app_service.clone()))
            .configure(modules::health::route::configure)
            .configure(modules::relationship::route::configure)
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(ENV.workers)
    .shutdown_timeout(ENV.shutdown_timeout_secs)
    .run()
    .await?;

    relationship_service.shutdown().await;
    log::info!("Server stopped");
    Ok(())
}
