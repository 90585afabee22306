use actix_web::{middleware::Logger, App, HttpServer};
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

use order_service::config::{Config, StoreKind};
use order_service::repositories::{in_memory::InMemoryStore, mongo::MongoStore};
use order_service::{routes, state::AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let config = Config::from_env();

    let state = match config.store {
        StoreKind::Memory => {
            warn!("using in-memory order store; data is lost on exit");
            AppState::from_store(InMemoryStore::default())
        }
        StoreKind::Mongo => {
            let store = MongoStore::connect(&config.mongo)
                .await
                .map_err(std::io::Error::other)?;
            store
                .ensure_indexes()
                .await
                .map_err(std::io::Error::other)?;
            AppState::from_store(store)
        }
    };

    info!(addr = %config.server_addr, "order-service listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::config)
    })
    .bind(&config.server_addr)?
    .run()
    .await
}
