use crate::errors::ApiError;
use crate::handlers;
use actix_web::web::{self, ServiceConfig};

pub const ORDERS_PATH: &str = "/api/orders";

pub fn config(cfg: &mut ServiceConfig) {
    cfg.app_data(json_config())
        .service(web::scope("/health").route("", web::get().to(handlers::health::ping)))
        .route("/api", web::get().to(handlers::index::describe))
        .route("/api/", web::get().to(handlers::index::describe))
        .service(web::scope(ORDERS_PATH).configure(orders));
}

/// Order routes relative to wherever the caller mounts them.
pub fn orders(cfg: &mut ServiceConfig) {
    cfg.route("", web::get().to(handlers::orders::list_orders))
        .route("/", web::get().to(handlers::orders::list_orders))
        .route("", web::post().to(handlers::orders::create_order))
        .route("/", web::post().to(handlers::orders::create_order))
        .route("/{order_id}", web::get().to(handlers::orders::get_order))
        .route(
            "/{order_id}/{status}",
            web::put().to(handlers::orders::update_status),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}
