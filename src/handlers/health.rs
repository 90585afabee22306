use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

pub async fn ping(state: web::Data<AppState>) -> HttpResponse {
    match state.orders.ping().await {
        Ok(()) => HttpResponse::Ok().body("pong"),
        Err(e) => {
            warn!(err = %e, "order store ping failed");
            HttpResponse::ServiceUnavailable().json(json!({ "error": e.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::in_memory::InMemoryStore;
    use actix_web::{body::to_bytes, test, App};

    #[actix_web::test]
    async fn ping_returns_pong() {
        let state = AppState::from_store(InMemoryStore::default());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/ping", web::get().to(ping)),
        )
        .await;
        let req = test::TestRequest::get().uri("/ping").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], b"pong");
    }
}
