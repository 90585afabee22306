use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::errors::ApiError;
use crate::identity::AuthenticatedUser;
use crate::state::AppState;

pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let items = state.orders.list().await?;
    Ok(HttpResponse::Ok().json(items))
}

pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    let order = state.orders.get(&order_id).await?;
    Ok(HttpResponse::Ok().json(order))
}

/// Responds 200 with the stored order.
pub async fn create_order(
    state: web::Data<AppState>,
    identity: Option<AuthenticatedUser>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let created = state.orders.create(body.into_inner(), identity).await?;
    Ok(HttpResponse::Ok().json(created))
}

pub async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (order_id, status) = path.into_inner();
    let updated = state.orders.update_status(&order_id, &status).await?;
    Ok(HttpResponse::Ok().json(updated))
}
