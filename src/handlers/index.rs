use actix_web::HttpResponse;
use serde_json::json;

use crate::entities::order::OrderStatus;
use crate::routes::ORDERS_PATH;

/// Describes the order endpoints; validation errors point callers here.
pub async fn describe() -> HttpResponse {
    let statuses: Vec<&str> = OrderStatus::ALL.iter().map(OrderStatus::as_str).collect();
    HttpResponse::Ok().json(json!({
        "endpoints": [
            { "method": "GET", "path": ORDERS_PATH, "description": "list all orders with products expanded" },
            { "method": "GET", "path": format!("{ORDERS_PATH}/{{orderID}}"), "description": "fetch one order by its orderID" },
            {
                "method": "POST",
                "path": ORDERS_PATH,
                "description": "create an order",
                "body": {
                    "products": "array of { productId, quantity?, price? }, at least one",
                    "user": "optional user id",
                    "status": "optional, defaults to pending",
                    "orderID": "optional, generated when absent",
                },
            },
            { "method": "PUT", "path": format!("{ORDERS_PATH}/{{orderID}}/{{status}}"), "description": "set the order status" },
        ],
        "statuses": statuses,
    }))
}
