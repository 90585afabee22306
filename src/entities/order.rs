use std::collections::HashMap;
use std::str::FromStr;

use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::entities::product::{rfc3339, Product};
use crate::errors::OrderError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(OrderError::InvalidStatus)
    }
}

/// One product entry of an order, stored with a bare product reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    #[serde(rename = "productId")]
    pub product_id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Order document as persisted in the `orders` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "orderID")]
    pub order_id: String,
    pub products: Vec<LineItem>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ObjectId>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub order_id: Option<String>,
    pub products: Vec<LineItem>,
    pub status: Option<OrderStatus>,
    pub user: Option<ObjectId>,
}

impl Order {
    pub fn new(new: NewOrder) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            order_id: new.order_id.unwrap_or_else(generate_order_id),
            products: new.products,
            status: new.status.unwrap_or_default(),
            user: new.user,
            created_at: now,
            updated_at: now,
        }
    }
}

fn generate_order_id() -> String {
    format!("ORD{}", Uuid::new_v4().simple().to_string().to_uppercase())
}

/// JSON shape of an order returned to clients.
///
/// `productId` holds either the bare product id or, once expanded, the whole
/// product document (`null` when the product no longer exists).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "orderID")]
    pub order_id: String,
    pub products: Vec<LineItemView>,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemView {
    #[serde(rename = "productId")]
    pub product_id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl OrderView {
    pub fn populated(order: Order, products: &HashMap<ObjectId, Product>) -> Self {
        Self::render(order, |id| {
            products
                .get(id)
                .map(|p| p.to_json())
                .unwrap_or(Value::Null)
        })
    }

    fn render(order: Order, product: impl Fn(&ObjectId) -> Value) -> Self {
        let products = order
            .products
            .iter()
            .map(|item| LineItemView {
                product_id: product(&item.product_id),
                quantity: item.quantity,
                price: item.price,
            })
            .collect();
        Self {
            id: order.id.to_hex(),
            order_id: order.order_id,
            products,
            status: order.status,
            user: order.user.map(|u| u.to_hex()),
            created_at: rfc3339(order.created_at),
            updated_at: rfc3339(order.updated_at),
        }
    }
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self::render(order, |id| Value::String(id.to_hex()))
    }
}
