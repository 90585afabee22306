use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::entities::order::{LineItem, NewOrder, Order, OrderStatus, OrderView};
use crate::errors::OrderError;
use crate::identity::AuthenticatedUser;
use crate::repositories::{OrderRepository, ProductRepository, UserRepository};

/// Body accepted by order creation. Fields outside this schema are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateOrderPayload {
    #[serde(rename = "orderID", default)]
    pub order_id: Option<String>,
    pub products: Vec<LineItemPayload>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct LineItemPayload {
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl LineItemPayload {
    fn into_line_item(self) -> Result<LineItem, OrderError> {
        Ok(LineItem {
            product_id: parse_object_id(&self.product_id, "productId")?,
            quantity: self.quantity,
            price: self.price,
        })
    }
}

fn parse_object_id(raw: &str, field: &str) -> Result<ObjectId, OrderError> {
    ObjectId::parse_str(raw)
        .map_err(|_| OrderError::Invalid(format!("invalid object id for {field}: \"{raw}\"")))
}

/// Absent, `null`, `false`, `0` and `""` all count as not supplied.
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    users: Arc<dyn UserRepository>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            orders,
            products,
            users,
        }
    }

    pub async fn list(&self) -> Result<Vec<OrderView>, OrderError> {
        let orders = self.orders.list().await?;
        self.populate(orders).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, order_id: &str) -> Result<OrderView, OrderError> {
        let order = self
            .orders
            .find_by_order_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;
        self.populate(vec![order])
            .await?
            .pop()
            .ok_or(OrderError::NotFound)
    }

    /// Validates `body` and stores it as a new order.
    ///
    /// Checks run in a fixed order: `products` present, `products` non-empty,
    /// referenced user exists, then the remaining schema. A `user` in the body
    /// takes precedence over `identity`.
    #[instrument(skip_all)]
    pub async fn create(
        &self,
        body: Value,
        identity: Option<AuthenticatedUser>,
    ) -> Result<OrderView, OrderError> {
        match body.get("products") {
            Some(Value::Array(items)) if items.is_empty() => {
                return Err(OrderError::EmptyProducts)
            }
            products if is_falsy(products) => return Err(OrderError::MissingProducts),
            _ => {}
        }

        let supplied = body.get("user").filter(|u| !is_falsy(Some(*u)));
        let user = match supplied {
            None => identity.map(|u| (u.0, u.0.to_hex())),
            Some(Value::String(raw)) => Some((parse_object_id(raw, "user")?, raw.clone())),
            Some(other) => {
                return Err(OrderError::Invalid(format!(
                    "invalid object id for user: {other}"
                )))
            }
        };
        if let Some((id, raw)) = &user {
            if !self.users.exists(id).await? {
                return Err(OrderError::UserNotFound(raw.clone()));
            }
        }

        let payload: CreateOrderPayload =
            serde_json::from_value(body).map_err(|e| OrderError::Invalid(e.to_string()))?;
        let products = payload
            .products
            .into_iter()
            .map(LineItemPayload::into_line_item)
            .collect::<Result<Vec<_>, _>>()?;

        let created = self
            .orders
            .create(NewOrder {
                order_id: payload.order_id,
                products,
                status: payload.status,
                user: user.map(|(id, _)| id),
            })
            .await?;
        info!(order_id = %created.order_id, items = created.products.len(), "order created");
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_id: &str,
        status: &str,
    ) -> Result<OrderView, OrderError> {
        let status: OrderStatus = status.parse()?;
        let updated = self
            .orders
            .set_status(order_id, status)
            .await?
            .ok_or(OrderError::NotFound)?;
        info!(order_id, status = status.as_str(), "order status updated");
        Ok(updated.into())
    }

    pub async fn ping(&self) -> Result<(), OrderError> {
        Ok(self.orders.ping().await?)
    }

    /// Replaces every line item's product reference with the product
    /// document, fetching all referenced products in one call.
    async fn populate(&self, orders: Vec<Order>) -> Result<Vec<OrderView>, OrderError> {
        let ids: Vec<ObjectId> = orders
            .iter()
            .flat_map(|o| o.products.iter().map(|item| item.product_id))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let products = if ids.is_empty() {
            HashMap::new()
        } else {
            self.products
                .find_many(&ids)
                .await?
                .into_iter()
                .filter_map(|p| p.id().map(|id| (id, p)))
                .collect()
        };

        Ok(orders
            .into_iter()
            .map(|o| OrderView::populated(o, &products))
            .collect())
    }
}
