use crate::entities::order::{NewOrder, Order, OrderStatus};
use crate::entities::product::Product;
use crate::errors::RepoErr;
use crate::repositories::{OrderRepository, ProductRepository, UserRepository};
use async_trait::async_trait;
use bson::{oid::ObjectId, DateTime, Document};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local stand-in for the document store. Orders keep insertion
/// order so listings are stable.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    orders: Arc<RwLock<Vec<Order>>>,
    products: Arc<RwLock<HashMap<ObjectId, Product>>>,
    users: Arc<RwLock<HashSet<ObjectId>>>,
}

impl InMemoryStore {
    /// Stores a product document, assigning an `_id` when it has none.
    pub async fn insert_product(&self, mut doc: Document) -> ObjectId {
        let id = match doc.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                doc.insert("_id", id);
                id
            }
        };
        self.products.write().await.insert(id, Product::from(doc));
        id
    }

    pub async fn insert_user(&self, id: ObjectId) {
        self.users.write().await.insert(id);
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn create(&self, new: NewOrder) -> Result<Order, RepoErr> {
        let mut orders = self.orders.write().await;
        let order = Order::new(new);
        if orders.iter().any(|o| o.order_id == order.order_id) {
            return Err(RepoErr::DuplicateOrderId(order.order_id));
        }
        orders.push(order.clone());
        Ok(order)
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Order>, RepoErr> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.order_id == order_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Order>, RepoErr> {
        Ok(self.orders.read().await.clone())
    }

    async fn set_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoErr> {
        let mut orders = self.orders.write().await;
        let Some(o) = orders.iter_mut().find(|o| o.order_id == order_id) else {
            return Ok(None);
        };
        o.status = status;
        o.updated_at = DateTime::now();
        Ok(Some(o.clone()))
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<Product>, RepoErr> {
        let products = self.products.read().await;
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn exists(&self, id: &ObjectId) -> Result<bool, RepoErr> {
        Ok(self.users.read().await.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;
    use crate::entities::order::LineItem;

    fn new_order(order_id: Option<&str>) -> NewOrder {
        NewOrder {
            order_id: order_id.map(str::to_string),
            products: vec![LineItem {
                product_id: ObjectId::new(),
                quantity: Some(1),
                price: Some(9.99),
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn set_status_updates_status_and_timestamp() {
        let repo = InMemoryStore::default();
        let created = repo.create(new_order(Some("ORD1"))).await.unwrap();
        assert_eq!(created.status, OrderStatus::Pending);

        let updated = repo
            .set_status("ORD1", OrderStatus::Cancelled)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, OrderStatus::Cancelled);
        assert!(updated.updated_at.timestamp_millis() >= created.updated_at.timestamp_millis());
        assert_eq!(updated.created_at, created.created_at);

        let after = repo.find_by_order_id("ORD1").await.unwrap().unwrap();
        assert_eq!(after.status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn set_status_on_unknown_order_returns_none() {
        let repo = InMemoryStore::default();
        let res = repo.set_status("nope", OrderStatus::Shipped).await.unwrap();
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_order_id() {
        let repo = InMemoryStore::default();
        repo.create(new_order(Some("ORD1"))).await.unwrap();
        let err = repo.create(new_order(Some("ORD1"))).await.unwrap_err();
        assert!(matches!(err, RepoErr::DuplicateOrderId(id) if id == "ORD1"));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let repo = InMemoryStore::default();
        for id in ["A", "B", "C"] {
            repo.create(new_order(Some(id))).await.unwrap();
        }
        let ids: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.order_id)
            .collect();
        assert_eq!(ids, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn find_many_skips_unknown_products() {
        let repo = InMemoryStore::default();
        let known = repo.insert_product(doc! { "name": "Mug" }).await;
        let found = repo.find_many(&[known, ObjectId::new()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), Some(known));
    }

    #[tokio::test]
    async fn insert_product_keeps_existing_id() {
        let repo = InMemoryStore::default();
        let id = ObjectId::new();
        assert_eq!(repo.insert_product(doc! { "_id": id }).await, id);
    }

    #[tokio::test]
    async fn users_exist_only_after_insert() {
        let repo = InMemoryStore::default();
        let id = ObjectId::new();
        assert!(!repo.exists(&id).await.unwrap());
        repo.insert_user(id).await;
        assert!(repo.exists(&id).await.unwrap());
    }
}
