pub mod in_memory;
pub mod mongo;

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::{
    entities::order::{NewOrder, Order, OrderStatus},
    entities::product::Product,
    errors::RepoErr,
};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, new: NewOrder) -> Result<Order, RepoErr>;
    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Order>, RepoErr>;
    async fn list(&self) -> Result<Vec<Order>, RepoErr>;
    /// Returns the order as it is after the update, or `None` if no order
    /// carries `order_id`.
    async fn set_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoErr>;

    async fn ping(&self) -> Result<(), RepoErr> {
        Ok(())
    }
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Unknown ids are skipped, not reported.
    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<Product>, RepoErr>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn exists(&self, id: &ObjectId) -> Result<bool, RepoErr>;
}
