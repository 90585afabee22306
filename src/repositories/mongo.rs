use async_trait::async_trait;
use bson::{doc, oid::ObjectId, DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::{
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Client, Collection, Database, IndexModel,
};
use tracing::info;

use crate::config::MongoConfig;
use crate::entities::order::{NewOrder, Order, OrderStatus};
use crate::entities::product::Product;
use crate::errors::RepoErr;
use crate::repositories::{OrderRepository, ProductRepository, UserRepository};

const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    orders: Collection<Order>,
    products: Collection<Product>,
    users: Collection<Document>,
}

impl MongoStore {
    pub async fn connect(cfg: &MongoConfig) -> Result<Self, RepoErr> {
        let client = Client::with_uri_str(&cfg.uri).await?;
        info!(database = %cfg.database, "connected to mongodb");
        Ok(Self::new(client.database(&cfg.database), cfg))
    }

    pub fn new(db: Database, cfg: &MongoConfig) -> Self {
        Self {
            orders: db.collection(&cfg.orders_collection),
            products: db.collection(&cfg.products_collection),
            users: db.collection(&cfg.users_collection),
            db,
        }
    }

    /// `orderID` is the external lookup key, so it must stay unique.
    pub async fn ensure_indexes(&self) -> Result<(), RepoErr> {
        let index = IndexModel::builder()
            .keys(doc! { "orderID": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.orders.create_index(index).await?;
        Ok(())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl OrderRepository for MongoStore {
    async fn create(&self, new: NewOrder) -> Result<Order, RepoErr> {
        let order = Order::new(new);
        match self.orders.insert_one(&order).await {
            Ok(_) => Ok(order),
            Err(e) if is_duplicate_key(&e) => Err(RepoErr::DuplicateOrderId(order.order_id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Order>, RepoErr> {
        Ok(self.orders.find_one(doc! { "orderID": order_id }).await?)
    }

    async fn list(&self) -> Result<Vec<Order>, RepoErr> {
        let cursor = self.orders.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn set_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoErr> {
        let update = doc! {
            "$set": { "status": status.as_str(), "updatedAt": DateTime::now() }
        };
        Ok(self
            .orders
            .find_one_and_update(doc! { "orderID": order_id }, update)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn ping(&self) -> Result<(), RepoErr> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MongoStore {
    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<Product>, RepoErr> {
        let cursor = self
            .products
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl UserRepository for MongoStore {
    async fn exists(&self, id: &ObjectId) -> Result<bool, RepoErr> {
        let found = self
            .users
            .find_one(doc! { "_id": *id })
            .projection(doc! { "_id": 1 })
            .await?;
        Ok(found.is_some())
    }
}
