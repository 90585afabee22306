use crate::repositories::{OrderRepository, ProductRepository, UserRepository};
use crate::services::orders::OrderService;
use actix_web::web::Data;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
}

impl AppState {
    pub fn new<O, P, U>(orders: O, products: P, users: U) -> Data<Self>
    where
        O: OrderRepository + 'static,
        P: ProductRepository + 'static,
        U: UserRepository + 'static,
    {
        Data::new(Self {
            orders: OrderService::new(Arc::new(orders), Arc::new(products), Arc::new(users)),
        })
    }

    /// For stores that hold all three collections.
    pub fn from_store<S>(store: S) -> Data<Self>
    where
        S: OrderRepository + ProductRepository + UserRepository + Clone + 'static,
    {
        Self::new(store.clone(), store.clone(), store)
    }
}
