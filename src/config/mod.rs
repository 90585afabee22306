use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub orders_collection: String,
    pub products_collection: String,
    pub users_collection: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_addr: String,
    pub store: StoreKind,
    pub mongo: MongoConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let store = match var("ORDER_STORE", "mongo").to_ascii_lowercase().as_str() {
            "mongo" => StoreKind::Mongo,
            "memory" => StoreKind::Memory,
            other => {
                warn!(value = other, "unknown ORDER_STORE; using mongo");
                StoreKind::Mongo
            }
        };

        Self {
            server_addr: var("SERVER_ADDR", "127.0.0.1:8080"),
            store,
            mongo: MongoConfig {
                uri: var("MONGODB_URI", "mongodb://127.0.0.1:27017"),
                database: var("MONGODB_DB", "orders"),
                orders_collection: var("ORDERS_COLLECTION", "orders"),
                products_collection: var("PRODUCTS_COLLECTION", "products"),
                users_collection: var("USERS_COLLECTION", "users"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let cfg = from_pairs(&[]);
        assert_eq!(cfg.server_addr, "127.0.0.1:8080");
        assert_eq!(cfg.store, StoreKind::Mongo);
        assert_eq!(cfg.mongo.uri, "mongodb://127.0.0.1:27017");
        assert_eq!(cfg.mongo.database, "orders");
        assert_eq!(cfg.mongo.orders_collection, "orders");
        assert_eq!(cfg.mongo.products_collection, "products");
        assert_eq!(cfg.mongo.users_collection, "users");
    }

    #[test]
    fn env_overrides_defaults() {
        let cfg = from_pairs(&[
            ("SERVER_ADDR", "0.0.0.0:3000"),
            ("ORDER_STORE", "Memory"),
            ("MONGODB_URI", "mongodb://db:27017"),
            ("MONGODB_DB", "shop"),
            ("USERS_COLLECTION", "accounts"),
        ]);
        assert_eq!(cfg.server_addr, "0.0.0.0:3000");
        assert_eq!(cfg.store, StoreKind::Memory);
        assert_eq!(cfg.mongo.uri, "mongodb://db:27017");
        assert_eq!(cfg.mongo.database, "shop");
        assert_eq!(cfg.mongo.users_collection, "accounts");
        assert_eq!(cfg.mongo.orders_collection, "orders");
    }

    #[test]
    fn unknown_store_falls_back_to_mongo() {
        let cfg = from_pairs(&[("ORDER_STORE", "redis")]);
        assert_eq!(cfg.store, StoreKind::Mongo);
    }
}
