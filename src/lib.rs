pub mod config;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod identity;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
