//! HTTP user-registration service backed by PostgreSQL.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod state;
pub mod store;
