pub mod config;
pub mod files;
pub mod health;
pub mod routes;
