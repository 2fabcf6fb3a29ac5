pub mod config;
pub mod db;
pub mod errors;
pub mod inference;
pub mod models;
pub mod routes;
pub mod screening;
pub mod state;
pub mod store;
pub mod validation;
