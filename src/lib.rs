pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod etl;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

pub use error::VitiError;
