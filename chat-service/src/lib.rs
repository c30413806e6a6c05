//! Chat Service - numbered conversations of posted messages over PostgreSQL.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

pub use startup::{build_router, AppState, Application};
