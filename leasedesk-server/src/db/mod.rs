//! Database layer: pool, schema bootstrap, repositories

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
pub use repos::{AdminRepo, DbError, InquiryRepo};
