pub mod config;
pub mod error;
pub mod feed;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod storage;
