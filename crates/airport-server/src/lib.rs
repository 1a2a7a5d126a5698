//! Airport Server Library
//!
//! REST backend for an airport: reference data (airports, routes, crews,
//! airplane types, airplanes), flight scheduling and seat booking.
//!
//! # Architecture
//!
//! - **booking**: pure rules for seat placement and availability
//! - **db**: the [`db::Repository`] seam with Postgres and in-memory backends
//! - **features**: CQRS slices; commands write, queries read, both run
//!   through [`cqrs::execute_command`] / [`cqrs::execute_query`]
//! - **api**: router assembly and the server loop
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use airport_server::{api, config::Config, db::MemoryRepository};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let repo = Arc::new(MemoryRepository::new());
//!     api::serve(&config, repo, std::future::pending()).await
//! }
//! ```

pub mod api;
pub mod booking;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod models;

// Re-export commonly used types
pub use error::{ApiResult, AppError};
