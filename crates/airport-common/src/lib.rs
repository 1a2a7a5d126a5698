//! Airport Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared pieces used by every workspace member:
//!
//! - **Logging**: `tracing` subscriber setup driven by [`logging::LogConfig`]
//! - **Error Handling**: [`CommonError`] and its result alias
//!
//! # Example
//!
//! ```no_run
//! use airport_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> airport_common::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     let _guard = init_logging(&config)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

pub use error::{CommonError, Result};
