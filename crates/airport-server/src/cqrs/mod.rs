//! CQRS plumbing
//!
//! Every command and query struct implements `mediator::Request` with its
//! handler's result type, plus one of the [`Command`] / [`Query`] markers.
//! Route handlers call the feature's `handle` function through
//! [`execute_command`] or [`execute_query`].

pub mod middleware;

pub use middleware::{execute_command, execute_query, Command, Query};
