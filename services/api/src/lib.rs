//! Interview API Library Crate
//!
//! The HTTP surface of the mock-interview service: configuration, shared
//! state, request handlers, speech passthrough and routing. The `api` binary
//! is a thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod speech;
pub mod state;
