//! Movieflix API server library.
//!
//! Exposes config, state, error handling, services and routes so the binary
//! and the integration tests build the same application.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
