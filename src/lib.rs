//! Stateless bearer-session authentication.
//!
//! - `services::auth` issues and validates HS256 session tokens and runs the
//!   per-request authentication step
//! - `middleware::auth::access` binds the resolved identity to the request
//! - `api::v1::extractors` hands it to handlers

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
