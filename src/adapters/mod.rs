//! Adapters - Infrastructure implementations of the ports.
//!
//! - `auth` - Session token validation
//! - `http` - REST API exposure
//! - `postgres` - PostgreSQL persistence

pub mod auth;
pub mod http;
pub mod postgres;
