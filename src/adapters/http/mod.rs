//! HTTP adapters - REST API implementations.

pub mod game;
pub mod middleware;

pub use game::{catalog_routes, game_routes, GameHandlers};
