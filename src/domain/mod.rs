//! Domain layer - aggregates, value objects, and pure rules.

pub mod foundation;
pub mod game;
