//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresGameRepository` - Transactional game-state writes with
//!   compare-and-swap on the player version
//! - `PostgresCatalogRepository` - Read-only reference data (professions,
//!   doodad cards)

mod catalog_repository;
mod game_repository;

pub use catalog_repository::PostgresCatalogRepository;
pub use game_repository::PostgresGameRepository;
