//! Ports - trait contracts between the application core and adapters.

mod catalog_repository;
mod game_repository;
mod session_validator;

pub use catalog_repository::CatalogRepository;
pub use game_repository::GameRepository;
pub use session_validator::SessionValidator;
