//! Catalog repository port (read side).
//!
//! Professions and doodad cards are immutable reference data, seeded by
//! migrations and only ever read at runtime.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, DoodadId, ProfessionId};
use crate::domain::game::{DoodadCard, Profession};

/// Read-only access to the game's reference data.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Find a profession template. Returns `None` if not found.
    async fn find_profession(&self, id: &ProfessionId)
        -> Result<Option<Profession>, DomainError>;

    /// All profession templates, alphabetical by name.
    async fn list_professions(&self) -> Result<Vec<Profession>, DomainError>;

    /// Find a doodad card. Returns `None` if not found.
    async fn find_doodad(&self, id: &DoodadId) -> Result<Option<DoodadCard>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CatalogRepository) {}
    }
}
