//! ListProfessionsHandler - the profession catalog for the new-game screen.

use std::sync::Arc;

use crate::domain::game::{GameError, Profession};
use crate::ports::CatalogRepository;

/// Handler for listing profession templates.
pub struct ListProfessionsHandler {
    catalog: Arc<dyn CatalogRepository>,
}

impl ListProfessionsHandler {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self) -> Result<Vec<Profession>, GameError> {
        Ok(self.catalog.list_professions().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::game::testing::*;

    #[tokio::test]
    async fn returns_catalog_professions() {
        let catalog = Arc::new(MockCatalog::new().with_profession(test_profession()));
        let handler = ListProfessionsHandler::new(catalog);

        let professions = handler.handle().await.unwrap();

        assert_eq!(professions.len(), 1);
        assert_eq!(professions[0].name(), "Engineer");
    }

    #[tokio::test]
    async fn empty_catalog_yields_empty_list() {
        let catalog = Arc::new(MockCatalog::new());
        let handler = ListProfessionsHandler::new(catalog);

        assert!(handler.handle().await.unwrap().is_empty());
    }
}
