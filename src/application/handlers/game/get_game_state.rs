//! GetGameStateHandler - the full state view for one game.

use std::sync::Arc;

use crate::domain::foundation::{GameId, UserId};
use crate::domain::game::{
    GameError, GameSession, Player, PlayerDoodad, PlayerInvestment, PlayerLiability, Profession,
};
use crate::ports::{CatalogRepository, GameRepository};

use super::authorize_player;

/// Query for the state of one game.
#[derive(Debug, Clone)]
pub struct GetGameStateQuery {
    pub game_id: GameId,
    pub user_id: UserId,
}

/// Everything the board needs to render: session, player, profession,
/// unsold investments, unpaid liabilities, and doodad history.
#[derive(Debug, Clone)]
pub struct GameStateView {
    pub session: GameSession,
    pub player: Player,
    pub profession: Profession,
    pub investments: Vec<PlayerInvestment>,
    pub liabilities: Vec<PlayerLiability>,
    pub doodads: Vec<PlayerDoodad>,
}

/// Handler for reading game state.
pub struct GetGameStateHandler {
    games: Arc<dyn GameRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

impl GetGameStateHandler {
    pub fn new(games: Arc<dyn GameRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { games, catalog }
    }

    pub async fn handle(&self, query: GetGameStateQuery) -> Result<GameStateView, GameError> {
        let (session, player) =
            authorize_player(self.games.as_ref(), &query.game_id, &query.user_id).await?;

        let profession = self
            .catalog
            .find_profession(player.profession_id())
            .await?
            .ok_or(GameError::ProfessionNotFound(*player.profession_id()))?;

        let investments = self.games.list_unsold_investments(player.id()).await?;
        let liabilities = self.games.list_unpaid_liabilities(player.id()).await?;
        let doodads = self.games.list_doodads(player.id()).await?;

        Ok(GameStateView {
            session,
            player,
            profession,
            investments,
            liabilities,
            doodads,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::game::testing::*;
    use crate::domain::foundation::PlayerId;
    use crate::domain::game::Player;

    fn seeded_game() -> (GameSession, Player, Profession) {
        let profession = test_profession();
        let session = GameSession::new(GameId::new(), test_user_id());
        let player = Player::seed(PlayerId::new(), *session.id(), test_user_id(), &profession);
        (session, player, profession)
    }

    #[tokio::test]
    async fn returns_full_state_for_owner() {
        let (session, player, profession) = seeded_game();
        let investment = test_investment(*player.id(), 100);
        let games = Arc::new(
            MockGameRepository::new()
                .with_game(session.clone(), player.clone())
                .with_investment(investment),
        );
        let catalog = Arc::new(MockCatalog::new().with_profession(profession));
        let handler = GetGameStateHandler::new(games, catalog);

        let view = handler
            .handle(GetGameStateQuery {
                game_id: *session.id(),
                user_id: test_user_id(),
            })
            .await
            .unwrap();

        assert_eq!(view.session.id(), session.id());
        assert_eq!(view.player.id(), player.id());
        assert_eq!(view.profession.name(), "Engineer");
        assert_eq!(view.investments.len(), 1);
        assert!(view.liabilities.is_empty());
        assert!(view.doodads.is_empty());
    }

    #[tokio::test]
    async fn excludes_sold_investments() {
        let (session, player, profession) = seeded_game();
        let mut sold = test_investment(*player.id(), 100);
        sold.sell(4_000).unwrap();
        let games = Arc::new(
            MockGameRepository::new()
                .with_game(session.clone(), player)
                .with_investment(sold),
        );
        let catalog = Arc::new(MockCatalog::new().with_profession(profession));
        let handler = GetGameStateHandler::new(games, catalog);

        let view = handler
            .handle(GetGameStateQuery {
                game_id: *session.id(),
                user_id: test_user_id(),
            })
            .await
            .unwrap();

        assert!(view.investments.is_empty());
    }

    #[tokio::test]
    async fn rejects_non_owner() {
        let (session, player, profession) = seeded_game();
        let games = Arc::new(MockGameRepository::new().with_game(session.clone(), player));
        let catalog = Arc::new(MockCatalog::new().with_profession(profession));
        let handler = GetGameStateHandler::new(games, catalog);

        let result = handler
            .handle(GetGameStateQuery {
                game_id: *session.id(),
                user_id: other_user_id(),
            })
            .await;

        assert_eq!(result.unwrap_err(), GameError::Forbidden);
    }

    #[tokio::test]
    async fn fails_for_unknown_game() {
        let games = Arc::new(MockGameRepository::new());
        let catalog = Arc::new(MockCatalog::new());
        let handler = GetGameStateHandler::new(games, catalog);

        let missing = GameId::new();
        let result = handler
            .handle(GetGameStateQuery {
                game_id: missing,
                user_id: test_user_id(),
            })
            .await;

        assert_eq!(result.unwrap_err(), GameError::GameNotFound(missing));
    }
}
