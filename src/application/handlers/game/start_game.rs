//! StartGameHandler - creates a session and seeds the player.

use std::sync::Arc;

use serde_json::json;

use crate::domain::foundation::{GameId, PlayerId, ProfessionId, UserId};
use crate::domain::game::{GameError, GameEvent, GameEventKind, GameSession, Player};
use crate::ports::{CatalogRepository, GameRepository};

/// Command to start a new game.
#[derive(Debug, Clone)]
pub struct StartGameCommand {
    pub user_id: UserId,
    pub profession_id: ProfessionId,
}

/// Result of a successful game start.
#[derive(Debug, Clone)]
pub struct StartGameResult {
    pub game_id: GameId,
    pub player_id: PlayerId,
}

/// Handler for starting games.
pub struct StartGameHandler {
    games: Arc<dyn GameRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

impl StartGameHandler {
    pub fn new(games: Arc<dyn GameRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { games, catalog }
    }

    pub async fn handle(&self, cmd: StartGameCommand) -> Result<StartGameResult, GameError> {
        let profession = self
            .catalog
            .find_profession(&cmd.profession_id)
            .await?
            .ok_or(GameError::ProfessionNotFound(cmd.profession_id))?;

        let session = GameSession::new(GameId::new(), cmd.user_id.clone());
        let player = Player::seed(PlayerId::new(), *session.id(), cmd.user_id, &profession);

        let event = GameEvent::record(
            *session.id(),
            *player.id(),
            GameEventKind::GameStarted,
            json!({
                "profession_id": profession.id(),
                "profession": profession.name(),
                "starting_cash": profession.starting_cash(),
                "starting_savings": profession.starting_savings(),
            }),
            0,
            0,
            player.current_turn(),
        );

        self.games.create_game(&session, &player, &event).await?;

        tracing::info!(
            game_id = %session.id(),
            player_id = %player.id(),
            profession = profession.name(),
            "game started"
        );

        Ok(StartGameResult {
            game_id: *session.id(),
            player_id: *player.id(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::game::testing::*;
    use crate::domain::game::GameEventKind;

    #[tokio::test]
    async fn starts_game_with_seeded_player() {
        let profession = test_profession();
        let games = Arc::new(MockGameRepository::new());
        let catalog = Arc::new(MockCatalog::new().with_profession(profession.clone()));
        let handler = StartGameHandler::new(games.clone(), catalog);

        let cmd = StartGameCommand {
            user_id: test_user_id(),
            profession_id: *profession.id(),
        };

        let result = handler.handle(cmd).await.unwrap();

        let player = games.stored_player(&result.player_id).unwrap();
        assert_eq!(player.cash_on_hand(), 1000);
        assert_eq!(player.savings(), 400);
        assert_eq!(player.current_turn(), 1);
        assert_eq!(player.passive_income(), 0);
    }

    #[tokio::test]
    async fn logs_game_started_event() {
        let profession = test_profession();
        let games = Arc::new(MockGameRepository::new());
        let catalog = Arc::new(MockCatalog::new().with_profession(profession.clone()));
        let handler = StartGameHandler::new(games.clone(), catalog);

        let cmd = StartGameCommand {
            user_id: test_user_id(),
            profession_id: *profession.id(),
        };
        let result = handler.handle(cmd).await.unwrap();

        let events = games.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), GameEventKind::GameStarted);
        assert_eq!(events[0].game_id(), &result.game_id);
        assert_eq!(events[0].turn(), 1);
        assert_eq!(events[0].payload()["profession"], "Engineer");
    }

    #[tokio::test]
    async fn fails_when_profession_missing() {
        let games = Arc::new(MockGameRepository::new());
        let catalog = Arc::new(MockCatalog::new());
        let handler = StartGameHandler::new(games.clone(), catalog);

        let missing = ProfessionId::new();
        let cmd = StartGameCommand {
            user_id: test_user_id(),
            profession_id: missing,
        };

        let result = handler.handle(cmd).await;
        assert_eq!(result.unwrap_err(), GameError::ProfessionNotFound(missing));
        assert!(games.events().is_empty());
    }

    #[tokio::test]
    async fn propagates_write_failure() {
        let profession = test_profession();
        let games = Arc::new(MockGameRepository::failing());
        let catalog = Arc::new(MockCatalog::new().with_profession(profession.clone()));
        let handler = StartGameHandler::new(games, catalog);

        let cmd = StartGameCommand {
            user_id: test_user_id(),
            profession_id: *profession.id(),
        };

        let result = handler.handle(cmd).await;
        assert!(matches!(result, Err(GameError::Infrastructure(_))));
    }
}
