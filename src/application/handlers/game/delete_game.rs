//! DeleteGameHandler - removes a game and everything under it.

use std::sync::Arc;

use crate::domain::foundation::{GameId, UserId};
use crate::domain::game::GameError;
use crate::ports::GameRepository;

/// Command to delete a game.
#[derive(Debug, Clone)]
pub struct DeleteGameCommand {
    pub game_id: GameId,
    pub user_id: UserId,
}

/// Handler for deleting games.
pub struct DeleteGameHandler {
    games: Arc<dyn GameRepository>,
}

impl DeleteGameHandler {
    pub fn new(games: Arc<dyn GameRepository>) -> Self {
        Self { games }
    }

    pub async fn handle(&self, cmd: DeleteGameCommand) -> Result<(), GameError> {
        let session = self
            .games
            .find_session(&cmd.game_id)
            .await?
            .ok_or(GameError::GameNotFound(cmd.game_id))?;

        if !session.is_owner(&cmd.user_id) {
            return Err(GameError::Forbidden);
        }

        // Players, investments, liabilities, doodads, and events cascade.
        self.games.delete_game(&cmd.game_id).await?;

        tracing::info!(game_id = %cmd.game_id, "game deleted");
        Ok(())
    }
}
