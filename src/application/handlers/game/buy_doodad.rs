//! BuyDoodadHandler - one-time discretionary purchases.

use std::sync::Arc;

use serde_json::json;

use crate::domain::foundation::{DoodadId, GameId, UserId};
use crate::domain::game::{GameError, GameEvent, GameEventKind};
use crate::ports::{CatalogRepository, GameRepository};

use super::authorize_player;

/// Command to buy a doodad.
#[derive(Debug, Clone)]
pub struct BuyDoodadCommand {
    pub game_id: GameId,
    pub user_id: UserId,
    pub doodad_id: DoodadId,
}

/// Result of a successful doodad purchase.
#[derive(Debug, Clone)]
pub struct BuyDoodadResult {
    pub new_cash: i64,
}

/// Handler for buying doodads.
pub struct BuyDoodadHandler {
    games: Arc<dyn GameRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

impl BuyDoodadHandler {
    pub fn new(games: Arc<dyn GameRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { games, catalog }
    }

    pub async fn handle(&self, cmd: BuyDoodadCommand) -> Result<BuyDoodadResult, GameError> {
        let (_session, mut player) =
            authorize_player(self.games.as_ref(), &cmd.game_id, &cmd.user_id).await?;

        let card = self
            .catalog
            .find_doodad(&cmd.doodad_id)
            .await?
            .ok_or(GameError::DoodadNotFound(cmd.doodad_id))?;

        let purchase = player.buy_doodad(&card)?;

        let event = GameEvent::record(
            cmd.game_id,
            *player.id(),
            GameEventKind::DoodadPurchased,
            json!({
                "doodad_id": card.id(),
                "name": card.name(),
                "cost": card.cost(),
            }),
            -card.cost(),
            0,
            player.current_turn(),
        );

        self.games
            .record_doodad_purchase(&player, &purchase, &event)
            .await?;

        Ok(BuyDoodadResult {
            new_cash: player.cash_on_hand(),
        })
    }
}
