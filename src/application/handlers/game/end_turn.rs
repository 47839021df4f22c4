//! EndTurnHandler - payday: apply one month of income and expenses.

use std::sync::Arc;

use crate::domain::foundation::{GameId, UserId};
use crate::domain::game::{GameError, GameEvent, GameEventKind};
use crate::ports::{CatalogRepository, GameRepository};

use super::authorize_player;

/// Command to end the current turn.
#[derive(Debug, Clone)]
pub struct EndTurnCommand {
    pub game_id: GameId,
    pub user_id: UserId,
}

/// Result of a payday.
#[derive(Debug, Clone)]
pub struct EndTurnResult {
    pub new_turn: i64,
    pub cash_received: i64,
    pub new_cash: i64,
}

/// Handler for ending turns.
pub struct EndTurnHandler {
    games: Arc<dyn GameRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

impl EndTurnHandler {
    pub fn new(games: Arc<dyn GameRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { games, catalog }
    }

    pub async fn handle(&self, cmd: EndTurnCommand) -> Result<EndTurnResult, GameError> {
        let (mut session, mut player) =
            authorize_player(self.games.as_ref(), &cmd.game_id, &cmd.user_id).await?;

        let profession = self
            .catalog
            .find_profession(player.profession_id())
            .await?
            .ok_or(GameError::ProfessionNotFound(*player.profession_id()))?;

        let mut investments = self.games.list_unsold_investments(player.id()).await?;
        let liabilities = self.games.list_unpaid_liabilities(player.id()).await?;

        let breakdown = player.payday(&profession, &mut investments, &liabilities);
        session.record_turn();

        let payload = serde_json::to_value(&breakdown)
            .map_err(|e| GameError::Infrastructure(e.to_string()))?;

        let event = GameEvent::record(
            cmd.game_id,
            *player.id(),
            GameEventKind::Payday,
            payload,
            breakdown.monthly_cash_flow,
            breakdown.monthly_cash_flow,
            breakdown.new_turn,
        );

        self.games
            .record_payday(&player, &session, &investments, &event)
            .await?;

        tracing::info!(
            game_id = %cmd.game_id,
            turn = breakdown.new_turn,
            cash_flow = breakdown.monthly_cash_flow,
            "payday applied"
        );

        Ok(EndTurnResult {
            new_turn: breakdown.new_turn,
            cash_received: breakdown.monthly_cash_flow,
            new_cash: breakdown.new_cash,
        })
    }
}
