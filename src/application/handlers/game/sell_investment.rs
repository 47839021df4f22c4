//! SellInvestmentHandler - liquidates an asset at a player-chosen price.

use std::sync::Arc;

use serde_json::json;

use crate::domain::foundation::{GameId, InvestmentId, UserId};
use crate::domain::game::{GameError, GameEvent, GameEventKind};
use crate::ports::GameRepository;

use super::authorize_player;

/// Command to sell an investment.
#[derive(Debug, Clone)]
pub struct SellInvestmentCommand {
    pub game_id: GameId,
    pub user_id: UserId,
    pub investment_id: InvestmentId,
    pub sale_price: i64,
}

/// Result of a successful sale.
#[derive(Debug, Clone)]
pub struct SellInvestmentResult {
    pub sale_price: i64,
    pub capital_gain: i64,
    pub total_return: i64,
    pub new_cash: i64,
    pub new_passive_income: i64,
}

/// Handler for selling investments.
pub struct SellInvestmentHandler {
    games: Arc<dyn GameRepository>,
}

impl SellInvestmentHandler {
    pub fn new(games: Arc<dyn GameRepository>) -> Self {
        Self { games }
    }

    pub async fn handle(
        &self,
        cmd: SellInvestmentCommand,
    ) -> Result<SellInvestmentResult, GameError> {
        let (_session, mut player) =
            authorize_player(self.games.as_ref(), &cmd.game_id, &cmd.user_id).await?;

        let mut investment = self
            .games
            .find_investment(&cmd.investment_id, player.id())
            .await?
            .ok_or(GameError::InvestmentNotFound(cmd.investment_id))?;

        let outcome = player.sell_investment(&mut investment, cmd.sale_price)?;

        let event = GameEvent::record(
            cmd.game_id,
            *player.id(),
            GameEventKind::InvestmentSold,
            json!({
                "investment_id": investment.id(),
                "name": investment.name(),
                "sale_price": outcome.sale_price,
                "capital_gain": outcome.capital_gain,
                "total_return": outcome.total_return,
            }),
            outcome.sale_price,
            -outcome.cash_flow_removed,
            player.current_turn(),
        );

        self.games
            .record_investment_sold(&player, &investment, &event)
            .await?;

        Ok(SellInvestmentResult {
            sale_price: outcome.sale_price,
            capital_gain: outcome.capital_gain,
            total_return: outcome.total_return,
            new_cash: player.cash_on_hand(),
            new_passive_income: player.passive_income(),
        })
    }
}
