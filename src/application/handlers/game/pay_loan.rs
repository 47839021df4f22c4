//! PayLoanHandler - full payoff only; no partial payments.

use std::sync::Arc;

use serde_json::json;

use crate::domain::foundation::{GameId, LiabilityId, UserId};
use crate::domain::game::{GameError, GameEvent, GameEventKind};
use crate::ports::GameRepository;

use super::authorize_player;

/// Command to pay off a loan.
#[derive(Debug, Clone)]
pub struct PayLoanCommand {
    pub game_id: GameId,
    pub user_id: UserId,
    pub liability_id: LiabilityId,
}

/// Result of a successful payoff.
#[derive(Debug, Clone)]
pub struct PayLoanResult {
    pub amount_paid: i64,
    pub monthly_payment_saved: i64,
    pub new_cash: i64,
}

/// Handler for paying off loans.
pub struct PayLoanHandler {
    games: Arc<dyn GameRepository>,
}

impl PayLoanHandler {
    pub fn new(games: Arc<dyn GameRepository>) -> Self {
        Self { games }
    }

    pub async fn handle(&self, cmd: PayLoanCommand) -> Result<PayLoanResult, GameError> {
        let (_session, mut player) =
            authorize_player(self.games.as_ref(), &cmd.game_id, &cmd.user_id).await?;

        let mut liability = self
            .games
            .find_liability(&cmd.liability_id, player.id())
            .await?
            .ok_or(GameError::LiabilityNotFound(cmd.liability_id))?;

        let payoff = player.pay_off_loan(&mut liability)?;

        // Removing the expense raises effective cash flow
        let event = GameEvent::record(
            cmd.game_id,
            *player.id(),
            GameEventKind::LoanPaid,
            json!({
                "loan_id": liability.id(),
                "amount_paid": payoff.amount_paid,
                "monthly_payment_saved": payoff.monthly_payment_saved,
            }),
            -payoff.amount_paid,
            payoff.monthly_payment_saved,
            player.current_turn(),
        );

        self.games
            .record_loan_paid(&player, &liability, &event)
            .await?;

        Ok(PayLoanResult {
            amount_paid: payoff.amount_paid,
            monthly_payment_saved: payoff.monthly_payment_saved,
            new_cash: player.cash_on_hand(),
        })
    }
}
