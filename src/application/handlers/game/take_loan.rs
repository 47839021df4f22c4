//! TakeLoanHandler - bank loans at a fixed 10% annual rate.

use std::sync::Arc;

use serde_json::json;

use crate::domain::foundation::{GameId, LiabilityId, UserId};
use crate::domain::game::{GameError, GameEvent, GameEventKind, LoanTerms, PlayerLiability};
use crate::ports::GameRepository;

use super::authorize_player;

/// Command to take a loan.
#[derive(Debug, Clone)]
pub struct TakeLoanCommand {
    pub game_id: GameId,
    pub user_id: UserId,
    pub amount: i64,
}

/// Result of a successful loan issuance.
#[derive(Debug, Clone)]
pub struct TakeLoanResult {
    pub loan_id: LiabilityId,
    pub monthly_payment: i64,
    pub new_cash: i64,
}

/// Handler for taking loans.
pub struct TakeLoanHandler {
    games: Arc<dyn GameRepository>,
}

impl TakeLoanHandler {
    pub fn new(games: Arc<dyn GameRepository>) -> Self {
        Self { games }
    }

    pub async fn handle(&self, cmd: TakeLoanCommand) -> Result<TakeLoanResult, GameError> {
        let (_session, mut player) =
            authorize_player(self.games.as_ref(), &cmd.game_id, &cmd.user_id).await?;

        let terms = LoanTerms::quote(cmd.amount)?;

        player.receive_loan(&terms);
        let liability = PlayerLiability::issue(LiabilityId::new(), *player.id(), terms);

        let event = GameEvent::record(
            cmd.game_id,
            *player.id(),
            GameEventKind::LoanTaken,
            json!({
                "loan_id": liability.id(),
                "amount": terms.principal,
                "annual_interest": terms.annual_interest,
                "monthly_payment": terms.monthly_payment,
            }),
            terms.principal,
            -terms.monthly_payment,
            player.current_turn(),
        );

        self.games
            .record_loan_issued(&player, &liability, &event)
            .await?;

        Ok(TakeLoanResult {
            loan_id: *liability.id(),
            monthly_payment: terms.monthly_payment,
            new_cash: player.cash_on_hand(),
        })
    }
}
