//! Game repository port (write side).
//!
//! Defines the contract for persisting game state. Every `record_*` method
//! is one atomic unit: the player/aggregate mutation and its event-log row
//! commit together or not at all.
//!
//! # Concurrency
//!
//! Player writes are compare-and-swap on the player's `version` column.
//! The version the aggregate was loaded with is the expected version; a
//! stale write must fail with `ConcurrentModification` and leave the
//! database untouched.

use async_trait::async_trait;

use crate::domain::foundation::{
    DomainError, GameId, InvestmentId, LiabilityId, PlayerId, UserId,
};
use crate::domain::game::{
    GameEvent, GameSession, Player, PlayerDoodad, PlayerInvestment, PlayerLiability,
};

/// Repository port for game-state persistence.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Find a session by its ID. Returns `None` if not found.
    async fn find_session(&self, id: &GameId) -> Result<Option<GameSession>, DomainError>;

    /// Find the given user's player row in a game. Returns `None` if absent.
    async fn find_player(
        &self,
        game_id: &GameId,
        user_id: &UserId,
    ) -> Result<Option<Player>, DomainError>;

    /// Find an investment owned by the player. Returns `None` if missing
    /// or owned by someone else.
    async fn find_investment(
        &self,
        id: &InvestmentId,
        player_id: &PlayerId,
    ) -> Result<Option<PlayerInvestment>, DomainError>;

    /// Find a liability owned by the player. Returns `None` if missing or
    /// owned by someone else.
    async fn find_liability(
        &self,
        id: &LiabilityId,
        player_id: &PlayerId,
    ) -> Result<Option<PlayerLiability>, DomainError>;

    /// All unsold investments for a player, oldest first.
    async fn list_unsold_investments(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<PlayerInvestment>, DomainError>;

    /// All unpaid liabilities for a player, oldest first.
    async fn list_unpaid_liabilities(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<PlayerLiability>, DomainError>;

    /// All doodad purchases for a player, oldest first.
    async fn list_doodads(&self, player_id: &PlayerId) -> Result<Vec<PlayerDoodad>, DomainError>;

    /// Create a new game: session + seeded player + `game_started` event,
    /// atomically.
    async fn create_game(
        &self,
        session: &GameSession,
        player: &Player,
        event: &GameEvent,
    ) -> Result<(), DomainError>;

    /// Persist a doodad purchase: player cash update (CAS) + purchase row
    /// + event, atomically.
    async fn record_doodad_purchase(
        &self,
        player: &Player,
        purchase: &PlayerDoodad,
        event: &GameEvent,
    ) -> Result<(), DomainError>;

    /// Persist a loan issuance: player cash update (CAS) + liability row
    /// + event, atomically.
    async fn record_loan_issued(
        &self,
        player: &Player,
        liability: &PlayerLiability,
        event: &GameEvent,
    ) -> Result<(), DomainError>;

    /// Persist a full loan payoff: player cash update (CAS) + liability
    /// update + event, atomically.
    async fn record_loan_paid(
        &self,
        player: &Player,
        liability: &PlayerLiability,
        event: &GameEvent,
    ) -> Result<(), DomainError>;

    /// Persist an investment sale: player update (CAS) + investment update
    /// + event, atomically.
    async fn record_investment_sold(
        &self,
        player: &Player,
        investment: &PlayerInvestment,
        event: &GameEvent,
    ) -> Result<(), DomainError>;

    /// Persist a payday: player update (CAS) + session turn counter +
    /// investment income accruals + event, atomically.
    async fn record_payday(
        &self,
        player: &Player,
        session: &GameSession,
        investments: &[PlayerInvestment],
        event: &GameEvent,
    ) -> Result<(), DomainError>;

    /// Delete a game and all dependent rows (players, investments,
    /// liabilities, doodads, events).
    ///
    /// # Errors
    ///
    /// - `GameNotFound` if the session doesn't exist
    async fn delete_game(&self, id: &GameId) -> Result<(), DomainError>;
}
