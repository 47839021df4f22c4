//! Command and query handlers for the game session engine.
//!
//! Every mutating handler follows the same sequence:
//! authorize → load → validate → mutate → log, with the mutate+log pair
//! committed atomically by the repository.

mod buy_doodad;
mod delete_game;
mod end_turn;
mod get_game_state;
mod list_professions;
mod pay_loan;
mod sell_investment;
mod start_game;
mod take_loan;

pub use buy_doodad::{BuyDoodadCommand, BuyDoodadHandler, BuyDoodadResult};
pub use delete_game::{DeleteGameCommand, DeleteGameHandler};
pub use end_turn::{EndTurnCommand, EndTurnHandler, EndTurnResult};
pub use get_game_state::{GameStateView, GetGameStateHandler, GetGameStateQuery};
pub use list_professions::ListProfessionsHandler;
pub use pay_loan::{PayLoanCommand, PayLoanHandler, PayLoanResult};
pub use sell_investment::{SellInvestmentCommand, SellInvestmentHandler, SellInvestmentResult};
pub use start_game::{StartGameCommand, StartGameHandler, StartGameResult};
pub use take_loan::{TakeLoanCommand, TakeLoanHandler, TakeLoanResult};

use crate::domain::foundation::{GameId, UserId};
use crate::domain::game::{GameError, GameSession, Player};
use crate::ports::GameRepository;

/// Resolve the session and the caller's player row, enforcing ownership.
///
/// The shared authorization step for every per-game operation.
pub(crate) async fn authorize_player(
    games: &dyn GameRepository,
    game_id: &GameId,
    user_id: &UserId,
) -> Result<(GameSession, Player), GameError> {
    let session = games
        .find_session(game_id)
        .await?
        .ok_or(GameError::GameNotFound(*game_id))?;

    if !session.is_owner(user_id) {
        return Err(GameError::Forbidden);
    }

    let player = games
        .find_player(game_id, user_id)
        .await?
        .ok_or(GameError::PlayerNotFound)?;

    Ok((session, player))
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory fakes shared by the handler tests.

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::foundation::{
        DomainError, DoodadId, ErrorCode, GameId, InvestmentId, LiabilityId, PlayerId,
        ProfessionId, Timestamp, UserId,
    };
    use crate::domain::game::{
        DoodadCard, GameEvent, GameSession, MonthlyExpenses, Player, PlayerDoodad,
        PlayerInvestment, PlayerLiability, Profession,
    };
    use crate::ports::{CatalogRepository, GameRepository};

    pub fn test_user_id() -> UserId {
        UserId::new("test-user-123").unwrap()
    }

    pub fn other_user_id() -> UserId {
        UserId::new("intruder-456").unwrap()
    }

    pub fn test_expenses() -> MonthlyExpenses {
        MonthlyExpenses {
            taxes: 800,
            mortgage: 700,
            school_loan: 300,
            car_loan: 200,
            credit_card: 200,
            retail: 100,
            other: 200,
            per_child: 150,
        }
    }

    pub fn test_profession() -> Profession {
        Profession::new(
            ProfessionId::new(),
            "Engineer".to_string(),
            3000,
            1000,
            400,
            test_expenses(),
        )
    }

    pub fn test_doodad_card(cost: i64) -> DoodadCard {
        DoodadCard::new(
            DoodadId::new(),
            "Boat".to_string(),
            "A very nice boat".to_string(),
            cost,
        )
    }

    pub fn test_investment(player_id: PlayerId, cash_flow: i64) -> PlayerInvestment {
        PlayerInvestment::reconstitute(
            InvestmentId::new(),
            player_id,
            "Duplex".to_string(),
            5_000,
            cash_flow,
            0,
            None,
            Some(20_000),
            false,
            None,
            None,
            Timestamp::now(),
        )
    }

    /// In-memory game repository with CAS semantics on the player version.
    #[derive(Default)]
    pub struct MockGameRepository {
        pub sessions: Mutex<Vec<GameSession>>,
        pub players: Mutex<Vec<Player>>,
        pub investments: Mutex<Vec<PlayerInvestment>>,
        pub liabilities: Mutex<Vec<PlayerLiability>>,
        pub doodads: Mutex<Vec<PlayerDoodad>>,
        pub events: Mutex<Vec<GameEvent>>,
        pub fail_writes: bool,
        pub conflict_on_write: bool,
    }

    impl MockGameRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }

        pub fn conflicting() -> Self {
            Self {
                conflict_on_write: true,
                ..Self::default()
            }
        }

        pub fn with_game(self, session: GameSession, player: Player) -> Self {
            self.sessions.lock().unwrap().push(session);
            self.players.lock().unwrap().push(player);
            self
        }

        pub fn with_liability(self, liability: PlayerLiability) -> Self {
            self.liabilities.lock().unwrap().push(liability);
            self
        }

        pub fn with_investment(self, investment: PlayerInvestment) -> Self {
            self.investments.lock().unwrap().push(investment);
            self
        }

        pub fn events(&self) -> Vec<GameEvent> {
            self.events.lock().unwrap().clone()
        }

        pub fn stored_player(&self, id: &PlayerId) -> Option<Player> {
            self.players.lock().unwrap().iter().find(|p| p.id() == id).cloned()
        }

        fn check_write(&self) -> Result<(), DomainError> {
            if self.fail_writes {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated write failure",
                ));
            }
            if self.conflict_on_write {
                return Err(DomainError::new(
                    ErrorCode::ConcurrentModification,
                    "Simulated stale version",
                ));
            }
            Ok(())
        }

        fn swap_player(&self, player: &Player) -> Result<(), DomainError> {
            let mut players = self.players.lock().unwrap();
            let stored = players
                .iter_mut()
                .find(|p| p.id() == player.id())
                .ok_or_else(|| {
                    DomainError::new(ErrorCode::PlayerNotFound, "Player not found")
                })?;
            if stored.version() != player.version() {
                return Err(DomainError::new(
                    ErrorCode::ConcurrentModification,
                    "Stale player version",
                ));
            }
            *stored = player.clone();
            Ok(())
        }
    }

    #[async_trait]
    impl GameRepository for MockGameRepository {
        async fn find_session(&self, id: &GameId) -> Result<Option<GameSession>, DomainError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id() == id)
                .cloned())
        }

        async fn find_player(
            &self,
            game_id: &GameId,
            user_id: &UserId,
        ) -> Result<Option<Player>, DomainError> {
            Ok(self
                .players
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.game_id() == game_id && p.user_id() == user_id)
                .cloned())
        }

        async fn find_investment(
            &self,
            id: &InvestmentId,
            player_id: &PlayerId,
        ) -> Result<Option<PlayerInvestment>, DomainError> {
            Ok(self
                .investments
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id() == id && i.player_id() == player_id)
                .cloned())
        }

        async fn find_liability(
            &self,
            id: &LiabilityId,
            player_id: &PlayerId,
        ) -> Result<Option<PlayerLiability>, DomainError> {
            Ok(self
                .liabilities
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.id() == id && l.player_id() == player_id)
                .cloned())
        }

        async fn list_unsold_investments(
            &self,
            player_id: &PlayerId,
        ) -> Result<Vec<PlayerInvestment>, DomainError> {
            Ok(self
                .investments
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.player_id() == player_id && !i.is_sold())
                .cloned()
                .collect())
        }

        async fn list_unpaid_liabilities(
            &self,
            player_id: &PlayerId,
        ) -> Result<Vec<PlayerLiability>, DomainError> {
            Ok(self
                .liabilities
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.player_id() == player_id && !l.is_paid_off())
                .cloned()
                .collect())
        }

        async fn list_doodads(
            &self,
            player_id: &PlayerId,
        ) -> Result<Vec<PlayerDoodad>, DomainError> {
            Ok(self
                .doodads
                .lock()
                .unwrap()
                .iter()
                .filter(|d| d.player_id() == player_id)
                .cloned()
                .collect())
        }

        async fn create_game(
            &self,
            session: &GameSession,
            player: &Player,
            event: &GameEvent,
        ) -> Result<(), DomainError> {
            self.check_write()?;
            self.sessions.lock().unwrap().push(session.clone());
            self.players.lock().unwrap().push(player.clone());
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn record_doodad_purchase(
            &self,
            player: &Player,
            purchase: &PlayerDoodad,
            event: &GameEvent,
        ) -> Result<(), DomainError> {
            self.check_write()?;
            self.swap_player(player)?;
            self.doodads.lock().unwrap().push(purchase.clone());
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn record_loan_issued(
            &self,
            player: &Player,
            liability: &PlayerLiability,
            event: &GameEvent,
        ) -> Result<(), DomainError> {
            self.check_write()?;
            self.swap_player(player)?;
            self.liabilities.lock().unwrap().push(liability.clone());
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn record_loan_paid(
            &self,
            player: &Player,
            liability: &PlayerLiability,
            event: &GameEvent,
        ) -> Result<(), DomainError> {
            self.check_write()?;
            self.swap_player(player)?;
            let mut liabilities = self.liabilities.lock().unwrap();
            if let Some(stored) = liabilities.iter_mut().find(|l| l.id() == liability.id()) {
                *stored = liability.clone();
            }
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn record_investment_sold(
            &self,
            player: &Player,
            investment: &PlayerInvestment,
            event: &GameEvent,
        ) -> Result<(), DomainError> {
            self.check_write()?;
            self.swap_player(player)?;
            let mut investments = self.investments.lock().unwrap();
            if let Some(stored) = investments.iter_mut().find(|i| i.id() == investment.id()) {
                *stored = investment.clone();
            }
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn record_payday(
            &self,
            player: &Player,
            session: &GameSession,
            investments: &[PlayerInvestment],
            event: &GameEvent,
        ) -> Result<(), DomainError> {
            self.check_write()?;
            self.swap_player(player)?;
            let mut sessions = self.sessions.lock().unwrap();
            if let Some(stored) = sessions.iter_mut().find(|s| s.id() == session.id()) {
                *stored = session.clone();
            }
            let mut stored_investments = self.investments.lock().unwrap();
            for investment in investments {
                if let Some(stored) = stored_investments
                    .iter_mut()
                    .find(|i| i.id() == investment.id())
                {
                    *stored = investment.clone();
                }
            }
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn delete_game(&self, id: &GameId) -> Result<(), DomainError> {
            self.check_write()?;
            let mut sessions = self.sessions.lock().unwrap();
            let before = sessions.len();
            sessions.retain(|s| s.id() != id);
            if sessions.len() == before {
                return Err(DomainError::new(ErrorCode::GameNotFound, "Game not found"));
            }

            let player_ids: Vec<PlayerId> = {
                let mut players = self.players.lock().unwrap();
                let ids = players
                    .iter()
                    .filter(|p| p.game_id() == id)
                    .map(|p| *p.id())
                    .collect();
                players.retain(|p| p.game_id() != id);
                ids
            };
            self.investments
                .lock()
                .unwrap()
                .retain(|i| !player_ids.contains(i.player_id()));
            self.liabilities
                .lock()
                .unwrap()
                .retain(|l| !player_ids.contains(l.player_id()));
            self.doodads
                .lock()
                .unwrap()
                .retain(|d| !player_ids.contains(d.player_id()));
            self.events.lock().unwrap().retain(|e| e.game_id() != id);
            Ok(())
        }
    }

    /// In-memory catalog of professions and doodad cards.
    #[derive(Default)]
    pub struct MockCatalog {
        pub professions: Vec<Profession>,
        pub doodads: Vec<DoodadCard>,
    }

    impl MockCatalog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_profession(mut self, profession: Profession) -> Self {
            self.professions.push(profession);
            self
        }

        pub fn with_doodad(mut self, card: DoodadCard) -> Self {
            self.doodads.push(card);
            self
        }
    }

    #[async_trait]
    impl CatalogRepository for MockCatalog {
        async fn find_profession(
            &self,
            id: &ProfessionId,
        ) -> Result<Option<Profession>, DomainError> {
            Ok(self.professions.iter().find(|p| p.id() == id).cloned())
        }

        async fn list_professions(&self) -> Result<Vec<Profession>, DomainError> {
            Ok(self.professions.clone())
        }

        async fn find_doodad(&self, id: &DoodadId) -> Result<Option<DoodadCard>, DomainError> {
            Ok(self.doodads.iter().find(|d| d.id() == id).cloned())
        }
    }
}
