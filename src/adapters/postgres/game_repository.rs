//! PostgreSQL implementation of GameRepository.
//!
//! Each `record_*` method runs one transaction: the aggregate writes and
//! the event-log insert commit together or roll back together.
//!
//! Player updates are compare-and-swap on the `version` column. The
//! version carried by the in-memory aggregate is the expected value; the
//! UPDATE matches on it and bumps it, and zero affected rows means a
//! concurrent writer won.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::foundation::{
    DomainError, DoodadId, ErrorCode, GameId, InvestmentId, LiabilityId, PlayerId, ProfessionId,
    PurchaseId, Timestamp, UserId,
};
use crate::domain::game::{
    GameEvent, GamePhase, GameSession, GameStatus, Player, PlayerDoodad, PlayerInvestment,
    PlayerLiability,
};
use crate::ports::GameRepository;

/// PostgreSQL implementation of GameRepository.
#[derive(Clone)]
pub struct PostgresGameRepository {
    pool: PgPool,
}

impl PostgresGameRepository {
    /// Creates a new PostgresGameRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'_, Postgres>, DomainError> {
        self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })
    }

    /// CAS write of the full player state inside a transaction.
    async fn update_player(
        tx: &mut Transaction<'_, Postgres>,
        player: &Player,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE players SET
                cash_on_hand = $2,
                savings = $3,
                num_children = $4,
                current_turn = $5,
                passive_income = $6,
                escaped_rat_race = $7,
                fast_track = $8,
                version = version + 1
            WHERE id = $1 AND version = $9
            "#,
        )
        .bind(player.id().as_uuid())
        .bind(player.cash_on_hand())
        .bind(player.savings())
        .bind(player.num_children())
        .bind(player.current_turn())
        .bind(player.passive_income())
        .bind(player.has_escaped_rat_race())
        .bind(player.is_fast_track())
        .bind(player.version())
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update player: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!("Player {} was modified concurrently", player.id()),
            ));
        }

        Ok(())
    }

    async fn insert_event(
        tx: &mut Transaction<'_, Postgres>,
        event: &GameEvent,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO game_events (
                id, game_id, player_id, kind, payload,
                cash_delta, cash_flow_delta, turn, recorded_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(event.id().as_uuid())
        .bind(event.game_id().as_uuid())
        .bind(event.player_id().as_uuid())
        .bind(event.kind().as_str())
        .bind(event.payload())
        .bind(event.cash_delta())
        .bind(event.cash_flow_delta())
        .bind(event.turn())
        .bind(event.recorded_at().as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert game event: {}", e),
            )
        })?;

        Ok(())
    }

    async fn commit(tx: Transaction<'_, Postgres>) -> Result<(), DomainError> {
        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })
    }
}

#[async_trait]
impl GameRepository for PostgresGameRepository {
    async fn find_session(&self, id: &GameId) -> Result<Option<GameSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, status, phase, total_turns, created_at, updated_at
            FROM game_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch game session: {}", e),
            )
        })?;

        row.map(row_to_session).transpose()
    }

    async fn find_player(
        &self,
        game_id: &GameId,
        user_id: &UserId,
    ) -> Result<Option<Player>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, game_id, user_id, profession_id, cash_on_hand, savings,
                   num_children, current_turn, passive_income, escaped_rat_race,
                   fast_track, version, created_at
            FROM players
            WHERE game_id = $1 AND user_id = $2
            "#,
        )
        .bind(game_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch player: {}", e),
            )
        })?;

        row.map(row_to_player).transpose()
    }

    async fn find_investment(
        &self,
        id: &InvestmentId,
        player_id: &PlayerId,
    ) -> Result<Option<PlayerInvestment>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, player_id, name, purchase_price, current_cash_flow,
                   total_income_earned, min_sale_price, max_sale_price,
                   sold, sale_price, sold_at, created_at
            FROM player_investments
            WHERE id = $1 AND player_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(player_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch investment: {}", e),
            )
        })?;

        row.map(row_to_investment).transpose()
    }

    async fn find_liability(
        &self,
        id: &LiabilityId,
        player_id: &PlayerId,
    ) -> Result<Option<PlayerLiability>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, player_id, name, principal, remaining_balance,
                   interest_rate_pct, monthly_payment, paid_off, paid_off_at,
                   created_at
            FROM player_liabilities
            WHERE id = $1 AND player_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(player_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch liability: {}", e),
            )
        })?;

        row.map(row_to_liability).transpose()
    }

    async fn list_unsold_investments(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<PlayerInvestment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, player_id, name, purchase_price, current_cash_flow,
                   total_income_earned, min_sale_price, max_sale_price,
                   sold, sale_price, sold_at, created_at
            FROM player_investments
            WHERE player_id = $1 AND sold = FALSE
            ORDER BY created_at ASC
            "#,
        )
        .bind(player_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list investments: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_investment).collect()
    }

    async fn list_unpaid_liabilities(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<PlayerLiability>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, player_id, name, principal, remaining_balance,
                   interest_rate_pct, monthly_payment, paid_off, paid_off_at,
                   created_at
            FROM player_liabilities
            WHERE player_id = $1 AND paid_off = FALSE
            ORDER BY created_at ASC
            "#,
        )
        .bind(player_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list liabilities: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_liability).collect()
    }

    async fn list_doodads(&self, player_id: &PlayerId) -> Result<Vec<PlayerDoodad>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, player_id, doodad_id, name, description, cost, purchased_at
            FROM player_doodads
            WHERE player_id = $1
            ORDER BY purchased_at ASC
            "#,
        )
        .bind(player_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list doodads: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_doodad).collect()
    }

    async fn create_game(
        &self,
        session: &GameSession,
        player: &Player,
        event: &GameEvent,
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO game_sessions (
                id, user_id, status, phase, total_turns, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.user_id().as_str())
        .bind(status_to_str(session.status()))
        .bind(phase_to_str(session.phase()))
        .bind(session.total_turns())
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert game session: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO players (
                id, game_id, user_id, profession_id, cash_on_hand, savings,
                num_children, current_turn, passive_income, escaped_rat_race,
                fast_track, version, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(player.id().as_uuid())
        .bind(player.game_id().as_uuid())
        .bind(player.user_id().as_str())
        .bind(player.profession_id().as_uuid())
        .bind(player.cash_on_hand())
        .bind(player.savings())
        .bind(player.num_children())
        .bind(player.current_turn())
        .bind(player.passive_income())
        .bind(player.has_escaped_rat_race())
        .bind(player.is_fast_track())
        .bind(player.version())
        .bind(player.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert player: {}", e),
            )
        })?;

        Self::insert_event(&mut tx, event).await?;
        Self::commit(tx).await
    }

    async fn record_doodad_purchase(
        &self,
        player: &Player,
        purchase: &PlayerDoodad,
        event: &GameEvent,
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        Self::update_player(&mut tx, player).await?;

        sqlx::query(
            r#"
            INSERT INTO player_doodads (
                id, player_id, doodad_id, name, description, cost, purchased_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(purchase.id().as_uuid())
        .bind(purchase.player_id().as_uuid())
        .bind(purchase.doodad_id().as_uuid())
        .bind(purchase.name())
        .bind(purchase.description())
        .bind(purchase.cost())
        .bind(purchase.purchased_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert doodad purchase: {}", e),
            )
        })?;

        Self::insert_event(&mut tx, event).await?;
        Self::commit(tx).await
    }

    async fn record_loan_issued(
        &self,
        player: &Player,
        liability: &PlayerLiability,
        event: &GameEvent,
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        Self::update_player(&mut tx, player).await?;

        sqlx::query(
            r#"
            INSERT INTO player_liabilities (
                id, player_id, name, principal, remaining_balance,
                interest_rate_pct, monthly_payment, paid_off, paid_off_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(liability.id().as_uuid())
        .bind(liability.player_id().as_uuid())
        .bind(liability.name())
        .bind(liability.principal())
        .bind(liability.remaining_balance())
        .bind(liability.interest_rate_pct())
        .bind(liability.monthly_payment())
        .bind(liability.is_paid_off())
        .bind(liability.paid_off_at().map(|t| *t.as_datetime()))
        .bind(liability.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert liability: {}", e),
            )
        })?;

        Self::insert_event(&mut tx, event).await?;
        Self::commit(tx).await
    }

    async fn record_loan_paid(
        &self,
        player: &Player,
        liability: &PlayerLiability,
        event: &GameEvent,
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        Self::update_player(&mut tx, player).await?;

        sqlx::query(
            r#"
            UPDATE player_liabilities SET
                remaining_balance = $2,
                paid_off = $3,
                paid_off_at = $4
            WHERE id = $1
            "#,
        )
        .bind(liability.id().as_uuid())
        .bind(liability.remaining_balance())
        .bind(liability.is_paid_off())
        .bind(liability.paid_off_at().map(|t| *t.as_datetime()))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update liability: {}", e),
            )
        })?;

        Self::insert_event(&mut tx, event).await?;
        Self::commit(tx).await
    }

    async fn record_investment_sold(
        &self,
        player: &Player,
        investment: &PlayerInvestment,
        event: &GameEvent,
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        Self::update_player(&mut tx, player).await?;

        sqlx::query(
            r#"
            UPDATE player_investments SET
                sold = $2,
                sale_price = $3,
                sold_at = $4
            WHERE id = $1
            "#,
        )
        .bind(investment.id().as_uuid())
        .bind(investment.is_sold())
        .bind(investment.sale_price())
        .bind(investment.sold_at().map(|t| *t.as_datetime()))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update investment: {}", e),
            )
        })?;

        Self::insert_event(&mut tx, event).await?;
        Self::commit(tx).await
    }

    async fn record_payday(
        &self,
        player: &Player,
        session: &GameSession,
        investments: &[PlayerInvestment],
        event: &GameEvent,
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        Self::update_player(&mut tx, player).await?;

        sqlx::query(
            r#"
            UPDATE game_sessions SET
                total_turns = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.total_turns())
        .bind(session.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update game session: {}", e),
            )
        })?;

        for investment in investments {
            sqlx::query(
                r#"
                UPDATE player_investments SET
                    total_income_earned = $2
                WHERE id = $1
                "#,
            )
            .bind(investment.id().as_uuid())
            .bind(investment.total_income_earned())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to accrue investment income: {}", e),
                )
            })?;
        }

        Self::insert_event(&mut tx, event).await?;
        Self::commit(tx).await
    }

    async fn delete_game(&self, id: &GameId) -> Result<(), DomainError> {
        // Dependent rows cascade via foreign keys.
        let result = sqlx::query("DELETE FROM game_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete game: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::GameNotFound,
                format!("Game not found: {}", id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(column).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", column, e),
        )
    })
}

fn status_to_str(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Active => "active",
        GameStatus::Completed => "completed",
    }
}

fn str_to_status(s: &str) -> Result<GameStatus, DomainError> {
    match s {
        "active" => Ok(GameStatus::Active),
        "completed" => Ok(GameStatus::Completed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid game status: {}", s),
        )),
    }
}

fn phase_to_str(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::RatRace => "rat_race",
        GamePhase::FastTrack => "fast_track",
    }
}

fn str_to_phase(s: &str) -> Result<GamePhase, DomainError> {
    match s {
        "rat_race" => Ok(GamePhase::RatRace),
        "fast_track" => Ok(GamePhase::FastTrack),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid game phase: {}", s),
        )),
    }
}

fn row_to_session(row: PgRow) -> Result<GameSession, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let user_id: String = get(&row, "user_id")?;
    let status: String = get(&row, "status")?;
    let phase: String = get(&row, "phase")?;
    let total_turns: i64 = get(&row, "total_turns")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = get(&row, "updated_at")?;

    Ok(GameSession::reconstitute(
        GameId::from_uuid(id),
        UserId::new(user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?,
        str_to_status(&status)?,
        str_to_phase(&phase)?,
        total_turns,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_player(row: PgRow) -> Result<Player, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let game_id: uuid::Uuid = get(&row, "game_id")?;
    let user_id: String = get(&row, "user_id")?;
    let profession_id: uuid::Uuid = get(&row, "profession_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;

    Ok(Player::reconstitute(
        PlayerId::from_uuid(id),
        GameId::from_uuid(game_id),
        UserId::new(user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?,
        ProfessionId::from_uuid(profession_id),
        get(&row, "cash_on_hand")?,
        get(&row, "savings")?,
        get(&row, "num_children")?,
        get(&row, "current_turn")?,
        get(&row, "passive_income")?,
        get(&row, "escaped_rat_race")?,
        get(&row, "fast_track")?,
        get(&row, "version")?,
        Timestamp::from_datetime(created_at),
    ))
}

fn row_to_investment(row: PgRow) -> Result<PlayerInvestment, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let player_id: uuid::Uuid = get(&row, "player_id")?;
    let sold_at: Option<chrono::DateTime<chrono::Utc>> = get(&row, "sold_at")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;

    Ok(PlayerInvestment::reconstitute(
        InvestmentId::from_uuid(id),
        PlayerId::from_uuid(player_id),
        get(&row, "name")?,
        get(&row, "purchase_price")?,
        get(&row, "current_cash_flow")?,
        get(&row, "total_income_earned")?,
        get(&row, "min_sale_price")?,
        get(&row, "max_sale_price")?,
        get(&row, "sold")?,
        get(&row, "sale_price")?,
        sold_at.map(Timestamp::from_datetime),
        Timestamp::from_datetime(created_at),
    ))
}

fn row_to_liability(row: PgRow) -> Result<PlayerLiability, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let player_id: uuid::Uuid = get(&row, "player_id")?;
    let paid_off_at: Option<chrono::DateTime<chrono::Utc>> = get(&row, "paid_off_at")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;

    Ok(PlayerLiability::reconstitute(
        LiabilityId::from_uuid(id),
        PlayerId::from_uuid(player_id),
        get(&row, "name")?,
        get(&row, "principal")?,
        get(&row, "remaining_balance")?,
        get(&row, "interest_rate_pct")?,
        get(&row, "monthly_payment")?,
        get(&row, "paid_off")?,
        paid_off_at.map(Timestamp::from_datetime),
        Timestamp::from_datetime(created_at),
    ))
}

fn row_to_doodad(row: PgRow) -> Result<PlayerDoodad, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let player_id: uuid::Uuid = get(&row, "player_id")?;
    let doodad_id: uuid::Uuid = get(&row, "doodad_id")?;
    let purchased_at: chrono::DateTime<chrono::Utc> = get(&row, "purchased_at")?;

    Ok(PlayerDoodad::reconstitute(
        PurchaseId::from_uuid(id),
        PlayerId::from_uuid(player_id),
        DoodadId::from_uuid(doodad_id),
        get(&row, "name")?,
        get(&row, "description")?,
        get(&row, "cost")?,
        Timestamp::from_datetime(purchased_at),
    ))
}
