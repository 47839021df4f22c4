//! The append-only game event ledger.
//!
//! Every mutating action writes exactly one event, in the same database
//! transaction as the mutation, so the ledger can never diverge from
//! state. Events are never updated or deleted.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, GameId, PlayerId, Timestamp};

/// The kind of state change an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEventKind {
    GameStarted,
    DoodadPurchased,
    LoanTaken,
    LoanPaid,
    InvestmentSold,
    Payday,
}

impl GameEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEventKind::GameStarted => "game_started",
            GameEventKind::DoodadPurchased => "doodad_purchased",
            GameEventKind::LoanTaken => "loan_taken",
            GameEventKind::LoanPaid => "loan_paid",
            GameEventKind::InvestmentSold => "investment_sold",
            GameEventKind::Payday => "payday",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "game_started" => Some(GameEventKind::GameStarted),
            "doodad_purchased" => Some(GameEventKind::DoodadPurchased),
            "loan_taken" => Some(GameEventKind::LoanTaken),
            "loan_paid" => Some(GameEventKind::LoanPaid),
            "investment_sold" => Some(GameEventKind::InvestmentSold),
            "payday" => Some(GameEventKind::Payday),
            _ => None,
        }
    }
}

/// One row in the audit ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    id: EventId,
    game_id: GameId,
    player_id: PlayerId,
    kind: GameEventKind,
    payload: serde_json::Value,
    cash_delta: i64,
    cash_flow_delta: i64,
    turn: i64,
    recorded_at: Timestamp,
}

impl GameEvent {
    /// Record a new event at the player's current turn.
    pub fn record(
        game_id: GameId,
        player_id: PlayerId,
        kind: GameEventKind,
        payload: serde_json::Value,
        cash_delta: i64,
        cash_flow_delta: i64,
        turn: i64,
    ) -> Self {
        Self {
            id: EventId::new(),
            game_id,
            player_id,
            kind,
            payload,
            cash_delta,
            cash_flow_delta,
            turn,
            recorded_at: Timestamp::now(),
        }
    }

    /// Reconstitute an event from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: EventId,
        game_id: GameId,
        player_id: PlayerId,
        kind: GameEventKind,
        payload: serde_json::Value,
        cash_delta: i64,
        cash_flow_delta: i64,
        turn: i64,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            id,
            game_id,
            player_id,
            kind,
            payload,
            cash_delta,
            cash_flow_delta,
            turn,
            recorded_at,
        }
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn kind(&self) -> GameEventKind {
        self.kind
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    pub fn cash_delta(&self) -> i64 {
        self.cash_delta
    }

    pub fn cash_flow_delta(&self) -> i64 {
        self.cash_flow_delta
    }

    pub fn turn(&self) -> i64 {
        self.turn
    }

    pub fn recorded_at(&self) -> &Timestamp {
        &self.recorded_at
    }
}
