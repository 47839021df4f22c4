//! Game session aggregate.
//!
//! A session is the top-level container for one playthrough. It tracks
//! whose game it is, which phase the board is in, and how many turns have
//! elapsed across all players.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{GameId, Timestamp, UserId};

/// Lifecycle status of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Completed,
}

/// Board phase: grinding through the rat race, or on the fast track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    RatRace,
    FastTrack,
}

/// Game session aggregate.
///
/// # Invariants
///
/// - `total_turns` never decreases
/// - created with `Active` status and `RatRace` phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    id: GameId,
    user_id: UserId,
    status: GameStatus,
    phase: GamePhase,
    total_turns: i64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl GameSession {
    /// Create a new active session in the rat-race phase.
    pub fn new(id: GameId, user_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            status: GameStatus::Active,
            phase: GamePhase::RatRace,
            total_turns: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation, no events).
    pub fn reconstitute(
        id: GameId,
        user_id: UserId,
        status: GameStatus,
        phase: GamePhase,
        total_turns: i64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            status,
            phase,
            total_turns,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &GameId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn total_turns(&self) -> i64 {
        self.total_turns
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Checks if the given user owns this session.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Records one completed turn and refreshes the activity timestamp.
    pub fn record_turn(&mut self) {
        self.total_turns += 1;
        self.updated_at = Timestamp::now();
    }
}
