//! Game-specific error types.

use crate::domain::foundation::{
    DomainError, DoodadId, ErrorCode, GameId, InvestmentId, LiabilityId, ProfessionId,
};

/// Game-specific errors, mapped onto HTTP statuses by the adapter layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Game session was not found.
    GameNotFound(GameId),
    /// No player row exists for the caller in this game.
    PlayerNotFound,
    /// Profession template was not found.
    ProfessionNotFound(ProfessionId),
    /// Doodad card was not found in the catalog.
    DoodadNotFound(DoodadId),
    /// Liability missing or not owned by the player.
    LiabilityNotFound(LiabilityId),
    /// Investment missing or not owned by the player.
    InvestmentNotFound(InvestmentId),
    /// User is not the owner of the session.
    Forbidden,
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// The entity is in the wrong state for the operation.
    InvalidState(String),
    /// Cash on hand cannot cover the action.
    InsufficientFunds(String),
    /// A concurrent request modified the player first.
    Conflict,
    /// Infrastructure error.
    Infrastructure(String),
}

impl GameError {
    pub fn forbidden() -> Self {
        GameError::Forbidden
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        GameError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        GameError::InvalidState(message.into())
    }

    pub fn insufficient_funds(message: impl Into<String>) -> Self {
        GameError::InsufficientFunds(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        GameError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::GameNotFound(_) => ErrorCode::GameNotFound,
            GameError::PlayerNotFound => ErrorCode::PlayerNotFound,
            GameError::ProfessionNotFound(_) => ErrorCode::ProfessionNotFound,
            GameError::DoodadNotFound(_) => ErrorCode::DoodadNotFound,
            GameError::LiabilityNotFound(_) => ErrorCode::LiabilityNotFound,
            GameError::InvestmentNotFound(_) => ErrorCode::InvestmentNotFound,
            GameError::Forbidden => ErrorCode::Forbidden,
            GameError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            GameError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            GameError::InsufficientFunds(_) => ErrorCode::InsufficientFunds,
            GameError::Conflict => ErrorCode::ConcurrentModification,
            GameError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            GameError::GameNotFound(id) => format!("Game not found: {}", id),
            GameError::PlayerNotFound => "Player not found in this game".to_string(),
            GameError::ProfessionNotFound(id) => format!("Profession not found: {}", id),
            GameError::DoodadNotFound(id) => format!("Doodad not found: {}", id),
            GameError::LiabilityNotFound(id) => format!("Loan not found: {}", id),
            GameError::InvestmentNotFound(id) => format!("Investment not found: {}", id),
            GameError::Forbidden => "Permission denied".to_string(),
            GameError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            GameError::InvalidState(msg) => format!("Invalid state: {}", msg),
            GameError::InsufficientFunds(msg) => msg.clone(),
            GameError::Conflict => {
                "The game was modified by another request; please retry".to_string()
            }
            GameError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for GameError {}

impl From<DomainError> for GameError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => GameError::Forbidden,
            ErrorCode::InsufficientFunds => GameError::InsufficientFunds(err.message),
            ErrorCode::AlreadyPaidOff | ErrorCode::AlreadySold | ErrorCode::InvalidStateTransition => {
                GameError::InvalidState(err.message)
            }
            ErrorCode::ValidationFailed | ErrorCode::OutOfRange => GameError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::ConcurrentModification => GameError::Conflict,
            _ => GameError::Infrastructure(err.to_string()),
        }
    }
}
