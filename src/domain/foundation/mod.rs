//! Foundation module - shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the game domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    DoodadId, EventId, GameId, InvestmentId, LiabilityId, PlayerId, ProfessionId, PurchaseId,
    UserId,
};
pub use timestamp::Timestamp;
