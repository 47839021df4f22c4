//! Game domain - the session engine's aggregates and rules.
//!
//! Everything here is pure state transition: no I/O, no clocks beyond
//! timestamping, no framework types. The five board actions (buy doodad,
//! take loan, pay loan, sell investment, payday) all flow through the
//! `Player` aggregate.

mod doodad;
mod errors;
mod events;
mod investment;
mod liability;
mod player;
mod profession;
mod session;

pub use doodad::{DoodadCard, PlayerDoodad};
pub use errors::GameError;
pub use events::{GameEvent, GameEventKind};
pub use investment::{PlayerInvestment, SaleOutcome};
pub use liability::{
    LoanPayoff, LoanTerms, PlayerLiability, LOAN_INTEREST_RATE_PCT, MAX_LOAN_AMOUNT,
    MIN_LOAN_AMOUNT,
};
pub use player::{PaydayBreakdown, Player};
pub use profession::{MonthlyExpenses, Profession};
pub use session::{GamePhase, GameSession, GameStatus};
