//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (writes) and query handlers (reads) live side by side,
//! one handler per game operation.

pub mod handlers;

pub use handlers::game::{
    BuyDoodadCommand, BuyDoodadHandler, BuyDoodadResult,
    DeleteGameCommand, DeleteGameHandler,
    EndTurnCommand, EndTurnHandler, EndTurnResult,
    GameStateView, GetGameStateHandler, GetGameStateQuery,
    ListProfessionsHandler,
    PayLoanCommand, PayLoanHandler, PayLoanResult,
    SellInvestmentCommand, SellInvestmentHandler, SellInvestmentResult,
    StartGameCommand, StartGameHandler, StartGameResult,
    TakeLoanCommand, TakeLoanHandler, TakeLoanResult,
};
