//! HTTP adapter for game endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    BuyDoodadRequest, BuyDoodadResponse, CatalogProfessionResponse, DoodadPurchaseResponse,
    EndTurnResponse, ErrorResponse, GameStateResponse, InvestmentResponse, LiabilityResponse,
    PayLoanRequest, PayLoanResponse, PlayerResponse, ProfessionResponse, SellInvestmentRequest,
    SellInvestmentResponse, StartGameRequest, StartGameResponse, TakeLoanRequest,
    TakeLoanResponse,
};
pub use handlers::GameHandlers;
pub use routes::{catalog_routes, game_routes};
