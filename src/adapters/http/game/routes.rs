//! HTTP routes for game endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    buy_doodad, delete_game, end_turn, get_game_state, list_professions, pay_loan,
    sell_investment, start_game, take_loan, GameHandlers,
};

/// Creates the game router with all endpoints.
pub fn game_routes(handlers: GameHandlers) -> Router {
    Router::new()
        .route("/", post(start_game))
        .route("/:id", get(get_game_state))
        .route("/:id", delete(delete_game))
        .route("/:id/doodad", post(buy_doodad))
        .route("/:id/loan", post(take_loan))
        .route("/:id/loan/pay", post(pay_loan))
        .route("/:id/sell", post(sell_investment))
        .route("/:id/end-turn", post(end_turn))
        .with_state(handlers)
}

/// Creates the catalog router (read-only reference data).
pub fn catalog_routes(handlers: GameHandlers) -> Router {
    Router::new()
        .route("/professions", get(list_professions))
        .with_state(handlers)
}
