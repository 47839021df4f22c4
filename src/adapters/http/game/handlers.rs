//! HTTP handlers for game endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::game::{
    BuyDoodadCommand, BuyDoodadHandler, DeleteGameCommand, DeleteGameHandler, EndTurnCommand,
    EndTurnHandler, GetGameStateHandler, GetGameStateQuery, ListProfessionsHandler, PayLoanCommand,
    PayLoanHandler, SellInvestmentCommand, SellInvestmentHandler, StartGameCommand,
    StartGameHandler, TakeLoanCommand, TakeLoanHandler,
};
use crate::domain::foundation::{DoodadId, GameId, InvestmentId, LiabilityId, ProfessionId};
use crate::domain::game::GameError;

use super::dto::{
    BuyDoodadRequest, BuyDoodadResponse, CatalogProfessionResponse, EndTurnResponse, ErrorResponse,
    GameStateResponse, PayLoanRequest, PayLoanResponse, SellInvestmentRequest,
    SellInvestmentResponse, StartGameRequest, StartGameResponse, TakeLoanRequest, TakeLoanResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct GameHandlers {
    start_handler: Arc<StartGameHandler>,
    get_state_handler: Arc<GetGameStateHandler>,
    delete_handler: Arc<DeleteGameHandler>,
    buy_doodad_handler: Arc<BuyDoodadHandler>,
    take_loan_handler: Arc<TakeLoanHandler>,
    pay_loan_handler: Arc<PayLoanHandler>,
    sell_investment_handler: Arc<SellInvestmentHandler>,
    end_turn_handler: Arc<EndTurnHandler>,
    list_professions_handler: Arc<ListProfessionsHandler>,
}

impl GameHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_handler: Arc<StartGameHandler>,
        get_state_handler: Arc<GetGameStateHandler>,
        delete_handler: Arc<DeleteGameHandler>,
        buy_doodad_handler: Arc<BuyDoodadHandler>,
        take_loan_handler: Arc<TakeLoanHandler>,
        pay_loan_handler: Arc<PayLoanHandler>,
        sell_investment_handler: Arc<SellInvestmentHandler>,
        end_turn_handler: Arc<EndTurnHandler>,
        list_professions_handler: Arc<ListProfessionsHandler>,
    ) -> Self {
        Self {
            start_handler,
            get_state_handler,
            delete_handler,
            buy_doodad_handler,
            take_loan_handler,
            pay_loan_handler,
            sell_investment_handler,
            end_turn_handler,
            list_professions_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/games - Start a new game
pub async fn start_game(
    State(handlers): State<GameHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<StartGameRequest>,
) -> Response {
    let profession_id = match req.profession_id.parse::<ProfessionId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("profession ID"),
    };

    let cmd = StartGameCommand {
        user_id: user.id,
        profession_id,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response = StartGameResponse {
                game_id: result.game_id.to_string(),
                player_id: result.player_id.to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_game_error(e),
    }
}

/// GET /api/games/:id - Full game state
pub async fn get_game_state(
    State(handlers): State<GameHandlers>,
    RequireAuth(user): RequireAuth,
    Path(game_id): Path<String>,
) -> Response {
    let game_id = match game_id.parse::<GameId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("game ID"),
    };

    let query = GetGameStateQuery {
        game_id,
        user_id: user.id,
    };

    match handlers.get_state_handler.handle(query).await {
        Ok(view) => {
            let response: GameStateResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_game_error(e),
    }
}

/// DELETE /api/games/:id - Delete a game and all its data
pub async fn delete_game(
    State(handlers): State<GameHandlers>,
    RequireAuth(user): RequireAuth,
    Path(game_id): Path<String>,
) -> Response {
    let game_id = match game_id.parse::<GameId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("game ID"),
    };

    let cmd = DeleteGameCommand {
        game_id,
        user_id: user.id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_game_error(e),
    }
}

/// POST /api/games/:id/doodad - Buy a doodad
pub async fn buy_doodad(
    State(handlers): State<GameHandlers>,
    RequireAuth(user): RequireAuth,
    Path(game_id): Path<String>,
    Json(req): Json<BuyDoodadRequest>,
) -> Response {
    let game_id = match game_id.parse::<GameId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("game ID"),
    };
    let doodad_id = match req.doodad_id.parse::<DoodadId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("doodad ID"),
    };

    let cmd = BuyDoodadCommand {
        game_id,
        user_id: user.id,
        doodad_id,
    };

    match handlers.buy_doodad_handler.handle(cmd).await {
        Ok(result) => {
            let response = BuyDoodadResponse {
                new_cash: result.new_cash,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_game_error(e),
    }
}

/// POST /api/games/:id/loan - Take a bank loan
pub async fn take_loan(
    State(handlers): State<GameHandlers>,
    RequireAuth(user): RequireAuth,
    Path(game_id): Path<String>,
    Json(req): Json<TakeLoanRequest>,
) -> Response {
    let game_id = match game_id.parse::<GameId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("game ID"),
    };

    let cmd = TakeLoanCommand {
        game_id,
        user_id: user.id,
        amount: req.amount,
    };

    match handlers.take_loan_handler.handle(cmd).await {
        Ok(result) => {
            let response = TakeLoanResponse {
                loan_id: result.loan_id.to_string(),
                monthly_payment: result.monthly_payment,
                new_cash: result.new_cash,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_game_error(e),
    }
}

/// POST /api/games/:id/loan/pay - Pay off a loan in full
pub async fn pay_loan(
    State(handlers): State<GameHandlers>,
    RequireAuth(user): RequireAuth,
    Path(game_id): Path<String>,
    Json(req): Json<PayLoanRequest>,
) -> Response {
    let game_id = match game_id.parse::<GameId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("game ID"),
    };
    let liability_id = match req.liability_id.parse::<LiabilityId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("loan ID"),
    };

    let cmd = PayLoanCommand {
        game_id,
        user_id: user.id,
        liability_id,
    };

    match handlers.pay_loan_handler.handle(cmd).await {
        Ok(result) => {
            let response = PayLoanResponse {
                amount_paid: result.amount_paid,
                monthly_payment_saved: result.monthly_payment_saved,
                new_cash: result.new_cash,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_game_error(e),
    }
}

/// POST /api/games/:id/sell - Sell an investment
pub async fn sell_investment(
    State(handlers): State<GameHandlers>,
    RequireAuth(user): RequireAuth,
    Path(game_id): Path<String>,
    Json(req): Json<SellInvestmentRequest>,
) -> Response {
    let game_id = match game_id.parse::<GameId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("game ID"),
    };
    let investment_id = match req.investment_id.parse::<InvestmentId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("investment ID"),
    };

    let cmd = SellInvestmentCommand {
        game_id,
        user_id: user.id,
        investment_id,
        sale_price: req.sale_price,
    };

    match handlers.sell_investment_handler.handle(cmd).await {
        Ok(result) => {
            let response = SellInvestmentResponse {
                sale_price: result.sale_price,
                capital_gain: result.capital_gain,
                total_return: result.total_return,
                new_cash: result.new_cash,
                new_passive_income: result.new_passive_income,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_game_error(e),
    }
}

/// POST /api/games/:id/end-turn - Apply payday and advance the turn
pub async fn end_turn(
    State(handlers): State<GameHandlers>,
    RequireAuth(user): RequireAuth,
    Path(game_id): Path<String>,
) -> Response {
    let game_id = match game_id.parse::<GameId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("game ID"),
    };

    let cmd = EndTurnCommand {
        game_id,
        user_id: user.id,
    };

    match handlers.end_turn_handler.handle(cmd).await {
        Ok(result) => {
            let response = EndTurnResponse {
                new_turn: result.new_turn,
                cash_received: result.cash_received,
                new_cash: result.new_cash,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_game_error(e),
    }
}

/// GET /api/professions - Profession catalog for the new-game screen
pub async fn list_professions(
    State(handlers): State<GameHandlers>,
    RequireAuth(_user): RequireAuth,
) -> Response {
    match handlers.list_professions_handler.handle().await {
        Ok(professions) => {
            let response: Vec<CatalogProfessionResponse> =
                professions.iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_game_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn invalid_id(what: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(format!("Invalid {}", what))),
    )
        .into_response()
}

fn handle_game_error(error: GameError) -> Response {
    match error {
        GameError::GameNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Game", &id.to_string())),
        )
            .into_response(),
        GameError::PlayerNotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Player", "this game")),
        )
            .into_response(),
        GameError::ProfessionNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Profession", &id.to_string())),
        )
            .into_response(),
        GameError::DoodadNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Doodad", &id.to_string())),
        )
            .into_response(),
        GameError::LiabilityNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Loan", &id.to_string())),
        )
            .into_response(),
        GameError::InvestmentNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Investment", &id.to_string())),
        )
            .into_response(),
        GameError::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden("Permission denied")),
        )
            .into_response(),
        GameError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        GameError::InvalidState(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(msg)),
        )
            .into_response(),
        GameError::InsufficientFunds(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(msg)),
        )
            .into_response(),
        GameError::Conflict => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(
                "The game was modified by another request; retry",
            )),
        )
            .into_response(),
        GameError::Infrastructure(msg) => {
            tracing::error!("Infrastructure error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}
