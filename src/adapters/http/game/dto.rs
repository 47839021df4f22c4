//! HTTP DTOs for game endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::game::GameStateView;
use crate::domain::game::{
    GamePhase, GameStatus, Player, PlayerDoodad, PlayerInvestment, PlayerLiability, Profession,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a new game.
#[derive(Debug, Clone, Deserialize)]
pub struct StartGameRequest {
    pub profession_id: String,
}

/// Request to buy a doodad.
#[derive(Debug, Clone, Deserialize)]
pub struct BuyDoodadRequest {
    pub doodad_id: String,
}

/// Request to take a loan.
#[derive(Debug, Clone, Deserialize)]
pub struct TakeLoanRequest {
    pub amount: i64,
}

/// Request to pay off a loan.
#[derive(Debug, Clone, Deserialize)]
pub struct PayLoanRequest {
    pub liability_id: String,
}

/// Request to sell an investment.
#[derive(Debug, Clone, Deserialize)]
pub struct SellInvestmentRequest {
    pub investment_id: String,
    pub sale_price: i64,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response after starting a game.
#[derive(Debug, Clone, Serialize)]
pub struct StartGameResponse {
    pub game_id: String,
    pub player_id: String,
}

/// Response after buying a doodad.
#[derive(Debug, Clone, Serialize)]
pub struct BuyDoodadResponse {
    pub new_cash: i64,
}

/// Response after taking a loan.
#[derive(Debug, Clone, Serialize)]
pub struct TakeLoanResponse {
    pub loan_id: String,
    pub monthly_payment: i64,
    pub new_cash: i64,
}

/// Response after paying off a loan.
#[derive(Debug, Clone, Serialize)]
pub struct PayLoanResponse {
    pub amount_paid: i64,
    pub monthly_payment_saved: i64,
    pub new_cash: i64,
}

/// Response after selling an investment.
#[derive(Debug, Clone, Serialize)]
pub struct SellInvestmentResponse {
    pub sale_price: i64,
    pub capital_gain: i64,
    pub total_return: i64,
    pub new_cash: i64,
    pub new_passive_income: i64,
}

/// Response after a payday.
#[derive(Debug, Clone, Serialize)]
pub struct EndTurnResponse {
    pub new_turn: i64,
    pub cash_received: i64,
    pub new_cash: i64,
}

/// The full board state for one game.
#[derive(Debug, Clone, Serialize)]
pub struct GameStateResponse {
    pub id: String,
    pub status: GameStatus,
    pub phase: GamePhase,
    pub total_turns: i64,
    pub created_at: String,
    pub updated_at: String,
    pub player: PlayerResponse,
    pub profession: ProfessionResponse,
    pub investments: Vec<InvestmentResponse>,
    pub liabilities: Vec<LiabilityResponse>,
    pub doodads: Vec<DoodadPurchaseResponse>,
}

impl From<GameStateView> for GameStateResponse {
    fn from(view: GameStateView) -> Self {
        Self {
            id: view.session.id().to_string(),
            status: view.session.status(),
            phase: view.session.phase(),
            total_turns: view.session.total_turns(),
            created_at: view.session.created_at().as_datetime().to_rfc3339(),
            updated_at: view.session.updated_at().as_datetime().to_rfc3339(),
            player: (&view.player).into(),
            profession: (&view.profession).into(),
            investments: view.investments.iter().map(Into::into).collect(),
            liabilities: view.liabilities.iter().map(Into::into).collect(),
            doodads: view.doodads.iter().map(Into::into).collect(),
        }
    }
}

/// Player state within a game.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerResponse {
    pub id: String,
    pub profession_id: String,
    pub cash_on_hand: i64,
    pub savings: i64,
    pub num_children: i64,
    pub current_turn: i64,
    pub passive_income: i64,
    pub escaped_rat_race: bool,
    pub fast_track: bool,
}

impl From<&Player> for PlayerResponse {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id().to_string(),
            profession_id: player.profession_id().to_string(),
            cash_on_hand: player.cash_on_hand(),
            savings: player.savings(),
            num_children: player.num_children(),
            current_turn: player.current_turn(),
            passive_income: player.passive_income(),
            escaped_rat_race: player.has_escaped_rat_race(),
            fast_track: player.is_fast_track(),
        }
    }
}

/// Profession template details.
#[derive(Debug, Clone, Serialize)]
pub struct ProfessionResponse {
    pub id: String,
    pub name: String,
    pub salary: i64,
    pub fixed_expenses: i64,
    pub expense_per_child: i64,
}

impl From<&Profession> for ProfessionResponse {
    fn from(profession: &Profession) -> Self {
        Self {
            id: profession.id().to_string(),
            name: profession.name().to_string(),
            salary: profession.salary(),
            fixed_expenses: profession.expenses().fixed_total(),
            expense_per_child: profession.expenses().per_child,
        }
    }
}

/// A profession template as shown on the new-game screen.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogProfessionResponse {
    pub id: String,
    pub name: String,
    pub salary: i64,
    pub starting_cash: i64,
    pub starting_savings: i64,
    pub fixed_expenses: i64,
    pub expense_per_child: i64,
}

impl From<&Profession> for CatalogProfessionResponse {
    fn from(profession: &Profession) -> Self {
        Self {
            id: profession.id().to_string(),
            name: profession.name().to_string(),
            salary: profession.salary(),
            starting_cash: profession.starting_cash(),
            starting_savings: profession.starting_savings(),
            fixed_expenses: profession.expenses().fixed_total(),
            expense_per_child: profession.expenses().per_child,
        }
    }
}

/// An unsold investment.
#[derive(Debug, Clone, Serialize)]
pub struct InvestmentResponse {
    pub id: String,
    pub name: String,
    pub purchase_price: i64,
    pub current_cash_flow: i64,
    pub total_income_earned: i64,
    pub min_sale_price: i64,
    pub max_sale_price: i64,
}

impl From<&PlayerInvestment> for InvestmentResponse {
    fn from(investment: &PlayerInvestment) -> Self {
        let (min_sale_price, max_sale_price) = investment.sale_price_range();
        Self {
            id: investment.id().to_string(),
            name: investment.name().to_string(),
            purchase_price: investment.purchase_price(),
            current_cash_flow: investment.current_cash_flow(),
            total_income_earned: investment.total_income_earned(),
            min_sale_price,
            max_sale_price,
        }
    }
}

/// An unpaid liability.
#[derive(Debug, Clone, Serialize)]
pub struct LiabilityResponse {
    pub id: String,
    pub name: String,
    pub principal: i64,
    pub remaining_balance: i64,
    pub interest_rate_pct: i64,
    pub monthly_payment: i64,
}

impl From<&PlayerLiability> for LiabilityResponse {
    fn from(liability: &PlayerLiability) -> Self {
        Self {
            id: liability.id().to_string(),
            name: liability.name().to_string(),
            principal: liability.principal(),
            remaining_balance: liability.remaining_balance(),
            interest_rate_pct: liability.interest_rate_pct(),
            monthly_payment: liability.monthly_payment(),
        }
    }
}

/// A past doodad purchase.
#[derive(Debug, Clone, Serialize)]
pub struct DoodadPurchaseResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: i64,
    pub purchased_at: String,
}

impl From<&PlayerDoodad> for DoodadPurchaseResponse {
    fn from(doodad: &PlayerDoodad) -> Self {
        Self {
            id: doodad.id().to_string(),
            name: doodad.name().to_string(),
            description: doodad.description().to_string(),
            cost: doodad.cost(),
            purchased_at: doodad.purchased_at().as_datetime().to_rfc3339(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error DTO
// ════════════════════════════════════════════════════════════════════════════

/// Standard error body for all game endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            code: "FORBIDDEN".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_game_request_deserializes() {
        let json = r#"{"profession_id": "3f2e9c1a-0000-0000-0000-000000000001"}"#;
        let req: StartGameRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.profession_id, "3f2e9c1a-0000-0000-0000-000000000001");
    }

    #[test]
    fn take_loan_request_deserializes() {
        let json = r#"{"amount": 12000}"#;
        let req: TakeLoanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.amount, 12_000);
    }

    #[test]
    fn sell_investment_request_deserializes() {
        let json = r#"{"investment_id": "abc", "sale_price": 8000}"#;
        let req: SellInvestmentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.sale_price, 8_000);
    }

    #[test]
    fn error_response_bad_request_creates_correctly() {
        let error = ErrorResponse::bad_request("Invalid input");
        assert_eq!(error.code, "BAD_REQUEST");
        assert_eq!(error.message, "Invalid input");
    }

    #[test]
    fn error_response_not_found_creates_correctly() {
        let error = ErrorResponse::not_found("Game", "abc-123");
        assert_eq!(error.code, "NOT_FOUND");
        assert!(error.message.contains("Game"));
        assert!(error.message.contains("abc-123"));
    }

    #[test]
    fn error_response_omits_empty_details() {
        let error = ErrorResponse::conflict("Stale write");
        let json = serde_json::to_string(&error).unwrap();
        assert!(!json.contains("details"));
    }
}
