//! Player aggregate - the state every transaction rule mutates.
//!
//! All five board actions go through methods on this type so the cash and
//! passive-income arithmetic lives in one place, away from any I/O.
//!
//! # Invariants
//!
//! - no rule takes `cash_on_hand` below zero except `payday`, which may
//!   (a losing month is legal; blocking it would hide a lost game)
//! - `current_turn` increases by exactly 1 per `payday` call
//! - `version` is only advanced by the repository's compare-and-swap write

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, GameId, PlayerId, ProfessionId, PurchaseId, Timestamp, UserId,
};

use super::doodad::{DoodadCard, PlayerDoodad};
use super::investment::{PlayerInvestment, SaleOutcome};
use super::liability::{LoanPayoff, LoanTerms, PlayerLiability};
use super::profession::Profession;

/// One month's income/expense breakdown, produced by `payday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaydayBreakdown {
    pub salary: i64,
    pub investment_income: i64,
    pub fixed_expenses: i64,
    pub child_expenses: i64,
    pub loan_payments: i64,
    pub total_expenses: i64,
    pub monthly_cash_flow: i64,
    pub new_cash: i64,
    pub new_turn: i64,
}

/// Player state for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    game_id: GameId,
    user_id: UserId,
    profession_id: ProfessionId,
    cash_on_hand: i64,
    savings: i64,
    num_children: i64,
    current_turn: i64,
    passive_income: i64,
    escaped_rat_race: bool,
    fast_track: bool,
    version: i64,
    created_at: Timestamp,
}

impl Player {
    /// Seed a new player from a profession template.
    ///
    /// Starts at turn 1 with the profession's cash and savings, no
    /// children, and no passive income.
    pub fn seed(id: PlayerId, game_id: GameId, user_id: UserId, profession: &Profession) -> Self {
        Self {
            id,
            game_id,
            user_id,
            profession_id: *profession.id(),
            cash_on_hand: profession.starting_cash(),
            savings: profession.starting_savings(),
            num_children: 0,
            current_turn: 1,
            passive_income: 0,
            escaped_rat_race: false,
            fast_track: false,
            version: 0,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute a player from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PlayerId,
        game_id: GameId,
        user_id: UserId,
        profession_id: ProfessionId,
        cash_on_hand: i64,
        savings: i64,
        num_children: i64,
        current_turn: i64,
        passive_income: i64,
        escaped_rat_race: bool,
        fast_track: bool,
        version: i64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            game_id,
            user_id,
            profession_id,
            cash_on_hand,
            savings,
            num_children,
            current_turn,
            passive_income,
            escaped_rat_race,
            fast_track,
            version,
            created_at,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn profession_id(&self) -> &ProfessionId {
        &self.profession_id
    }

    pub fn cash_on_hand(&self) -> i64 {
        self.cash_on_hand
    }

    pub fn savings(&self) -> i64 {
        self.savings
    }

    pub fn num_children(&self) -> i64 {
        self.num_children
    }

    pub fn current_turn(&self) -> i64 {
        self.current_turn
    }

    pub fn passive_income(&self) -> i64 {
        self.passive_income
    }

    pub fn has_escaped_rat_race(&self) -> bool {
        self.escaped_rat_race
    }

    pub fn is_fast_track(&self) -> bool {
        self.fast_track
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transaction rules
    // ─────────────────────────────────────────────────────────────────────────

    /// Buy a doodad from the catalog.
    ///
    /// # Errors
    ///
    /// - `InsufficientFunds` if cash on hand cannot cover the cost
    pub fn buy_doodad(&mut self, card: &DoodadCard) -> Result<PlayerDoodad, DomainError> {
        self.ensure_funds(card.cost())?;

        let purchase = PlayerDoodad::snapshot(PurchaseId::new(), self.id, card);
        self.cash_on_hand -= card.cost();
        Ok(purchase)
    }

    /// Receive a loan with the given quoted terms.
    ///
    /// Validation of the amount happens in `LoanTerms::quote`; this only
    /// credits the cash.
    pub fn receive_loan(&mut self, terms: &LoanTerms) {
        self.cash_on_hand += terms.principal;
    }

    /// Pay off a loan in full. Partial payments are not supported.
    ///
    /// # Errors
    ///
    /// - `AlreadyPaidOff` if the loan was already settled
    /// - `InsufficientFunds` if cash cannot cover the remaining balance
    pub fn pay_off_loan(&mut self, loan: &mut PlayerLiability) -> Result<LoanPayoff, DomainError> {
        if loan.is_paid_off() {
            return Err(DomainError::new(
                ErrorCode::AlreadyPaidOff,
                format!("Loan {} is already paid off", loan.id()),
            ));
        }
        self.ensure_funds(loan.remaining_balance())?;

        let payoff = loan.mark_paid()?;
        self.cash_on_hand -= payoff.amount_paid;
        Ok(payoff)
    }

    /// Sell an investment at the given price.
    ///
    /// Credits the sale price and removes the investment's cash flow from
    /// passive income. Passive income is deliberately NOT clamped at zero;
    /// the historical behavior lets it go negative and a product decision
    /// is pending before that changes.
    ///
    /// # Errors
    ///
    /// - `AlreadySold` / `OutOfRange` from the investment itself
    pub fn sell_investment(
        &mut self,
        investment: &mut PlayerInvestment,
        price: i64,
    ) -> Result<SaleOutcome, DomainError> {
        let outcome = investment.sell(price)?;
        self.cash_on_hand += outcome.sale_price;
        self.passive_income -= outcome.cash_flow_removed;
        Ok(outcome)
    }

    /// Apply one month's payday: salary plus investment income, minus all
    /// expenses. Advances the turn counter by exactly 1.
    ///
    /// Unlike the purchase rules this may push cash negative - a bad month
    /// is applied as-is. Unsold investments with positive cash flow accrue
    /// the month's income into their running totals.
    pub fn payday(
        &mut self,
        profession: &Profession,
        investments: &mut [PlayerInvestment],
        liabilities: &[PlayerLiability],
    ) -> PaydayBreakdown {
        let investment_income: i64 = investments
            .iter()
            .filter(|inv| !inv.is_sold())
            .map(|inv| inv.current_cash_flow())
            .sum();

        let loan_payments: i64 = liabilities
            .iter()
            .filter(|loan| !loan.is_paid_off())
            .map(|loan| loan.monthly_payment())
            .sum();

        let fixed_expenses = profession.expenses().fixed_total();
        let child_expenses = profession.expenses().child_total(self.num_children);
        let total_expenses = fixed_expenses + child_expenses + loan_payments;

        let monthly_cash_flow = profession.salary() + investment_income - total_expenses;

        self.current_turn += 1;
        self.cash_on_hand += monthly_cash_flow;

        for investment in investments.iter_mut() {
            investment.accrue_monthly_income();
        }

        PaydayBreakdown {
            salary: profession.salary(),
            investment_income,
            fixed_expenses,
            child_expenses,
            loan_payments,
            total_expenses,
            monthly_cash_flow,
            new_cash: self.cash_on_hand,
            new_turn: self.current_turn,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_funds(&self, required: i64) -> Result<(), DomainError> {
        if self.cash_on_hand < required {
            return Err(DomainError::new(
                ErrorCode::InsufficientFunds,
                format!(
                    "Insufficient funds: need {}, have {}",
                    required, self.cash_on_hand
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DoodadId, InvestmentId, LiabilityId};
    use crate::domain::game::profession::MonthlyExpenses;

    fn test_expenses() -> MonthlyExpenses {
        MonthlyExpenses {
            taxes: 800,
            mortgage: 700,
            school_loan: 300,
            car_loan: 200,
            credit_card: 200,
            retail: 100,
            other: 200,
            per_child: 150,
        }
    }

    fn test_profession() -> Profession {
        Profession::new(
            ProfessionId::new(),
            "Engineer".to_string(),
            3000,
            1000,
            400,
            test_expenses(),
        )
    }

    fn test_player(profession: &Profession) -> Player {
        Player::seed(
            PlayerId::new(),
            GameId::new(),
            UserId::new("user-123").unwrap(),
            profession,
        )
    }

    fn test_investment(player_id: PlayerId, cash_flow: i64) -> PlayerInvestment {
        PlayerInvestment::reconstitute(
            InvestmentId::new(),
            player_id,
            "Duplex".to_string(),
            5_000,
            cash_flow,
            0,
            None,
            Some(20_000),
            false,
            None,
            None,
            Timestamp::now(),
        )
    }

    // Seeding

    #[test]
    fn seed_copies_profession_starting_values() {
        let profession = test_profession();
        let player = test_player(&profession);

        assert_eq!(player.cash_on_hand(), 1000);
        assert_eq!(player.savings(), 400);
        assert_eq!(player.current_turn(), 1);
        assert_eq!(player.passive_income(), 0);
        assert_eq!(player.num_children(), 0);
        assert!(!player.has_escaped_rat_race());
        assert!(!player.is_fast_track());
        assert_eq!(player.version(), 0);
    }

    // Doodads

    #[test]
    fn buy_doodad_debits_cost() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let card = DoodadCard::new(
            DoodadId::new(),
            "Coffee".to_string(),
            "Artisanal".to_string(),
            300,
        );

        let purchase = player.buy_doodad(&card).unwrap();
        assert_eq!(player.cash_on_hand(), 700);
        assert_eq!(purchase.cost(), 300);
    }

    #[test]
    fn buy_doodad_rejects_insufficient_funds_without_mutation() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let card = DoodadCard::new(
            DoodadId::new(),
            "Boat".to_string(),
            "Too expensive".to_string(),
            17_000,
        );

        let result = player.buy_doodad(&card);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::InsufficientFunds);
        assert_eq!(player.cash_on_hand(), 1000);
    }

    #[test]
    fn buy_doodad_allows_exact_cash() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let card = DoodadCard::new(
            DoodadId::new(),
            "Gadget".to_string(),
            "Exactly affordable".to_string(),
            1000,
        );

        player.buy_doodad(&card).unwrap();
        assert_eq!(player.cash_on_hand(), 0);
    }

    // Loans

    #[test]
    fn receive_loan_credits_principal() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let terms = LoanTerms::quote(12_000).unwrap();

        player.receive_loan(&terms);
        assert_eq!(player.cash_on_hand(), 13_000);
    }

    #[test]
    fn pay_off_loan_debits_balance() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let terms = LoanTerms::quote(12_000).unwrap();
        player.receive_loan(&terms);
        let mut loan = PlayerLiability::issue(LiabilityId::new(), *player.id(), terms);

        let payoff = player.pay_off_loan(&mut loan).unwrap();
        assert_eq!(payoff.amount_paid, 12_000);
        assert_eq!(payoff.monthly_payment_saved, 100);
        assert_eq!(player.cash_on_hand(), 1_000);
        assert!(loan.is_paid_off());
    }

    #[test]
    fn pay_off_loan_rejects_insufficient_cash() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let terms = LoanTerms::quote(12_000).unwrap();
        let mut loan = PlayerLiability::issue(LiabilityId::new(), *player.id(), terms);

        // Player has 1000, owes 12000
        let result = player.pay_off_loan(&mut loan);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::InsufficientFunds);
        assert!(!loan.is_paid_off());
        assert_eq!(player.cash_on_hand(), 1000);
    }

    #[test]
    fn pay_off_loan_rejects_already_paid() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let terms = LoanTerms::quote(1_200).unwrap();
        player.receive_loan(&terms);
        let mut loan = PlayerLiability::issue(LiabilityId::new(), *player.id(), terms);
        player.pay_off_loan(&mut loan).unwrap();

        let result = player.pay_off_loan(&mut loan);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::AlreadyPaidOff);
    }

    // Investments

    #[test]
    fn sell_investment_credits_price_and_reduces_passive_income() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let mut investment = test_investment(*player.id(), 100);

        let outcome = player.sell_investment(&mut investment, 7_000).unwrap();
        assert_eq!(outcome.capital_gain, 2_000);
        assert_eq!(player.cash_on_hand(), 8_000);
        assert_eq!(player.passive_income(), -100);
    }

    #[test]
    fn sell_investment_passes_through_range_rejection() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let mut investment = test_investment(*player.id(), 100);

        let result = player.sell_investment(&mut investment, 25_000);
        assert!(result.is_err());
        assert_eq!(player.cash_on_hand(), 1000);
        assert_eq!(player.passive_income(), 0);
    }

    // Payday

    #[test]
    fn payday_scenario_from_the_rulebook() {
        // starting cash 1000, salary 3000, fixed expenses 2500,
        // no investments/liabilities/children
        let profession = test_profession();
        let mut player = test_player(&profession);

        let breakdown = player.payday(&profession, &mut [], &[]);

        assert_eq!(breakdown.monthly_cash_flow, 500);
        assert_eq!(breakdown.new_cash, 1500);
        assert_eq!(breakdown.new_turn, 2);
        assert_eq!(player.cash_on_hand(), 1500);
        assert_eq!(player.current_turn(), 2);
    }

    #[test]
    fn payday_includes_investment_income_and_loan_payments() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let mut investments = vec![test_investment(*player.id(), 300)];
        let terms = LoanTerms::quote(12_000).unwrap();
        let liabilities = vec![PlayerLiability::issue(LiabilityId::new(), *player.id(), terms)];

        let breakdown = player.payday(&profession, &mut investments, &liabilities);

        assert_eq!(breakdown.investment_income, 300);
        assert_eq!(breakdown.loan_payments, 100);
        assert_eq!(breakdown.total_expenses, 2600);
        // 3000 + 300 - 2600
        assert_eq!(breakdown.monthly_cash_flow, 700);
        assert_eq!(player.cash_on_hand(), 1700);
    }

    #[test]
    fn payday_charges_child_expenses() {
        let profession = test_profession();
        let mut player = Player::reconstitute(
            PlayerId::new(),
            GameId::new(),
            UserId::new("user-123").unwrap(),
            *profession.id(),
            1000,
            400,
            2,
            1,
            0,
            false,
            false,
            0,
            Timestamp::now(),
        );

        let breakdown = player.payday(&profession, &mut [], &[]);

        assert_eq!(breakdown.child_expenses, 300);
        assert_eq!(breakdown.total_expenses, 2800);
        assert_eq!(breakdown.monthly_cash_flow, 200);
    }

    #[test]
    fn payday_may_push_cash_negative() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let terms = LoanTerms::quote(1_000_000).unwrap();
        let liabilities = vec![PlayerLiability::issue(LiabilityId::new(), *player.id(), terms)];

        let breakdown = player.payday(&profession, &mut [], &liabilities);

        // 3000 - (2500 + 8333) = -7833
        assert_eq!(breakdown.monthly_cash_flow, -7_833);
        assert_eq!(player.cash_on_hand(), 1000 - 7_833);
    }

    #[test]
    fn payday_skips_sold_investments() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let mut sold = test_investment(*player.id(), 500);
        sold.sell(4_000).unwrap();
        let mut investments = vec![sold];

        let breakdown = player.payday(&profession, &mut investments, &[]);
        assert_eq!(breakdown.investment_income, 0);
    }

    #[test]
    fn payday_accrues_income_into_unsold_investments() {
        let profession = test_profession();
        let mut player = test_player(&profession);
        let mut investments = vec![
            test_investment(*player.id(), 300),
            test_investment(*player.id(), 0),
        ];

        player.payday(&profession, &mut investments, &[]);
        player.payday(&profession, &mut investments, &[]);

        assert_eq!(investments[0].total_income_earned(), 600);
        assert_eq!(investments[1].total_income_earned(), 0);
    }

    #[test]
    fn payday_increments_turn_by_exactly_one_each_call() {
        let profession = test_profession();
        let mut player = test_player(&profession);

        for expected in 2..=5 {
            let breakdown = player.payday(&profession, &mut [], &[]);
            assert_eq!(breakdown.new_turn, expected);
        }
    }
}
