//! Loans: quoting terms and the payoff lifecycle.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, LiabilityId, PlayerId, Timestamp};

/// Smallest loan the bank will issue.
pub const MIN_LOAN_AMOUNT: i64 = 1_000;

/// Largest loan the bank will issue.
pub const MAX_LOAN_AMOUNT: i64 = 1_000_000;

/// Fixed annual interest rate, in whole percent.
pub const LOAN_INTEREST_RATE_PCT: i64 = 10;

/// Quoted terms for a loan of a given principal.
///
/// The two-stage integer truncation (annual interest first, then the
/// monthly payment) matches the historical behavior and must not be
/// collapsed into a single division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: i64,
    pub annual_interest: i64,
    pub monthly_payment: i64,
}

impl LoanTerms {
    /// Quote terms for a principal amount.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the amount is outside [1000, 1000000]
    pub fn quote(amount: i64) -> Result<Self, DomainError> {
        if !(MIN_LOAN_AMOUNT..=MAX_LOAN_AMOUNT).contains(&amount) {
            return Err(DomainError::new(
                ErrorCode::OutOfRange,
                format!(
                    "Loan amount must be between {} and {}, got {}",
                    MIN_LOAN_AMOUNT, MAX_LOAN_AMOUNT, amount
                ),
            )
            .with_detail("field", "amount"));
        }

        let annual_interest = amount * LOAN_INTEREST_RATE_PCT / 100;
        let monthly_payment = annual_interest / 12;

        Ok(Self {
            principal: amount,
            annual_interest,
            monthly_payment,
        })
    }
}

/// Outcome of a full loan payoff, used for the event log and response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPayoff {
    pub amount_paid: i64,
    pub monthly_payment_saved: i64,
}

/// A loan held by a player.
///
/// Loans are interest-only: payday charges `monthly_payment` every turn
/// until the balance is repaid in full. Partial payments are not supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLiability {
    id: LiabilityId,
    player_id: PlayerId,
    name: String,
    principal: i64,
    remaining_balance: i64,
    interest_rate_pct: i64,
    monthly_payment: i64,
    paid_off: bool,
    paid_off_at: Option<Timestamp>,
    created_at: Timestamp,
}

impl PlayerLiability {
    /// Issue a new loan with the given quoted terms.
    pub fn issue(id: LiabilityId, player_id: PlayerId, terms: LoanTerms) -> Self {
        Self {
            id,
            player_id,
            name: "Bank Loan".to_string(),
            principal: terms.principal,
            remaining_balance: terms.principal,
            interest_rate_pct: LOAN_INTEREST_RATE_PCT,
            monthly_payment: terms.monthly_payment,
            paid_off: false,
            paid_off_at: None,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute a liability from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: LiabilityId,
        player_id: PlayerId,
        name: String,
        principal: i64,
        remaining_balance: i64,
        interest_rate_pct: i64,
        monthly_payment: i64,
        paid_off: bool,
        paid_off_at: Option<Timestamp>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            player_id,
            name,
            principal,
            remaining_balance,
            interest_rate_pct,
            monthly_payment,
            paid_off,
            paid_off_at,
            created_at,
        }
    }

    pub fn id(&self) -> &LiabilityId {
        &self.id
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn principal(&self) -> i64 {
        self.principal
    }

    pub fn remaining_balance(&self) -> i64 {
        self.remaining_balance
    }

    pub fn interest_rate_pct(&self) -> i64 {
        self.interest_rate_pct
    }

    pub fn monthly_payment(&self) -> i64 {
        self.monthly_payment
    }

    pub fn is_paid_off(&self) -> bool {
        self.paid_off
    }

    pub fn paid_off_at(&self) -> Option<&Timestamp> {
        self.paid_off_at.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Mark the loan paid in full.
    ///
    /// Zeroes the balance and stamps the payoff time. The caller is
    /// responsible for checking and debiting the player's cash.
    ///
    /// # Errors
    ///
    /// - `AlreadyPaidOff` if the loan was already settled
    pub fn mark_paid(&mut self) -> Result<LoanPayoff, DomainError> {
        if self.paid_off {
            return Err(DomainError::new(
                ErrorCode::AlreadyPaidOff,
                format!("Loan {} is already paid off", self.id),
            ));
        }

        let payoff = LoanPayoff {
            amount_paid: self.remaining_balance,
            monthly_payment_saved: self.monthly_payment,
        };

        self.paid_off = true;
        self.remaining_balance = 0;
        self.paid_off_at = Some(Timestamp::now());

        Ok(payoff)
    }
}
