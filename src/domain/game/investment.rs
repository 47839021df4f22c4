//! Owned investments: sale lifecycle and income accrual.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, InvestmentId, PlayerId, Timestamp};

/// Outcome of an investment sale, used for the event log and response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleOutcome {
    pub sale_price: i64,
    pub capital_gain: i64,
    pub total_return: i64,
    /// Monthly cash flow removed from the player's passive income.
    pub cash_flow_removed: i64,
}

/// An opportunity card the player has bought and holds until sold.
///
/// The sale-price range is snapshotted from the opportunity card at
/// purchase time; a card without a range defaults to [0, purchase_price].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInvestment {
    id: InvestmentId,
    player_id: PlayerId,
    name: String,
    purchase_price: i64,
    current_cash_flow: i64,
    total_income_earned: i64,
    min_sale_price: Option<i64>,
    max_sale_price: Option<i64>,
    sold: bool,
    sale_price: Option<i64>,
    sold_at: Option<Timestamp>,
    created_at: Timestamp,
}

impl PlayerInvestment {
    /// Reconstitute an investment from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: InvestmentId,
        player_id: PlayerId,
        name: String,
        purchase_price: i64,
        current_cash_flow: i64,
        total_income_earned: i64,
        min_sale_price: Option<i64>,
        max_sale_price: Option<i64>,
        sold: bool,
        sale_price: Option<i64>,
        sold_at: Option<Timestamp>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            player_id,
            name,
            purchase_price,
            current_cash_flow,
            total_income_earned,
            min_sale_price,
            max_sale_price,
            sold,
            sale_price,
            sold_at,
            created_at,
        }
    }

    pub fn id(&self) -> &InvestmentId {
        &self.id
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn purchase_price(&self) -> i64 {
        self.purchase_price
    }

    pub fn current_cash_flow(&self) -> i64 {
        self.current_cash_flow
    }

    pub fn total_income_earned(&self) -> i64 {
        self.total_income_earned
    }

    pub fn is_sold(&self) -> bool {
        self.sold
    }

    pub fn sale_price(&self) -> Option<i64> {
        self.sale_price
    }

    pub fn sold_at(&self) -> Option<&Timestamp> {
        self.sold_at.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn min_sale_price(&self) -> Option<i64> {
        self.min_sale_price
    }

    pub fn max_sale_price(&self) -> Option<i64> {
        self.max_sale_price
    }

    /// The accepted sale-price range, with defaults applied.
    pub fn sale_price_range(&self) -> (i64, i64) {
        (
            self.min_sale_price.unwrap_or(0),
            self.max_sale_price.unwrap_or(self.purchase_price),
        )
    }

    /// Sell the investment at the given price.
    ///
    /// The caller credits the player's cash and removes the returned
    /// `cash_flow_removed` from passive income.
    ///
    /// # Errors
    ///
    /// - `AlreadySold` if the investment was already sold
    /// - `OutOfRange` if the price falls outside the sale-price range
    ///   (boundary values are accepted)
    pub fn sell(&mut self, price: i64) -> Result<SaleOutcome, DomainError> {
        if self.sold {
            return Err(DomainError::new(
                ErrorCode::AlreadySold,
                format!("Investment {} is already sold", self.id),
            ));
        }

        let (min, max) = self.sale_price_range();
        if price < min || price > max {
            return Err(DomainError::new(
                ErrorCode::OutOfRange,
                format!(
                    "Sale price out of range: {} not in [{}, {}]",
                    price, min, max
                ),
            )
            .with_detail("field", "sale_price"));
        }

        let outcome = SaleOutcome {
            sale_price: price,
            capital_gain: price - self.purchase_price,
            total_return: price + self.total_income_earned,
            cash_flow_removed: self.current_cash_flow,
        };

        self.sold = true;
        self.sale_price = Some(price);
        self.sold_at = Some(Timestamp::now());

        Ok(outcome)
    }

    /// Accrue one month of income into the running total.
    ///
    /// Only unsold investments with positive cash flow accrue; everything
    /// else is a no-op.
    pub fn accrue_monthly_income(&mut self) {
        if !self.sold && self.current_cash_flow > 0 {
            self.total_income_earned += self.current_cash_flow;
        }
    }
}
