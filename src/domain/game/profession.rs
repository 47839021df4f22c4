//! Profession templates - immutable reference data.
//!
//! A profession defines where a player starts: cash, savings, salary, and
//! the fixed monthly expense categories that payday charges every turn.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ProfessionId;

/// Fixed monthly expense categories for a profession.
///
/// All amounts are whole dollars. `per_child` is charged once per child the
/// player has, on top of the fixed categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyExpenses {
    pub taxes: i64,
    pub mortgage: i64,
    pub school_loan: i64,
    pub car_loan: i64,
    pub credit_card: i64,
    pub retail: i64,
    pub other: i64,
    pub per_child: i64,
}

impl MonthlyExpenses {
    /// Sum of the fixed categories, excluding child expenses.
    pub fn fixed_total(&self) -> i64 {
        self.taxes
            + self.mortgage
            + self.school_loan
            + self.car_loan
            + self.credit_card
            + self.retail
            + self.other
    }

    /// Child expenses for the given number of children.
    pub fn child_total(&self, num_children: i64) -> i64 {
        self.per_child * num_children
    }
}

/// Profession template - immutable once seeded into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profession {
    id: ProfessionId,
    name: String,
    salary: i64,
    starting_cash: i64,
    starting_savings: i64,
    expenses: MonthlyExpenses,
}

impl Profession {
    pub fn new(
        id: ProfessionId,
        name: String,
        salary: i64,
        starting_cash: i64,
        starting_savings: i64,
        expenses: MonthlyExpenses,
    ) -> Self {
        Self {
            id,
            name,
            salary,
            starting_cash,
            starting_savings,
            expenses,
        }
    }

    pub fn id(&self) -> &ProfessionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn salary(&self) -> i64 {
        self.salary
    }

    pub fn starting_cash(&self) -> i64 {
        self.starting_cash
    }

    pub fn starting_savings(&self) -> i64 {
        self.starting_savings
    }

    pub fn expenses(&self) -> &MonthlyExpenses {
        &self.expenses
    }
}
