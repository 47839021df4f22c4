//! PostgreSQL implementation of CatalogRepository.
//!
//! Reads the seeded reference data: profession templates and doodad
//! cards. The catalog is never written by the application.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, DoodadId, ErrorCode, ProfessionId};
use crate::domain::game::{DoodadCard, MonthlyExpenses, Profession};
use crate::ports::CatalogRepository;

/// PostgreSQL implementation of CatalogRepository.
#[derive(Clone)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    /// Creates a new PostgresCatalogRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFESSION_COLUMNS: &str = r#"
    id, name, salary, starting_cash, starting_savings,
    expense_taxes, expense_mortgage, expense_school_loan, expense_car_loan,
    expense_credit_card, expense_retail, expense_other, expense_per_child
"#;

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn find_profession(
        &self,
        id: &ProfessionId,
    ) -> Result<Option<Profession>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM professions WHERE id = $1",
            PROFESSION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch profession: {}", e),
            )
        })?;

        row.map(row_to_profession).transpose()
    }

    async fn list_professions(&self) -> Result<Vec<Profession>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM professions ORDER BY name ASC",
            PROFESSION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list professions: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_profession).collect()
    }

    async fn find_doodad(&self, id: &DoodadId) -> Result<Option<DoodadCard>, DomainError> {
        let row = sqlx::query("SELECT id, name, description, cost FROM doodad_cards WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch doodad card: {}", e),
                )
            })?;

        row.map(row_to_doodad_card).transpose()
    }
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", column, e),
        )
    })
}

fn row_to_profession(row: PgRow) -> Result<Profession, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;

    let expenses = MonthlyExpenses {
        taxes: get(&row, "expense_taxes")?,
        mortgage: get(&row, "expense_mortgage")?,
        school_loan: get(&row, "expense_school_loan")?,
        car_loan: get(&row, "expense_car_loan")?,
        credit_card: get(&row, "expense_credit_card")?,
        retail: get(&row, "expense_retail")?,
        other: get(&row, "expense_other")?,
        per_child: get(&row, "expense_per_child")?,
    };

    Ok(Profession::new(
        ProfessionId::from_uuid(id),
        get(&row, "name")?,
        get(&row, "salary")?,
        get(&row, "starting_cash")?,
        get(&row, "starting_savings")?,
        expenses,
    ))
}

fn row_to_doodad_card(row: PgRow) -> Result<DoodadCard, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;

    Ok(DoodadCard::new(
        DoodadId::from_uuid(id),
        get(&row, "name")?,
        get(&row, "description")?,
        get(&row, "cost")?,
    ))
}
