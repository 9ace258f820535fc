//! Company repository
//!
//! - get: company row plus invoice ids and industry codes
//! - delete: invoices and industry links go with it (ON DELETE CASCADE)

use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::CompanyCode;

/// Company record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Company code and name for list display
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

/// Company with the ids of its invoices and codes of its industries
#[derive(Debug, Clone)]
pub struct CompanyDetail {
    pub company: Company,
    pub invoice_ids: Vec<i32>,
    pub industry_codes: Vec<String>,
}

/// Company repository
pub struct CompanyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CompanyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every company.
    pub async fn list(&self) -> Result<Vec<CompanySummary>, DbError> {
        let companies = sqlx::query_as("SELECT code, name FROM companies ORDER BY code")
            .fetch_all(self.pool)
            .await?;

        Ok(companies)
    }

    /// Get one company with its invoice ids and industry codes.
    pub async fn get(&self, code: &str) -> Result<CompanyDetail, DbError> {
        let company: Company =
            sqlx::query_as("SELECT code, name, description FROM companies WHERE code = $1")
                .bind(code)
                .fetch_optional(self.pool)
                .await?
                .ok_or_else(|| DbError::not_found("company", code))?;

        let invoice_ids: Vec<i32> =
            sqlx::query_scalar("SELECT id FROM invoices WHERE comp_code = $1 ORDER BY id")
                .bind(code)
                .fetch_all(self.pool)
                .await?;

        let industry_codes: Vec<String> = sqlx::query_scalar(
            "SELECT ind_code FROM comps_inds WHERE comp_code = $1 ORDER BY ind_code",
        )
        .bind(code)
        .fetch_all(self.pool)
        .await?;

        Ok(CompanyDetail {
            company,
            invoice_ids,
            industry_codes,
        })
    }

    /// Insert a company under the given code.
    ///
    /// A taken code or name, or an absent name, comes back as
    /// `DbError::Constraint`.
    pub async fn create(
        &self,
        code: CompanyCode,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Company, DbError> {
        let company = sqlx::query_as(
            r#"
            INSERT INTO companies (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING code, name, description
            "#,
        )
        .bind(code.as_str())
        .bind(name)
        .bind(description)
        .fetch_one(self.pool)
        .await?;

        Ok(company)
    }

    /// Replace name and description.
    ///
    /// Absent values are written as NULL; a NULL name violates NOT NULL.
    pub async fn update(
        &self,
        code: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Company, DbError> {
        sqlx::query_as(
            r#"
            UPDATE companies
            SET name = $2, description = $3
            WHERE code = $1
            RETURNING code, name, description
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(description)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("company", code))
    }

    pub async fn delete(&self, code: &str) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("company", code));
        }
        Ok(())
    }
}
