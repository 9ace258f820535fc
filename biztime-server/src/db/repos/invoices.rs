//! Invoice repository
//!
//! Updates touch `amt` only; `paid` and `paid_date` are never written
//! after insert.

use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use super::DbError;

/// Invoice record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

/// Invoice id and owner for list display
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

/// Invoice joined with its owning company
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceWithCompany {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub company_code: String,
    pub company_name: String,
    pub company_description: Option<String>,
}

/// Invoice repository
pub struct InvoiceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> InvoiceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<InvoiceSummary>, DbError> {
        let invoices = sqlx::query_as("SELECT id, comp_code FROM invoices ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(invoices)
    }

    /// Get one invoice with its company in a single JOIN.
    pub async fn get(&self, id: i32) -> Result<InvoiceWithCompany, DbError> {
        sqlx::query_as(
            r#"
            SELECT
                i.id,
                i.amt,
                i.paid,
                i.add_date,
                i.paid_date,
                c.code AS company_code,
                c.name AS company_name,
                c.description AS company_description
            FROM invoices i
            JOIN companies c ON c.code = i.comp_code
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("invoice", id))
    }

    /// Insert an unpaid invoice dated today.
    ///
    /// Unknown company, absent amount or non-positive amount come back as
    /// `DbError::Constraint`.
    pub async fn create(
        &self,
        comp_code: Option<&str>,
        amt: Option<f64>,
    ) -> Result<Invoice, DbError> {
        let invoice = sqlx::query_as(
            r#"
            INSERT INTO invoices (comp_code, amt)
            VALUES ($1, $2)
            RETURNING id, comp_code, amt, paid, add_date, paid_date
            "#,
        )
        .bind(comp_code)
        .bind(amt)
        .fetch_one(self.pool)
        .await?;

        Ok(invoice)
    }

    /// Set the amount of an existing invoice.
    pub async fn update_amount(&self, id: i32, amt: Option<f64>) -> Result<Invoice, DbError> {
        sqlx::query_as(
            r#"
            UPDATE invoices
            SET amt = $2
            WHERE id = $1
            RETURNING id, comp_code, amt, paid, add_date, paid_date
            "#,
        )
        .bind(id)
        .bind(amt)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("invoice", id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("invoice", id));
        }
        Ok(())
    }
}
