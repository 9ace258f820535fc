//! Repository implementations for database access
//!
//! Each repository borrows the pool and issues one parameterized statement
//! per operation. Missing rows become `DbError::NotFound`; constraint
//! violations reported by PostgreSQL become `DbError::Constraint`.

pub mod companies;
pub mod industries;
pub mod invoices;

pub use companies::{Company, CompanyDetail, CompanyRepo, CompanySummary};
pub use industries::{CompanyIndustry, Industry, IndustryDetail, IndustryRepo};
pub use invoices::{Invoice, InvoiceRepo, InvoiceSummary, InvoiceWithCompany};

use sqlx::error::ErrorKind;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Unique, foreign-key, not-null or check violation.
    #[error("constraint violation: {message}")]
    Constraint {
        constraint: Option<String>,
        message: String,
    },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return Self::Constraint {
                        constraint: db_err.constraint().map(str::to_owned),
                        message: db_err.message().to_owned(),
                    };
                }
                _ => {}
            }
        }
        Self::Sqlx(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_stay_sqlx() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("invoice", 42);
        assert_eq!(err.to_string(), "not found: invoice '42'");
    }
}
