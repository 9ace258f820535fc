//! Industry repository
//!
//! Industries link to companies through `comps_inds`. An industry with no
//! linked companies is still found; only an unknown code is NotFound.

use sqlx::{FromRow, PgPool};

use super::{CompanySummary, DbError};

/// Industry record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Industry {
    pub code: String,
    pub industry: String,
}

/// Company/industry link record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CompanyIndustry {
    pub comp_code: String,
    pub ind_code: String,
}

/// Industry with the companies linked to it
#[derive(Debug, Clone)]
pub struct IndustryDetail {
    pub industry: Industry,
    pub companies: Vec<CompanySummary>,
}

/// One row of the industry → link → company LEFT JOIN.
/// Company columns are NULL when the industry has no links.
#[derive(FromRow)]
struct IndustryCompanyRow {
    code: String,
    industry: String,
    company_code: Option<String>,
    company_name: Option<String>,
}

/// Industry repository
pub struct IndustryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> IndustryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Industry>, DbError> {
        let industries = sqlx::query_as("SELECT code, industry FROM industries ORDER BY code")
            .fetch_all(self.pool)
            .await?;

        Ok(industries)
    }

    /// Get one industry with its companies (single LEFT JOIN, no N+1).
    pub async fn get(&self, code: &str) -> Result<IndustryDetail, DbError> {
        let rows: Vec<IndustryCompanyRow> = sqlx::query_as(
            r#"
            SELECT
                i.code,
                i.industry,
                c.code AS company_code,
                c.name AS company_name
            FROM industries i
            LEFT JOIN comps_inds ci ON ci.ind_code = i.code
            LEFT JOIN companies c ON c.code = ci.comp_code
            WHERE i.code = $1
            ORDER BY c.code
            "#,
        )
        .bind(code)
        .fetch_all(self.pool)
        .await?;

        // The LEFT JOIN yields at least one row for any existing industry
        let first = rows
            .first()
            .ok_or_else(|| DbError::not_found("industry", code))?;
        let industry = Industry {
            code: first.code.clone(),
            industry: first.industry.clone(),
        };

        let companies = rows
            .into_iter()
            .filter_map(|r| match (r.company_code, r.company_name) {
                (Some(code), Some(name)) => Some(CompanySummary { code, name }),
                _ => None,
            })
            .collect();

        Ok(IndustryDetail {
            industry,
            companies,
        })
    }

    /// Insert an industry. A taken code or name is `DbError::Constraint`.
    pub async fn create(
        &self,
        code: Option<&str>,
        industry: Option<&str>,
    ) -> Result<Industry, DbError> {
        let created = sqlx::query_as(
            r#"
            INSERT INTO industries (code, industry)
            VALUES ($1, $2)
            RETURNING code, industry
            "#,
        )
        .bind(code)
        .bind(industry)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Link a company to an industry.
    ///
    /// Unknown codes (FK) and repeated links (PK) are `DbError::Constraint`.
    pub async fn associate(
        &self,
        ind_code: &str,
        comp_code: &str,
    ) -> Result<CompanyIndustry, DbError> {
        let link = sqlx::query_as(
            r#"
            INSERT INTO comps_inds (comp_code, ind_code)
            VALUES ($1, $2)
            RETURNING comp_code, ind_code
            "#,
        )
        .bind(comp_code)
        .bind(ind_code)
        .fetch_one(self.pool)
        .await?;

        Ok(link)
    }

    pub async fn delete(&self, code: &str) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM industries WHERE code = $1")
            .bind(code)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("industry", code));
        }
        Ok(())
    }
}
