//! Schema for companies, invoices, industries and their join table
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so it runs on each startup.

use sqlx::PgPool;

/// Table names in creation order.
pub const TABLES: [&str; 4] = ["companies", "invoices", "industries", "comps_inds"];

/// Create all tables and indexes if they are missing.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS invoices (
            id SERIAL PRIMARY KEY,
            comp_code TEXT NOT NULL REFERENCES companies (code) ON DELETE CASCADE,
            amt DOUBLE PRECISION NOT NULL CHECK (amt > 0),
            paid BOOLEAN NOT NULL DEFAULT FALSE,
            add_date DATE NOT NULL DEFAULT CURRENT_DATE,
            paid_date DATE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS industries (
            code TEXT PRIMARY KEY,
            industry TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comps_inds (
            comp_code TEXT NOT NULL REFERENCES companies (code) ON DELETE CASCADE,
            ind_code TEXT NOT NULL REFERENCES industries (code) ON DELETE CASCADE,
            PRIMARY KEY (comp_code, ind_code)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // FK lookups; the composite PK already covers comp_code
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_invoices_comp_code ON invoices (comp_code)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comps_inds_ind_code ON comps_inds (ind_code)")
        .execute(pool)
        .await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}
