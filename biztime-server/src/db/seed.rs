//! Sample data loader
//!
//! Resets every table and inserts a small known dataset. Used by
//! `biztime seed` and by the database-backed tests.

use sqlx::PgPool;

/// Truncate all tables and load the sample dataset in one transaction.
///
/// The invoice sequence restarts, so the seeded invoices get ids 1, 2 and 3.
pub async fn load_sample_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("TRUNCATE comps_inds, invoices, industries, companies RESTART IDENTITY")
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO companies (code, name, description)
        VALUES ('acme', 'ACME', 'The one from the cartoons'),
               ('test-co', 'Test Co.', 'Extremely fake')
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO invoices (comp_code, amt, paid, add_date, paid_date)
        VALUES ('acme', 150, FALSE, '2021-03-16', NULL),
               ('acme', 100, TRUE, '2021-02-01', '2021-02-28'),
               ('test-co', 200, FALSE, '2021-01-01', NULL)
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO industries (code, industry)
        VALUES ('toons', 'Cartoons'),
               ('bombs', 'Explosives and bombs'),
               ('anvils', 'Cartoon anvils'),
               ('widgets', 'Widgets and gadgets')
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO comps_inds (comp_code, ind_code)
        VALUES ('acme', 'toons'),
               ('acme', 'bombs'),
               ('acme', 'anvils'),
               ('test-co', 'bombs'),
               ('test-co', 'widgets')
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!("Sample data loaded");
    Ok(())
}
