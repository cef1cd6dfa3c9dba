//! Schema bootstrap for the inquiry and admin tables
//!
//! Statements are idempotent, so an externally created schema with the
//! same columns is left untouched.

use sqlx::SqlitePool;

/// Create tables and indexes if they don't exist yet
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS inquiries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone1 TEXT NOT NULL,
            phone2 TEXT NOT NULL,
            phone3 TEXT NOT NULL,
            car_name TEXT,
            rent_type TEXT NOT NULL,
            months TEXT NOT NULL,
            business_type TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'contacted', 'completed')),
            memo TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_inquiries_status_created
        ON inquiries (status, created_at DESC)
        "#,
    )
    .execute(pool)
    .await?;

    // Single operator account; password holds an Argon2 PHC string
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admin (
            id INTEGER PRIMARY KEY,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = create_memory_pool().await.unwrap();
        run(&pool).await.unwrap();
        run(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('inquiries', 'admin') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(
            tables.into_iter().map(|t| t.0).collect::<Vec<_>>(),
            vec!["admin".to_string(), "inquiries".to_string()]
        );
    }

    #[tokio::test]
    async fn status_check_constraint() {
        let pool = create_memory_pool().await.unwrap();
        run(&pool).await.unwrap();

        let result = sqlx::query(
            r#"
            INSERT INTO inquiries
                (name, phone1, phone2, phone3, rent_type, months, business_type, status, created_at)
            VALUES ('a', '1', '2', '3', 'rent', '12', 'corp', 'archived', '2024-01-01 00:00:00')
            "#,
        )
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }
}
