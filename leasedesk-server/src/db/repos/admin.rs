//! Admin credential repository
//!
//! The table holds a single operator row. Only hashes are ever written.

use sqlx::{FromRow, SqlitePool};

use super::DbError;

/// Row id used when seeding the account
const ADMIN_ID: i64 = 1;

#[derive(Debug, Clone, FromRow)]
pub struct AdminCredentials {
    pub id: i64,
    /// Argon2 PHC string
    pub password: String,
}

pub struct AdminRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AdminRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// The operator account, if one has been seeded.
    pub async fn credentials(&self) -> Result<Option<AdminCredentials>, DbError> {
        let row = sqlx::query_as("SELECT id, password FROM admin ORDER BY id LIMIT 1")
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Replace the stored hash for an existing account.
    pub async fn set_password_hash(&self, id: i64, hash: &str) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE admin SET password = ? WHERE id = ?")
            .bind(hash)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "admin",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Create the operator account, or overwrite its hash if it exists.
    pub async fn seed(&self, hash: &str) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO admin (id, password) VALUES (?, ?)
            ON CONFLICT (id) DO UPDATE SET password = excluded.password
            "#,
        )
        .bind(ADMIN_ID)
        .bind(hash)
        .execute(self.pool)
        .await?;
        Ok(())
    }
}
