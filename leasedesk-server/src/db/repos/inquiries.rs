//! Inquiry repository
//!
//! One statement per operation:
//! - list: optional status filter, newest first
//! - create: INSERT with status fixed to pending
//! - update: status-only, memo-only or one combined UPDATE
//! - delete: idempotent DELETE

use leasedesk_core::{Inquiry, InquiryChange, InquiryStatus, NewInquiry, StatusFilter};
use sqlx::{FromRow, SqlitePool};

use super::DbError;

/// Inquiry record as stored; `status` is validated on the way out
#[derive(Debug, Clone, FromRow)]
struct InquiryRow {
    id: i64,
    name: String,
    phone1: String,
    phone2: String,
    phone3: String,
    car_name: Option<String>,
    rent_type: String,
    months: String,
    business_type: String,
    status: String,
    memo: Option<String>,
    created_at: String,
}

impl TryFrom<InquiryRow> for Inquiry {
    type Error = DbError;

    fn try_from(row: InquiryRow) -> Result<Self, Self::Error> {
        let status: InquiryStatus = row.status.parse().map_err(|_| DbError::InvalidRow {
            id: row.id,
            column: "status",
            value: row.status.clone(),
        })?;

        Ok(Inquiry {
            id: row.id,
            name: row.name,
            phone1: row.phone1,
            phone2: row.phone2,
            phone3: row.phone3,
            car_name: row.car_name,
            rent_type: row.rent_type,
            months: row.months,
            business_type: row.business_type,
            status,
            memo: row.memo,
            created_at: row.created_at,
        })
    }
}

const LIST_ALL: &str = r#"
    SELECT id, name, phone1, phone2, phone3, car_name, rent_type, months,
           business_type, status, memo, created_at
    FROM inquiries
    ORDER BY created_at DESC, id DESC
"#;

const LIST_BY_STATUS: &str = r#"
    SELECT id, name, phone1, phone2, phone3, car_name, rent_type, months,
           business_type, status, memo, created_at
    FROM inquiries
    WHERE status = ?
    ORDER BY created_at DESC, id DESC
"#;

const GET_ONE: &str = r#"
    SELECT id, name, phone1, phone2, phone3, car_name, rent_type, months,
           business_type, status, memo, created_at
    FROM inquiries
    WHERE id = ?
"#;

/// Inquiry repository
pub struct InquiryRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> InquiryRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List inquiries newest first, optionally restricted to one status.
    ///
    /// Ties on `created_at` fall back to `id` so the order is stable.
    pub async fn list(&self, filter: StatusFilter) -> Result<Vec<Inquiry>, DbError> {
        let rows: Vec<InquiryRow> = match filter.status() {
            None => sqlx::query_as(LIST_ALL).fetch_all(self.pool).await?,
            Some(status) => {
                sqlx::query_as(LIST_BY_STATUS)
                    .bind(status.as_str())
                    .fetch_all(self.pool)
                    .await?
            }
        };

        rows.into_iter().map(Inquiry::try_from).collect()
    }

    /// Fetch a single inquiry.
    pub async fn get(&self, id: i64) -> Result<Inquiry, DbError> {
        let row: InquiryRow = sqlx::query_as(GET_ONE)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "inquiry",
                id: id.to_string(),
            })?;

        Inquiry::try_from(row)
    }

    /// Insert a new inquiry as pending, returning its id.
    pub async fn create(&self, inquiry: &NewInquiry, created_at: &str) -> Result<i64, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO inquiries
                (name, phone1, phone2, phone3, car_name, rent_type, months,
                 business_type, created_at, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&inquiry.name)
        .bind(&inquiry.phone1)
        .bind(&inquiry.phone2)
        .bind(&inquiry.phone3)
        .bind(inquiry.car_name.as_deref())
        .bind(&inquiry.rent_type)
        .bind(&inquiry.months)
        .bind(&inquiry.business_type)
        .bind(created_at)
        .bind(InquiryStatus::Pending.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Apply a status and/or memo change.
    ///
    /// Both fields are written by a single statement when both are given.
    /// Returns `NotFound` when no row has this id.
    pub async fn update(&self, id: i64, change: &InquiryChange) -> Result<(), DbError> {
        let query = match change {
            InquiryChange::Status(status) => {
                sqlx::query("UPDATE inquiries SET status = ? WHERE id = ?")
                    .bind(status.as_str())
                    .bind(id)
            }
            InquiryChange::Memo(memo) => sqlx::query("UPDATE inquiries SET memo = ? WHERE id = ?")
                .bind(memo.as_deref())
                .bind(id),
            InquiryChange::StatusAndMemo { status, memo } => {
                sqlx::query("UPDATE inquiries SET status = ?, memo = ? WHERE id = ?")
                    .bind(status.as_str())
                    .bind(memo.as_deref())
                    .bind(id)
            }
        };

        let result = query.execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "inquiry",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Delete an inquiry (idempotent). Returns the number of rows removed.
    pub async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
