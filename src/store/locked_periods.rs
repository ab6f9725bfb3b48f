use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::model::locked_period::LockedPeriod;
use crate::rules::leave_policy::LockedPeriodRegistry;

/// MySQL-backed registry handed to the rule engine.
pub struct MySqlLockedPeriods<'a>(pub &'a MySqlPool);

impl LockedPeriodRegistry for MySqlLockedPeriods<'_> {
    async fn find_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<LockedPeriod>, sqlx::Error> {
        // closed-interval overlap: period.start <= end AND period.end >= start
        sqlx::query_as::<_, LockedPeriod>(
            r#"
            SELECT id, start_date, end_date, reason, created_by
            FROM locked_periods
            WHERE start_date <= ? AND end_date >= ?
            LIMIT 1
            "#,
        )
        .bind(end)
        .bind(start)
        .fetch_optional(self.0)
        .await
    }
}

pub async fn insert_locked_period(
    pool: &MySqlPool,
    start: NaiveDate,
    end: NaiveDate,
    reason: &str,
    created_by: u64,
) -> Result<LockedPeriod, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO locked_periods (start_date, end_date, reason, created_by)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(start)
    .bind(end)
    .bind(reason)
    .bind(created_by)
    .execute(pool)
    .await?;

    let id = result.last_insert_id();

    sqlx::query_as::<_, LockedPeriod>(
        "SELECT id, start_date, end_date, reason, created_by FROM locked_periods WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn list_locked_periods(pool: &MySqlPool) -> Result<Vec<LockedPeriod>, sqlx::Error> {
    sqlx::query_as::<_, LockedPeriod>(
        "SELECT id, start_date, end_date, reason, created_by FROM locked_periods ORDER BY start_date ASC",
    )
    .fetch_all(pool)
    .await
}

/// Returns the number of rows removed (0 when the id is unknown).
pub async fn delete_locked_period(pool: &MySqlPool, id: u64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM locked_periods WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
