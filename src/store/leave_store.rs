use serde::Serialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::model::leave_request::LeaveRequest;
use crate::rules::leave_policy::AcceptedLeave;

const LEAVE_COLUMNS: &str = "id, faculty_id, hod_id, leave_type, start_date, end_date, reason, \
     substitute_faculty, status, rejection_reason, hod_comment, forwarded_to_admin, created_at";

/// Pending request joined with the owner's display attributes for the HOD
/// review screen.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingLeave {
    pub id: u64,
    pub faculty_id: u64,
    #[schema(example = "Dr. A. Rahman")]
    pub faculty_name: String,
    #[schema(example = "rahman@univ.edu", format = "email")]
    pub faculty_email: String,
    #[schema(example = "Physics")]
    pub faculty_subject: Option<String>,
    #[schema(example = "Casual", value_type = String)]
    pub leave_type: String,
    #[schema(example = "2025-06-01", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2025-06-05", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    pub reason: String,
    pub substitute_faculty: String,
    #[schema(example = "PENDING", value_type = String)]
    pub status: String,
    #[schema(example = "2025-05-20T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub async fn create_leave(
    pool: &MySqlPool,
    accepted: &AcceptedLeave,
) -> Result<LeaveRequest, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO leave_requests
            (faculty_id, leave_type, start_date, end_date, reason, substitute_faculty, status)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(accepted.faculty_id)
    .bind(accepted.leave_type.to_string())
    .bind(accepted.start_date)
    .bind(accepted.end_date)
    .bind(&accepted.reason)
    .bind(&accepted.substitute_faculty)
    .bind(accepted.status.to_string())
    .execute(pool)
    .await?;

    let id = result.last_insert_id();

    // re-fetch so the caller gets DB-assigned id, defaults and created_at
    find_leave(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

pub async fn find_leave(pool: &MySqlPool, id: u64) -> Result<Option<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn pending_with_faculty(pool: &MySqlPool) -> Result<Vec<PendingLeave>, sqlx::Error> {
    sqlx::query_as::<_, PendingLeave>(
        r#"
        SELECT
            l.id,
            l.faculty_id,
            u.name AS faculty_name,
            u.email AS faculty_email,
            u.subject AS faculty_subject,
            l.leave_type,
            l.start_date,
            l.end_date,
            l.reason,
            l.substitute_faculty,
            l.status,
            l.created_at
        FROM leave_requests l
        JOIN users u ON u.id = l.faculty_id
        WHERE l.status = 'PENDING'
        ORDER BY l.created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Most recent first.
pub async fn leaves_by_faculty(
    pool: &MySqlPool,
    faculty_id: u64,
) -> Result<Vec<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE faculty_id = ? ORDER BY created_at DESC"
    ))
    .bind(faculty_id)
    .fetch_all(pool)
    .await
}

pub async fn save_review(pool: &MySqlPool, leave: &LeaveRequest) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = ?,
            rejection_reason = ?,
            hod_comment = ?,
            forwarded_to_admin = ?,
            hod_id = ?
        WHERE id = ?
        "#,
    )
    .bind(&leave.status)
    .bind(&leave.rejection_reason)
    .bind(&leave.hod_comment)
    .bind(leave.forwarded_to_admin)
    .bind(leave.hod_id)
    .bind(leave.id)
    .execute(pool)
    .await?;

    Ok(())
}
