use crate::auth::auth::AuthUser;
use crate::rules::{
    LeaveError,
    leave_policy::{LeaveApplication, evaluate_application},
    review::{ReviewDecision, apply_decision},
};
use crate::store::{leave_store, locked_periods::MySqlLockedPeriods};
use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;
use tracing::info;

/* =========================
Apply for leave (Faculty)
========================= */
/// Swagger doc for apply_leave endpoint
#[utoipa::path(
    post,
    path = "/api/leave/apply",
    request_body(
        content = LeaveApplication,
        description = "Leave application payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave applied successfully",
         body = Object,
         example = json!({
            "message": "Leave applied successfully",
            "leave": {
                "id": 1,
                "facultyId": 42,
                "leaveType": "Casual",
                "startDate": "2025-06-01",
                "endDate": "2025-06-05",
                "status": "PENDING"
            }
         })
        ),
        (status = 400, description = "Validation, eligibility or locked-period failure"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not Faculty")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn apply_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<LeaveApplication>,
) -> actix_web::Result<impl Responder> {
    let registry = MySqlLockedPeriods(pool.get_ref());

    let accepted = evaluate_application(&auth.applicant(), &payload, &registry).await?;

    let leave = leave_store::create_leave(pool.get_ref(), &accepted)
        .await
        .map_err(LeaveError::from)?;

    info!(
        leave_id = leave.id,
        faculty_id = leave.faculty_id,
        leave_type = %leave.leave_type,
        "Leave request created"
    );

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Leave applied successfully",
        "leave": leave
    })))
}

/* =========================
Pending queue (HOD)
========================= */
/// Swagger doc for hod_pending_leaves endpoint
#[utoipa::path(
    get,
    path = "/api/leave/hod",
    responses(
        (status = 200, description = "Pending leave requests with applicant details",
         body = [crate::store::leave_store::PendingLeave]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the HOD")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn hod_pending_leaves(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_hod()?;

    let leaves = leave_store::pending_with_faculty(pool.get_ref())
        .await
        .map_err(LeaveError::from)?;

    Ok(HttpResponse::Ok().json(leaves))
}

/* =========================
Approve / Reject / Forward (HOD)
========================= */
/// Swagger doc for review_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{id}/action",
    params(
        ("id" = u64, Path, description = "ID of the leave request to act on")
    ),
    request_body(
        content = ReviewDecision,
        description = "Decision payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Decision applied", body = Object, example = json!({
            "message": "Leave approved successfully"
        })),
        (status = 400, description = "PENDING is not a decision"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the HOD"),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn review_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<ReviewDecision>,
) -> actix_web::Result<impl Responder> {
    auth.require_hod()?;

    let leave_id = path.into_inner();

    let mut leave = leave_store::find_leave(pool.get_ref(), leave_id)
        .await
        .map_err(LeaveError::from)?
        .ok_or(LeaveError::NotFound)?;

    apply_decision(&mut leave, auth.user_id, &payload)?;

    leave_store::save_review(pool.get_ref(), &leave)
        .await
        .map_err(LeaveError::from)?;

    info!(
        leave_id,
        reviewer_id = auth.user_id,
        status = %leave.status,
        "Leave request reviewed"
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Leave {} successfully", leave.status.to_lowercase()),
        "leave": leave
    })))
}

/* =========================
Own history (any principal)
========================= */
/// Swagger doc for my_leaves endpoint
#[utoipa::path(
    get,
    path = "/api/leave/my",
    responses(
        (status = 200, description = "Caller's leave requests, newest first",
         body = [crate::model::leave_request::LeaveRequest]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn my_leaves(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let leaves = leave_store::leaves_by_faculty(pool.get_ref(), auth.user_id)
        .await
        .map_err(LeaveError::from)?;

    Ok(HttpResponse::Ok().json(leaves))
}
