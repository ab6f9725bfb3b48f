use crate::auth::auth::AuthUser;
use crate::rules::LeaveError;
use crate::store::locked_periods;
use actix_web::{HttpResponse, Responder, error::ErrorNotFound, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLockedPeriod {
    #[schema(example = "2025-07-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-07-10", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "exam week")]
    pub reason: String,
}

/// Swagger doc for create_locked_period endpoint
#[utoipa::path(
    post,
    path = "/api/locked-periods",
    request_body = CreateLockedPeriod,
    responses(
        (status = 201, description = "Locked period created",
         body = crate::model::locked_period::LockedPeriod),
        (status = 400, description = "Invalid interval or blank reason"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin/HOD only")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Locked periods"
)]
pub async fn create_locked_period(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLockedPeriod>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin_or_hod()?;

    if payload.start_date > payload.end_date {
        return Err(LeaveError::Invalid("startDate cannot be after endDate".to_string()).into());
    }
    if payload.reason.trim().is_empty() {
        return Err(LeaveError::Invalid("reason is required".to_string()).into());
    }

    let period = locked_periods::insert_locked_period(
        pool.get_ref(),
        payload.start_date,
        payload.end_date,
        payload.reason.trim(),
        auth.user_id,
    )
    .await
    .map_err(LeaveError::from)?;

    info!(
        period_id = period.id,
        created_by = auth.user_id,
        "Locked period created"
    );

    Ok(HttpResponse::Created().json(period))
}

/// Swagger doc for list_locked_periods endpoint
#[utoipa::path(
    get,
    path = "/api/locked-periods",
    responses(
        (status = 200, description = "All locked periods, earliest first",
         body = [crate::model::locked_period::LockedPeriod]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Locked periods"
)]
pub async fn list_locked_periods(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let periods = locked_periods::list_locked_periods(pool.get_ref())
        .await
        .map_err(LeaveError::from)?;

    Ok(HttpResponse::Ok().json(periods))
}

/// Swagger doc for delete_locked_period endpoint
#[utoipa::path(
    delete,
    path = "/api/locked-periods/{id}",
    params(
        ("id" = u64, Path, description = "ID of the locked period to remove")
    ),
    responses(
        (status = 204, description = "Locked period removed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin/HOD only"),
        (status = 404, description = "Unknown locked period")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Locked periods"
)]
pub async fn delete_locked_period(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin_or_hod()?;

    let period_id = path.into_inner();

    let removed = locked_periods::delete_locked_period(pool.get_ref(), period_id)
        .await
        .map_err(LeaveError::from)?;

    if removed == 0 {
        return Err(ErrorNotFound("Locked period not found"));
    }

    info!(period_id, removed_by = auth.user_id, "Locked period removed");

    Ok(HttpResponse::NoContent().finish())
}
