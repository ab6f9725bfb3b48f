use crate::api::locked_period::CreateLockedPeriod;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};
use crate::model::locked_period::LockedPeriod;
use crate::rules::leave_policy::LeaveApplication;
use crate::rules::review::ReviewDecision;
use crate::store::leave_store::PendingLeave;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LeaveMS API",
        version = "1.0.0",
        description = r#"
## Leave Management System (LeaveMS)

This API powers a **leave-request management system** for an academic department.

### 🔹 Key Features
- **Leave Requests**
  - Faculty apply for leave; view their own request history
- **Review Workflow**
  - HOD approves, rejects or forwards pending requests to Admin
- **Locked Periods**
  - Admin/HOD block calendar intervals (exams, accreditation visits) during
    which no leave may be taken

### 🔐 Security
Most endpoints are protected using **JWT Bearer authentication**.
Applying for leave is restricted to **Faculty**; review actions to the **HOD**;
locked-period management to **Admin/HOD**.

### 📦 Response Format
- JSON-based RESTful responses

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::apply_leave,
        crate::api::leave_request::my_leaves,
        crate::api::leave_request::hod_pending_leaves,
        crate::api::leave_request::review_leave,

        crate::api::locked_period::create_locked_period,
        crate::api::locked_period::list_locked_periods,
        crate::api::locked_period::delete_locked_period
    ),
    components(
        schemas(
            LeaveApplication,
            LeaveRequest,
            LeaveType,
            LeaveStatus,
            ReviewDecision,
            PendingLeave,
            LockedPeriod,
            CreateLockedPeriod
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Leave", description = "Leave application and review APIs"),
        (name = "Locked periods", description = "Administrative calendar block APIs"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
