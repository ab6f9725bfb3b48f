use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::model::{
    leave_request::{LeaveStatus, LeaveType},
    locked_period::LockedPeriod,
    role::Role,
    user::{Gender, MaritalStatus},
};
use crate::rules::LeaveError;

/// Identity facts the eligibility rules need, resolved from the bearer token
/// by the auth layer and passed in explicitly. The engine never reads
/// ambient state.
#[derive(Debug, Clone, Copy)]
pub struct Applicant {
    pub id: u64,
    pub role: Role,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplication {
    #[schema(example = "Casual")]
    pub leave_type: LeaveType,
    #[schema(example = "2025-06-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-06-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "family event")]
    pub reason: String,
    #[schema(example = "Dr. X")]
    pub substitute_faculty: String,
}

/// A vetted application, ready for the store. Always `PENDING`, never carries
/// a reviewer or a rejection reason.
#[derive(Debug, PartialEq)]
pub struct AcceptedLeave {
    pub faculty_id: u64,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub substitute_faculty: String,
    pub status: LeaveStatus,
}

/// Lookup seam for administratively blocked intervals. The MySQL
/// implementation lives in the store; tests inject a fixture.
pub trait LockedPeriodRegistry {
    async fn find_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<LockedPeriod>, sqlx::Error>;
}

/// Decides whether `applicant` may file `application`. Checks run in order
/// and stop at the first failure:
///
/// 1. only Faculty may originate requests
/// 2. required fields present, `start_date <= end_date`
/// 3. Maternity / Paternity attribute rules
/// 4. no overlap with a locked period (closed intervals, boundaries count)
///
/// On success returns the `PENDING` record to persist; persisting it is the
/// caller's job.
pub async fn evaluate_application<R: LockedPeriodRegistry>(
    applicant: &Applicant,
    application: &LeaveApplication,
    registry: &R,
) -> Result<AcceptedLeave, LeaveError> {
    if applicant.role != Role::Faculty {
        return Err(LeaveError::Forbidden("Only Faculty can apply for leave"));
    }

    if application.reason.trim().is_empty() {
        return Err(LeaveError::Invalid("reason is required".to_string()));
    }
    if application.substitute_faculty.trim().is_empty() {
        return Err(LeaveError::Invalid("substituteFaculty is required".to_string()));
    }
    if application.start_date > application.end_date {
        return Err(LeaveError::Invalid("startDate cannot be after endDate".to_string()));
    }

    match application.leave_type {
        LeaveType::Maternity => {
            if applicant.gender != Gender::Female
                || applicant.marital_status != MaritalStatus::Married
            {
                return Err(LeaveError::Ineligible(
                    "Maternity leave is only applicable for married female faculty",
                ));
            }
        }
        LeaveType::Paternity => {
            if applicant.gender != Gender::Male
                || applicant.marital_status != MaritalStatus::Married
            {
                return Err(LeaveError::Ineligible(
                    "Paternity leave is only applicable for married male faculty",
                ));
            }
        }
        _ => {}
    }

    if let Some(clash) = registry
        .find_overlapping(application.start_date, application.end_date)
        .await?
    {
        return Err(LeaveError::PeriodLocked(clash.reason));
    }

    Ok(AcceptedLeave {
        faculty_id: applicant.id,
        leave_type: application.leave_type,
        start_date: application.start_date,
        end_date: application.end_date,
        reason: application.reason.trim().to_string(),
        substitute_faculty: application.substitute_faculty.trim().to_string(),
        status: LeaveStatus::Pending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRegistry(Vec<LockedPeriod>);

    impl LockedPeriodRegistry for FixedRegistry {
        async fn find_overlapping(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Option<LockedPeriod>, sqlx::Error> {
            Ok(self
                .0
                .iter()
                .find(|p| p.start_date <= end && p.end_date >= start)
                .cloned())
        }
    }

    fn empty_registry() -> FixedRegistry {
        FixedRegistry(Vec::new())
    }

    fn exam_week_registry() -> FixedRegistry {
        FixedRegistry(vec![LockedPeriod {
            id: 1,
            start_date: date(2025, 7, 1),
            end_date: date(2025, 7, 10),
            reason: "exam week".to_string(),
            created_by: Some(7),
        }])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn faculty(gender: Gender, marital_status: MaritalStatus) -> Applicant {
        Applicant {
            id: 42,
            role: Role::Faculty,
            gender,
            marital_status,
        }
    }

    fn application(leave_type: LeaveType, start: NaiveDate, end: NaiveDate) -> LeaveApplication {
        LeaveApplication {
            leave_type,
            start_date: start,
            end_date: end,
            reason: "family event".to_string(),
            substitute_faculty: "Dr. X".to_string(),
        }
    }

    #[actix_web::test]
    async fn only_faculty_may_apply() {
        let app = application(LeaveType::Casual, date(2025, 6, 1), date(2025, 6, 2));
        for role in [Role::Hod, Role::Admin] {
            let applicant = Applicant {
                role,
                ..faculty(Gender::Female, MaritalStatus::Married)
            };
            let res = evaluate_application(&applicant, &app, &empty_registry()).await;
            assert!(matches!(res, Err(LeaveError::Forbidden(_))));
        }
    }

    #[actix_web::test]
    async fn accepted_application_is_pending() {
        let applicant = faculty(Gender::Female, MaritalStatus::Married);
        let app = LeaveApplication {
            leave_type: LeaveType::Maternity,
            start_date: date(2025, 6, 1),
            end_date: date(2025, 9, 1),
            reason: "childbirth".to_string(),
            substitute_faculty: "Dr. X".to_string(),
        };

        let accepted = evaluate_application(&applicant, &app, &empty_registry())
            .await
            .unwrap();

        assert_eq!(accepted.status, LeaveStatus::Pending);
        assert_eq!(accepted.faculty_id, 42);
        assert_eq!(accepted.leave_type, LeaveType::Maternity);
        assert_eq!(accepted.reason, "childbirth");
    }

    #[actix_web::test]
    async fn maternity_requires_married_female() {
        let app = application(LeaveType::Maternity, date(2025, 6, 1), date(2025, 9, 1));
        let genders = [Gender::Male, Gender::Female, Gender::Other];
        let statuses = [
            MaritalStatus::Single,
            MaritalStatus::Married,
            MaritalStatus::Divorced,
            MaritalStatus::Widowed,
        ];

        for gender in genders {
            for status in statuses {
                let res =
                    evaluate_application(&faculty(gender, status), &app, &empty_registry()).await;
                if gender == Gender::Female && status == MaritalStatus::Married {
                    assert!(res.is_ok());
                } else {
                    assert!(matches!(res, Err(LeaveError::Ineligible(_))));
                }
            }
        }
    }

    #[actix_web::test]
    async fn paternity_requires_married_male() {
        let app = application(LeaveType::Paternity, date(2025, 6, 1), date(2025, 6, 10));

        let ok = evaluate_application(
            &faculty(Gender::Male, MaritalStatus::Married),
            &app,
            &empty_registry(),
        )
        .await;
        assert!(ok.is_ok());

        for applicant in [
            faculty(Gender::Female, MaritalStatus::Married),
            faculty(Gender::Male, MaritalStatus::Single),
            faculty(Gender::Other, MaritalStatus::Married),
        ] {
            let res = evaluate_application(&applicant, &app, &empty_registry()).await;
            assert!(matches!(res, Err(LeaveError::Ineligible(_))));
        }
    }

    #[actix_web::test]
    async fn blank_fields_and_inverted_dates_are_invalid() {
        let applicant = faculty(Gender::Male, MaritalStatus::Single);

        let mut app = application(LeaveType::Casual, date(2025, 6, 1), date(2025, 6, 2));
        app.reason = "   ".to_string();
        assert!(matches!(
            evaluate_application(&applicant, &app, &empty_registry()).await,
            Err(LeaveError::Invalid(_))
        ));

        let mut app = application(LeaveType::Casual, date(2025, 6, 1), date(2025, 6, 2));
        app.substitute_faculty = String::new();
        assert!(matches!(
            evaluate_application(&applicant, &app, &empty_registry()).await,
            Err(LeaveError::Invalid(_))
        ));

        let app = application(LeaveType::Casual, date(2025, 6, 5), date(2025, 6, 1));
        assert!(matches!(
            evaluate_application(&applicant, &app, &empty_registry()).await,
            Err(LeaveError::Invalid(_))
        ));
    }

    #[actix_web::test]
    async fn locked_period_blocks_overlapping_requests() {
        let applicant = faculty(Gender::Male, MaritalStatus::Single);
        let registry = exam_week_registry();

        // fully inside the lock
        let app = application(LeaveType::Casual, date(2025, 7, 5), date(2025, 7, 6));
        let err = evaluate_application(&applicant, &app, &registry)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("exam week"));

        // touching the lock boundary on either side still counts
        let app = application(LeaveType::Casual, date(2025, 6, 25), date(2025, 7, 1));
        assert!(matches!(
            evaluate_application(&applicant, &app, &registry).await,
            Err(LeaveError::PeriodLocked(_))
        ));
        let app = application(LeaveType::Casual, date(2025, 7, 10), date(2025, 7, 15));
        assert!(matches!(
            evaluate_application(&applicant, &app, &registry).await,
            Err(LeaveError::PeriodLocked(_))
        ));

        // straddling the whole lock
        let app = application(LeaveType::Casual, date(2025, 6, 20), date(2025, 7, 20));
        assert!(matches!(
            evaluate_application(&applicant, &app, &registry).await,
            Err(LeaveError::PeriodLocked(_))
        ));
    }

    #[actix_web::test]
    async fn disjoint_intervals_pass_the_lock_check() {
        let applicant = faculty(Gender::Male, MaritalStatus::Single);
        let registry = exam_week_registry();

        let app = application(LeaveType::Casual, date(2025, 6, 1), date(2025, 6, 30));
        assert!(evaluate_application(&applicant, &app, &registry).await.is_ok());

        let app = application(LeaveType::Casual, date(2025, 7, 11), date(2025, 7, 12));
        assert!(evaluate_application(&applicant, &app, &registry).await.is_ok());
    }

    #[actix_web::test]
    async fn role_gate_runs_before_everything_else() {
        // even a payload that would fail validation reports the role first
        let hod = Applicant {
            role: Role::Hod,
            ..faculty(Gender::Female, MaritalStatus::Married)
        };
        let mut app = application(LeaveType::Maternity, date(2025, 7, 5), date(2025, 7, 1));
        app.reason = String::new();
        let res = evaluate_application(&hod, &app, &exam_week_registry()).await;
        assert!(matches!(res, Err(LeaveError::Forbidden(_))));
    }
}
