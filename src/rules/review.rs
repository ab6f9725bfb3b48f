use serde::Deserialize;
use utoipa::ToSchema;

use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::rules::LeaveError;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDecision {
    #[schema(example = "APPROVED")]
    pub status: LeaveStatus,
    #[schema(example = "substitute unavailable")]
    pub rejection_reason: Option<String>,
    #[schema(example = "needs admin sign-off")]
    pub hod_comment: Option<String>,
}

/// Applies a reviewer decision to a loaded record. The prior status is not
/// consulted: re-issuing a decision overwrites it (last-write-wins, matching
/// the persistence model). `PENDING` is a starting state, not a decision.
pub fn apply_decision(
    leave: &mut LeaveRequest,
    reviewer_id: u64,
    decision: &ReviewDecision,
) -> Result<(), LeaveError> {
    match decision.status {
        LeaveStatus::Pending => {
            return Err(LeaveError::Invalid(
                "status must be APPROVED, REJECTED or FORWARDED".to_string(),
            ));
        }
        LeaveStatus::Approved => {
            leave.status = LeaveStatus::Approved.to_string();
        }
        LeaveStatus::Rejected => {
            leave.status = LeaveStatus::Rejected.to_string();
            leave.rejection_reason = decision
                .rejection_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or("Not specified")
                .to_string();
        }
        LeaveStatus::Forwarded => {
            leave.status = LeaveStatus::Forwarded.to_string();
            leave.forwarded_to_admin = true;
            leave.hod_comment = decision.hod_comment.clone().unwrap_or_default();
        }
    }

    leave.hod_id = Some(reviewer_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn pending_leave() -> LeaveRequest {
        LeaveRequest {
            id: 1,
            faculty_id: 42,
            hod_id: None,
            leave_type: "Casual".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            reason: "family event".to_string(),
            substitute_faculty: "Dr. X".to_string(),
            status: "PENDING".to_string(),
            rejection_reason: String::new(),
            hod_comment: String::new(),
            forwarded_to_admin: false,
            created_at: None,
        }
    }

    fn decision(status: LeaveStatus) -> ReviewDecision {
        ReviewDecision {
            status,
            rejection_reason: None,
            hod_comment: None,
        }
    }

    #[test]
    fn approve_sets_status_and_reviewer() {
        let mut leave = pending_leave();
        apply_decision(&mut leave, 7, &decision(LeaveStatus::Approved)).unwrap();
        assert_eq!(leave.status, "APPROVED");
        assert_eq!(leave.hod_id, Some(7));
        assert!(leave.rejection_reason.is_empty());
        assert!(!leave.forwarded_to_admin);
    }

    #[test]
    fn approving_twice_is_idempotent() {
        let mut leave = pending_leave();
        apply_decision(&mut leave, 7, &decision(LeaveStatus::Approved)).unwrap();
        apply_decision(&mut leave, 7, &decision(LeaveStatus::Approved)).unwrap();
        assert_eq!(leave.status, "APPROVED");
    }

    #[test]
    fn blank_rejection_reason_becomes_not_specified() {
        let mut leave = pending_leave();
        let d = ReviewDecision {
            status: LeaveStatus::Rejected,
            rejection_reason: Some("   ".to_string()),
            hod_comment: None,
        };
        apply_decision(&mut leave, 7, &d).unwrap();
        assert_eq!(leave.status, "REJECTED");
        assert_eq!(leave.rejection_reason, "Not specified");
    }

    #[test]
    fn rejection_reason_is_kept_when_given() {
        let mut leave = pending_leave();
        let d = ReviewDecision {
            status: LeaveStatus::Rejected,
            rejection_reason: Some("substitute unavailable".to_string()),
            hod_comment: None,
        };
        apply_decision(&mut leave, 7, &d).unwrap();
        assert_eq!(leave.rejection_reason, "substitute unavailable");
    }

    #[test]
    fn forward_sets_flag_and_comment() {
        let mut leave = pending_leave();
        let d = ReviewDecision {
            status: LeaveStatus::Forwarded,
            rejection_reason: None,
            hod_comment: Some("needs admin sign-off".to_string()),
        };
        apply_decision(&mut leave, 7, &d).unwrap();
        assert_eq!(leave.status, "FORWARDED");
        assert!(leave.forwarded_to_admin);
        assert_eq!(leave.hod_comment, "needs admin sign-off");
    }

    #[test]
    fn pending_is_not_a_decision() {
        let mut leave = pending_leave();
        let res = apply_decision(&mut leave, 7, &decision(LeaveStatus::Pending));
        assert!(matches!(res, Err(LeaveError::Invalid(_))));
        assert_eq!(leave.status, "PENDING");
        assert_eq!(leave.hod_id, None);
    }
}
