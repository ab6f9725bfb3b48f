use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
pub enum LeaveType {
    Casual,
    Vacation,
    Medical,
    Maternity,
    Paternity,
    Research,
    Study,
    Special,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Forwarded,
}

/// Persisted leave request. Status and leave type are stored as their wire
/// literals (`PENDING`, `Casual`, ...); typed enums guard every write path.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 42)]
    pub faculty_id: u64,
    pub hod_id: Option<u64>,
    #[schema(example = "Casual", value_type = String)]
    pub leave_type: String,
    #[schema(example = "2025-06-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-06-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "family event")]
    pub reason: String,
    #[schema(example = "Dr. X")]
    pub substitute_faculty: String,
    #[schema(example = "PENDING", value_type = String)]
    pub status: String,
    pub rejection_reason: String,
    pub hod_comment: String,
    pub forwarded_to_admin: bool,
    #[schema(example = "2025-05-20T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_literals_are_screaming() {
        assert_eq!(LeaveStatus::Pending.to_string(), "PENDING");
        assert_eq!(LeaveStatus::Forwarded.to_string(), "FORWARDED");
        assert_eq!(LeaveStatus::from_str("REJECTED").unwrap(), LeaveStatus::Rejected);
        assert!(LeaveStatus::from_str("Pending").is_err());
    }

    #[test]
    fn leave_type_literals_match_wire_form() {
        assert_eq!(LeaveType::Maternity.to_string(), "Maternity");
        assert_eq!(LeaveType::from_str("Casual").unwrap(), LeaveType::Casual);
        assert!(LeaveType::from_str("Sabbatical").is_err());
    }

    #[test]
    fn status_serde_uses_screaming_literals() {
        let json = serde_json::to_string(&LeaveStatus::Approved).unwrap();
        assert_eq!(json, "\"APPROVED\"");
        let back: LeaveStatus = serde_json::from_str("\"FORWARDED\"").unwrap();
        assert_eq!(back, LeaveStatus::Forwarded);
    }
}
