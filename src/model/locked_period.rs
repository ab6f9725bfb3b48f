use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Administrative block on a calendar interval. Leave requests overlapping
/// any locked period (closed intervals) are refused by the rule engine.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LockedPeriod {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "2025-07-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-07-10", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "exam week")]
    pub reason: String,
    pub created_by: Option<u64>,
}
