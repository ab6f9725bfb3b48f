use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

/// Full user row. `role`, `gender` and `marital_status` are stored as their
/// string literals and parsed back into the closed enums at the auth boundary.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub gender: String,
    pub marital_status: String,
    pub subject: Option<String>,
    pub dob: Option<NaiveDate>,
    pub joining_date: Option<NaiveDate>,
    pub is_verified: bool,
    pub email_otp: Option<String>,
    pub otp_expiry: Option<DateTime<Utc>>,
}
