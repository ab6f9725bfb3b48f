use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{
    role::Role,
    user::{Gender, MaritalStatus},
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReq {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub subject: Option<String>,
    pub dob: Option<NaiveDate>,
    pub joining_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct LoginReqDto {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct VerifyOtpReq {
    pub email: String,
    pub otp: String,
}

#[derive(sqlx::FromRow)]
pub struct UserSql {
    pub id: u64, // 👈 matches BIGINT UNSIGNED
    pub email: String,
    pub password: String,
    pub role: String,
    pub gender: String,
    pub marital_status: String,
    pub is_verified: bool,
}

/// Attribute claims travel in the token so the rule engine never has to
/// re-read the user row on every application.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub sub: String,
    pub role: String,
    pub gender: String,
    pub marital_status: String,
    pub exp: usize,
    pub jti: String,

    pub token_type: TokenType,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
