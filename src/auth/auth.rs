use std::str::FromStr;

use crate::config::Config;
use crate::model::{
    role::Role,
    user::{Gender, MaritalStatus},
};
use crate::models::{Claims, TokenType};
use crate::rules::leave_policy::Applicant;
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};
use jsonwebtoken::decode;
use jsonwebtoken::{DecodingKey, Validation};

/// Authenticated principal. Role and eligibility attributes are parsed from
/// the token claims into closed enums here; an unrecognized literal never
/// reaches a handler.
pub struct AuthUser {
    pub user_id: u64,
    pub email: String,
    pub role: Role,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        let data = match decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        ) {
            Ok(d) => d,
            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
        };

        if data.claims.token_type != TokenType::Access {
            return ready(Err(ErrorUnauthorized("Invalid token")));
        }

        ready(Self::from_claims(data.claims))
    }
}

impl AuthUser {
    pub fn from_claims(claims: Claims) -> actix_web::Result<Self> {
        let role = match Role::from_str(&claims.role) {
            Ok(r) => r,
            Err(_) => return Err(ErrorUnauthorized("Invalid role")),
        };
        let gender = match Gender::from_str(&claims.gender) {
            Ok(g) => g,
            Err(_) => return Err(ErrorUnauthorized("Invalid gender")),
        };
        let marital_status = match MaritalStatus::from_str(&claims.marital_status) {
            Ok(m) => m,
            Err(_) => return Err(ErrorUnauthorized("Invalid marital status")),
        };

        Ok(AuthUser {
            user_id: claims.user_id,
            email: claims.sub,
            role,
            gender,
            marital_status,
        })
    }

    pub fn require_hod(&self) -> actix_web::Result<()> {
        if self.role == Role::Hod {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Access denied"))
        }
    }

    pub fn require_admin_or_hod(&self) -> actix_web::Result<()> {
        if matches!(self.role, Role::Admin | Role::Hod) {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Admin/HOD only"))
        }
    }

    /// Fact set handed to the rule engine.
    pub fn applicant(&self) -> Applicant {
        Applicant {
            id: self.user_id,
            role: self.role,
            gender: self.gender,
            marital_status: self.marital_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: &str, gender: &str, marital: &str) -> Claims {
        Claims {
            user_id: 42,
            sub: "rahman@univ.edu".to_string(),
            role: role.to_string(),
            gender: gender.to_string(),
            marital_status: marital.to_string(),
            exp: 0,
            jti: "jti".to_string(),
            token_type: TokenType::Access,
        }
    }

    #[test]
    fn valid_claims_parse_into_closed_enums() {
        let user = AuthUser::from_claims(claims("HOD", "Male", "Married")).unwrap();
        assert_eq!(user.role, Role::Hod);
        assert_eq!(user.gender, Gender::Male);
        assert_eq!(user.marital_status, MaritalStatus::Married);
        assert!(user.require_hod().is_ok());
        assert!(user.require_admin_or_hod().is_ok());
    }

    #[test]
    fn unknown_literals_are_refused() {
        assert!(AuthUser::from_claims(claims("Dean", "Male", "Married")).is_err());
        assert!(AuthUser::from_claims(claims("Faculty", "X", "Married")).is_err());
        assert!(AuthUser::from_claims(claims("Faculty", "Male", "Engaged")).is_err());
    }

    #[test]
    fn faculty_is_not_a_reviewer() {
        let user = AuthUser::from_claims(claims("Faculty", "Female", "Single")).unwrap();
        assert!(user.require_hod().is_err());
        assert!(user.require_admin_or_hod().is_err());
    }
}
