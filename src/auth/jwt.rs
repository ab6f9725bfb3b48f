use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{Claims, TokenType};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

pub fn generate_access_token(
    user_id: u64,
    email: String,
    role: String,
    gender: String,
    marital_status: String,
    secret: &str,
    ttl: usize,
) -> String {
    let claims = Claims {
        user_id,
        sub: email,
        role,
        gender,
        marital_status,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type: TokenType::Access,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn generate_refresh_token(
    user_id: u64,
    email: String,
    role: String,
    gender: String,
    marital_status: String,
    secret: &str,
    ttl: usize,
) -> (String, Claims) {
    let claims = Claims {
        user_id,
        sub: email,
        role,
        gender,
        marital_status,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type: TokenType::Refresh,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    (token, claims)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access(secret: &str) -> String {
        generate_access_token(
            42,
            "rahman@univ.edu".to_string(),
            "Faculty".to_string(),
            "Female".to_string(),
            "Married".to_string(),
            secret,
            600,
        )
    }

    #[test]
    fn claims_survive_the_round_trip() {
        let token = access("s3cret");
        let claims = verify_token(&token, "s3cret").unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.sub, "rahman@univ.edu");
        assert_eq!(claims.role, "Faculty");
        assert_eq!(claims.gender, "Female");
        assert_eq!(claims.marital_status, "Married");
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn wrong_secret_is_refused() {
        let token = access("s3cret");
        assert!(verify_token(&token, "other").is_err());
    }

    #[test]
    fn refresh_token_carries_its_type() {
        let (token, issued) = generate_refresh_token(
            7,
            "hod@univ.edu".to_string(),
            "HOD".to_string(),
            "Male".to_string(),
            "Married".to_string(),
            "s3cret",
            3600,
        );
        let claims = verify_token(&token, "s3cret").unwrap();
        assert_eq!(claims.token_type, TokenType::Refresh);
        assert_eq!(claims.jti, issued.jti);
    }
}
