use crate::{
    auth::{
        jwt::{generate_access_token, generate_refresh_token, verify_token},
        password::{hash_password, verify_password},
    },
    config::Config,
    model::user::User,
    models::{LoginReqDto, RegisterReq, TokenType, UserSql, VerifyOtpReq},
};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, web};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::utils::email_cache;
use crate::utils::email_filter;
use crate::utils::mailer;
// auth end points

fn generate_otp() -> String {
    format!("{:06}", Uuid::new_v4().as_u128() % 1_000_000)
}

/// Inserts a new user into the database and updates the Cuckoo filter
async fn insert_user(
    req: &RegisterReq,
    otp: &str,
    otp_expiry: DateTime<Utc>,
    pool: &MySqlPool,
) -> Result<(), HttpResponse> {
    let hashed = hash_password(&req.password);
    let email = req.email.trim().to_lowercase();

    let result = sqlx::query(
        r#"
        INSERT INTO users
            (name, email, password, role, gender, marital_status,
             subject, dob, joining_date, is_verified, email_otp, otp_expiry)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, FALSE, ?, ?)
        "#,
    )
    .bind(req.name.trim())
    .bind(&email)
    .bind(hashed)
    .bind(req.role.to_string())
    .bind(req.gender.to_string())
    .bind(req.marital_status.to_string())
    .bind(&req.subject)
    .bind(req.dob)
    .bind(req.joining_date)
    .bind(otp)
    .bind(otp_expiry)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            // if insert success, populate filter and cache with the email
            email_filter::insert(&email);
            email_cache::mark_taken(&email).await;
            Ok(())
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code() == Some("23000".into()) {
                    return Err(HttpResponse::Conflict().json(json!({
                        "message": "Email already registered"
                    })));
                }
            }

            error!(error = %e, "Failed to register user");
            Err(HttpResponse::InternalServerError().json(json!({
                "message": "Failed to register user"
            })))
        }
    }
}

/// true  => email AVAILABLE
/// false => email TAKEN
pub async fn is_email_available(email: &str, pool: &MySqlPool) -> bool {
    let email = email.to_lowercase();

    // 1️⃣ Cuckoo filter — fast negative
    if !email_filter::might_exist(&email) {
        return true;
    }

    // 2️⃣ Moka cache — fast positive
    if email_cache::is_taken(&email).await {
        return false;
    }

    // 3️⃣ Database fallback
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = ? LIMIT 1)")
            .bind(&email)
            .fetch_one(pool)
            .await
            .unwrap_or(true); // fail-safe

    !exists
}

/// User registration handler: creates an unverified account and mails a
/// one-time verification code.
pub async fn register(
    req: web::Json<RegisterReq>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    let email = req.email.trim().to_lowercase();

    if req.name.trim().is_empty() || email.is_empty() || req.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Name, email and password must not be empty"
        }));
    }

    if !is_email_available(&email, pool.get_ref()).await {
        return HttpResponse::Conflict().json(json!({
            "message": "Email already registered"
        }));
    }

    let otp = generate_otp();
    let otp_expiry = Utc::now() + Duration::seconds(config.otp_ttl_secs);

    // Safe to insert after DB check
    match insert_user(&req, &otp, otp_expiry, pool.get_ref()).await {
        Ok(_) => {
            // fire-and-forget delivery; registration does not wait on the sink
            actix_web::rt::spawn(async move {
                mailer::send_otp_email(&email, &otp).await;
            });

            HttpResponse::Created().json(json!({
                "message": "Registration successful. OTP sent to email."
            }))
        }
        Err(err_resp) => err_resp,
    }
}

/// Marks the account verified when the submitted OTP matches and has not
/// expired.
pub async fn verify_otp(req: web::Json<VerifyOtpReq>, pool: web::Data<MySqlPool>) -> impl Responder {
    let email = req.email.trim().to_lowercase();

    if email.is_empty() || req.otp.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "Email and OTP required" }));
    }

    let row = match sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password, role, gender, marital_status,
               subject, dob, joining_date, is_verified, email_otp, otp_expiry
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(&email)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(r)) => r,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "message": "User not found" }));
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user for OTP check");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if row.is_verified {
        return HttpResponse::Ok().json(json!({ "message": "Email already verified" }));
    }

    if row.email_otp.as_deref() != Some(req.otp.trim()) {
        return HttpResponse::BadRequest().json(json!({ "message": "Invalid OTP" }));
    }

    if row.otp_expiry.is_none_or(|exp| exp < Utc::now()) {
        return HttpResponse::BadRequest().json(json!({ "message": "OTP expired" }));
    }

    if let Err(e) = sqlx::query(
        "UPDATE users SET is_verified = TRUE, email_otp = NULL, otp_expiry = NULL WHERE id = ?",
    )
    .bind(row.id)
    .execute(pool.get_ref())
    .await
    {
        error!(error = %e, "Failed to mark user verified");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok().json(json!({ "message": "Email verified successfully" }))
}

#[derive(Serialize, Deserialize)]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
}

#[instrument(
    name = "auth_login",
    skip(pool, config, user),
    fields(email = %user.email)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    // 1️⃣ Basic validation
    if user.email.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty email or password");
        return HttpResponse::BadRequest().body("Email or password required");
    }

    debug!("Fetching user from database");

    // 2️⃣ Fetch user
    let db_user = match sqlx::query_as::<_, UserSql>(
        r#"
        SELECT id, email, password, role, gender, marital_status, is_verified
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(user.email.trim().to_lowercase())
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(user)) => {
            debug!(user_id = user.id, "User found");
            user
        }
        Ok(None) => {
            info!("Invalid credentials: user not found");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // 3️⃣ Unverified accounts may not log in
    if !db_user.is_verified {
        info!("Login refused: email not verified");
        return HttpResponse::Forbidden().json(json!({ "message": "Email not verified" }));
    }

    // 4️⃣ Verify password
    debug!("Verifying password");

    if let Err(e) = verify_password(&user.password, &db_user.password) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().body("Invalid credentials");
    }

    debug!("Password verified");

    // 5️⃣ Generate access token
    debug!("Generating access token");

    let access_token = generate_access_token(
        db_user.id,
        db_user.email.clone(),
        db_user.role.clone(),
        db_user.gender.clone(),
        db_user.marital_status.clone(),
        &config.jwt_secret,
        config.access_token_ttl,
    );

    // 6️⃣ Generate refresh token
    debug!("Generating refresh token");

    let (refresh_token, refresh_claims) = generate_refresh_token(
        db_user.id,
        db_user.email.clone(),
        db_user.role.clone(),
        db_user.gender.clone(),
        db_user.marital_status.clone(),
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    // 7️⃣ Store refresh token
    debug!(
        user_id = db_user.id,
        jti = %refresh_claims.jti,
        "Storing refresh token"
    );

    if let Err(e) = sqlx::query(
        r#"
        INSERT INTO refresh_tokens (user_id, jti, expires_at)
        VALUES (?, ?, FROM_UNIXTIME(?))
        "#,
    )
    .bind(db_user.id)
    .bind(&refresh_claims.jti)
    .bind(refresh_claims.exp as i64)
    .execute(pool.get_ref())
    .await
    {
        error!(error = %e, "Failed to store refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    // 8️⃣ Update last_login_at (non-fatal)
    debug!("Updating last_login_at");

    if let Err(e) = sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = ?")
        .bind(db_user.id)
        .execute(pool.get_ref())
        .await
    {
        error!(error = %e, "Failed to update last_login_at");
        // intentionally not failing login
    }

    info!("Login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        refresh_token,
    })
}

#[get("/protected")]
pub async fn protected(req: HttpRequest) -> impl Responder {
    match req.extensions().get::<crate::auth::auth::AuthUser>() {
        Some(user) => HttpResponse::Ok().body(user.email.clone()),
        None => HttpResponse::Unauthorized().body("No user"),
    }
}

#[derive(sqlx::FromRow)]
struct RefreshRow {
    id: u64,
    user_id: u64,
    revoked: bool,
}

pub async fn refresh_token(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::Unauthorized().body("No token"),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::Unauthorized().body("Invalid token"),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::Unauthorized().finish();
    }

    // 🔍 find refresh token in DB
    let record = match sqlx::query_as::<_, RefreshRow>(
        "SELECT id, user_id, revoked FROM refresh_tokens WHERE jti = ?",
    )
    .bind(&claims.jti)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "Database error while fetching refresh token");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let record = match record {
        Some(r) if !r.revoked => r,
        _ => return HttpResponse::Unauthorized().finish(),
    };

    // 🔥 revoke old refresh token
    if let Err(e) = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = ?")
        .bind(record.id)
        .execute(pool.get_ref())
        .await
    {
        error!(error = %e, "Failed to revoke refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    // 🔄 issue new refresh token
    let (new_refresh_token, new_claims) = generate_refresh_token(
        claims.user_id,
        claims.sub.clone(),
        claims.role.clone(),
        claims.gender.clone(),
        claims.marital_status.clone(),
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    if let Err(e) = sqlx::query(
        r#"
        INSERT INTO refresh_tokens (user_id, jti, expires_at)
        VALUES (?, ?, FROM_UNIXTIME(?))
        "#,
    )
    .bind(record.user_id)
    .bind(&new_claims.jti)
    .bind(new_claims.exp as i64)
    .execute(pool.get_ref())
    .await
    {
        error!(error = %e, "Failed to store rotated refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    // 🎫 new access token
    let access_token = generate_access_token(
        claims.user_id,
        claims.sub.clone(),
        claims.role.clone(),
        claims.gender.clone(),
        claims.marital_status.clone(),
        &config.jwt_secret,
        config.access_token_ttl,
    );

    HttpResponse::Ok().json(serde_json::json!({
        "access_token": access_token,
        "refresh_token": new_refresh_token
    }))
}

pub async fn logout(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    // 1️⃣ extract Authorization header
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::NoContent().finish(),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::NoContent().finish(),
    };

    // 2️⃣ verify JWT
    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::NoContent().finish(),
    };

    // 3️⃣ only refresh tokens can logout
    if claims.token_type != TokenType::Refresh {
        return HttpResponse::NoContent().finish();
    }

    // 4️⃣ revoke refresh token (idempotent)
    let _ = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE jti = ?")
        .bind(&claims.jti)
        .execute(pool.get_ref())
        .await;

    // 5️⃣ success (even if token didn't exist)
    HttpResponse::NoContent().finish()
}
