use crate::{
    api::{leave_request, locked_period},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/verify-otp")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::verify_otp)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            // authentication
            .wrap(protected_limiter) // rate limiting
            .service(handlers::protected)
            .service(
                web::scope("/leave")
                    // /leave/apply — Faculty files a request
                    .service(
                        web::resource("/apply")
                            .route(web::post().to(leave_request::apply_leave)),
                    )
                    // /leave/my — caller's own history
                    .service(web::resource("/my").route(web::get().to(leave_request::my_leaves)))
                    // /leave/hod — pending queue for review
                    .service(
                        web::resource("/hod")
                            .route(web::get().to(leave_request::hod_pending_leaves)),
                    )
                    // /leave/{id}/action — approve / reject / forward
                    .service(
                        web::resource("/{id}/action")
                            .route(web::put().to(leave_request::review_leave)),
                    ),
            )
            .service(
                web::scope("/locked-periods")
                    // /locked-periods
                    .service(
                        web::resource("")
                            .route(web::post().to(locked_period::create_locked_period))
                            .route(web::get().to(locked_period::list_locked_periods)),
                    )
                    // /locked-periods/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::delete().to(locked_period::delete_locked_period)),
                    ),
            ),
    );
}

// LOGIN
//  ├─ access_token (15 min)
//  └─ refresh_token (7 days)
//
// API REQUEST
//  └─ Authorization: Bearer access_token
//
// ACCESS EXPIRED
//  └─ POST /refresh with refresh_token
//       └─ returns new access_token
