use crate::{
    api::{
        assets, attendance, audit, employees, fees, grants, invoices, ledger, payments, payroll,
        purchases, reports, salaries, students, transactions, users,
    },
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let burst = requests_per_min.max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(60_000 / burst as u64)
            .burst_size(burst)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = build_limiter(config.rate_login_per_min);
    let refresh_limiter = build_limiter(config.rate_refresh_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Public routes
    cfg.service(
        web::resource("/login")
            .wrap(login_limiter)
            .route(web::post().to(handlers::login)),
    );
    cfg.service(
        web::resource("/refresh")
            .wrap(refresh_limiter)
            .route(web::post().to(handlers::refresh_token)),
    );

    // Protected routes: token verification + live-user resolution first,
    // role checks inside the handlers that need them.
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::scope("/users")
                    .service(
                        web::resource("")
                            .route(web::post().to(users::create_user))
                            .route(web::get().to(users::list_users)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(users::get_user))
                            .route(web::put().to(users::update_user))
                            .route(web::delete().to(users::delete_user)),
                    ),
            )
            .service(
                web::scope("/students").service(
                    web::resource("")
                        .route(web::post().to(students::create_student))
                        .route(web::get().to(students::list_students)),
                ),
            )
            .service(
                web::scope("/employees").service(
                    web::resource("")
                        .route(web::post().to(employees::create_employee))
                        .route(web::get().to(employees::list_employees)),
                ),
            )
            .service(
                web::scope("/fees")
                    .service(
                        web::resource("")
                            .route(web::post().to(fees::create_fee))
                            .route(web::get().to(fees::list_fees)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(fees::get_fee))
                            .route(web::put().to(fees::update_fee))
                            .route(web::delete().to(fees::delete_fee)),
                    ),
            )
            .service(
                web::scope("/payments").service(
                    web::resource("")
                        .route(web::post().to(payments::create_payment))
                        .route(web::get().to(payments::list_payments)),
                ),
            )
            .service(
                web::scope("/invoices")
                    .service(
                        web::resource("")
                            .route(web::post().to(invoices::create_invoice))
                            .route(web::get().to(invoices::list_invoices)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(invoices::get_invoice))
                            .route(web::put().to(invoices::update_invoice))
                            .route(web::delete().to(invoices::delete_invoice)),
                    )
                    .service(
                        web::resource("/{id}/pdf").route(web::get().to(invoices::invoice_document)),
                    ),
            )
            .service(
                web::scope("/salaries").service(
                    web::resource("")
                        .route(web::post().to(salaries::create_salary))
                        .route(web::get().to(salaries::list_salaries)),
                ),
            )
            .service(
                web::scope("/attendance").service(
                    web::resource("")
                        .route(web::post().to(attendance::create_attendance))
                        .route(web::get().to(attendance::list_attendance)),
                ),
            )
            .service(
                web::scope("/payroll").service(
                    web::resource("")
                        .route(web::post().to(payroll::create_payroll))
                        .route(web::get().to(payroll::list_payrolls)),
                ),
            )
            .service(
                web::scope("/transactions").service(
                    web::resource("")
                        .route(web::post().to(transactions::create_transaction))
                        .route(web::get().to(transactions::list_transactions)),
                ),
            )
            .service(
                web::scope("/ledger").service(
                    web::resource("")
                        .route(web::post().to(ledger::create_ledger_entry))
                        .route(web::get().to(ledger::list_ledger_entries)),
                ),
            )
            .service(
                web::scope("/assets").service(
                    web::resource("")
                        .route(web::post().to(assets::create_asset))
                        .route(web::get().to(assets::list_assets)),
                ),
            )
            .service(
                web::scope("/purchases").service(
                    web::resource("")
                        .route(web::post().to(purchases::create_purchase))
                        .route(web::get().to(purchases::list_purchases)),
                ),
            )
            .service(
                web::scope("/grants").service(
                    web::resource("")
                        .route(web::post().to(grants::create_grant))
                        .route(web::get().to(grants::list_grants)),
                ),
            )
            .service(
                web::scope("/reports").service(
                    web::resource("")
                        .route(web::post().to(reports::create_report))
                        .route(web::get().to(reports::list_reports)),
                ),
            )
            .service(
                web::scope("/audit")
                    .service(web::resource("").route(web::get().to(audit::list_audit_logs))),
            ),
    );
}

// LOGIN
//  ├─ access_token (30 min)
//  └─ refresh_token (7 days)
//
// API REQUEST
//  └─ Authorization: Bearer access_token
//
// ACCESS EXPIRED
//  └─ POST /refresh with refresh_token
//       └─ returns new access_token + refresh_token
