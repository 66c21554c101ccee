use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::fee_payment::FeePayment;
use crate::service::audit;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreatePayment {
    pub student_id: u64,
    pub fee_id: u64,
    pub amount_paid: f64,
    #[schema(value_type = String, format = "date")]
    pub payment_date: NaiveDate,
    #[schema(example = "bank_transfer")]
    pub payment_method: Option<String>,
    pub reference_no: Option<String>,
    #[schema(example = "completed")]
    pub status: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct PaymentQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub student_id: Option<u64>,
    #[param(value_type = Option<String>, format = "date")]
    pub payment_date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct PaymentListResponse {
    pub data: Vec<FeePayment>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Create a fee payment
///
/// Accountant/admin only. The payment row and its audit row are written in
/// one transaction: both commit or neither does.
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    request_body = CreatePayment,
    responses(
        (status = 201, description = "Payment created", body = FeePayment),
        (status = 401),
        (status = 403, description = "Accountant or admin role required")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn create_payment(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreatePayment>,
) -> Result<impl Responder, ApiError> {
    auth.require_accountant_or_admin()?;

    if payload.amount_paid <= 0.0 {
        return Err(ApiError::Validation("amount_paid must be positive".into()));
    }

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO fee_payments
        (student_id, fee_id, amount_paid, payment_date, payment_method, reference_no, status)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.student_id)
    .bind(payload.fee_id)
    .bind(payload.amount_paid)
    .bind(payload.payment_date)
    .bind(&payload.payment_method)
    .bind(&payload.reference_no)
    .bind(&payload.status)
    .execute(&mut *tx)
    .await?;

    let payment_id = result.last_insert_id();

    // An audit failure aborts the payment too; tx drop rolls both back.
    let details = serde_json::to_value(&*payload).map_err(|_| ApiError::Fault)?;
    audit::record(
        &mut tx,
        auth.user_id,
        "create",
        "fee_payments",
        payment_id,
        &details,
    )
    .await?;

    let payment = sqlx::query_as::<_, FeePayment>(
        r#"
        SELECT id, student_id, fee_id, amount_paid, payment_date,
               payment_method, reference_no, status
        FROM fee_payments
        WHERE id = ?
        "#,
    )
    .bind(payment_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(payment_id, actor = auth.user_id, "Payment created");

    Ok(HttpResponse::Created().json(payment))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments",
    params(PaymentQuery),
    responses(
        (status = 200, description = "Paginated payment list", body = PaymentListResponse),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn list_payments(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<PaymentQuery>,
) -> Result<impl Responder, ApiError> {
    let (page, per_page, offset) = super::page_window(query.page, query.per_page);

    let mut conditions = vec!["1 = 1"];
    if query.student_id.is_some() {
        conditions.push("student_id = ?");
    }
    if query.payment_date.is_some() {
        conditions.push("payment_date = ?");
    }
    let where_clause = conditions.join(" AND ");

    let count_sql = format!("SELECT COUNT(*) FROM fee_payments WHERE {where_clause}");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(student_id) = query.student_id {
        count_query = count_query.bind(student_id);
    }
    if let Some(payment_date) = query.payment_date {
        count_query = count_query.bind(payment_date);
    }
    let total = count_query.fetch_one(pool.get_ref()).await?;

    let data_sql = format!(
        "SELECT id, student_id, fee_id, amount_paid, payment_date, \
         payment_method, reference_no, status \
         FROM fee_payments WHERE {where_clause} \
         ORDER BY payment_date DESC, id DESC LIMIT ? OFFSET ?"
    );
    let mut data_query = sqlx::query_as::<_, FeePayment>(&data_sql);
    if let Some(student_id) = query.student_id {
        data_query = data_query.bind(student_id);
    }
    if let Some(payment_date) = query.payment_date {
        data_query = data_query.bind(payment_date);
    }
    let data = data_query
        .bind(per_page as i64)
        .bind(offset as i64)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(PaymentListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::model::role::Role;
    use actix_web::web::{Data, Json};

    async fn seed_actor_student_fee(pool: &MySqlPool) -> (u64, u64, u64) {
        let actor = sqlx::query(
            "INSERT INTO users (username, email, hashed_password, role_id) \
             VALUES ('acct', 'acct@school.edu', 'x', 2)",
        )
        .execute(pool)
        .await
        .unwrap()
        .last_insert_id();
        let student = sqlx::query(
            "INSERT INTO students (name, admission_no, class_name) \
             VALUES ('A Student', 'ADM-0001', 'Grade 8')",
        )
        .execute(pool)
        .await
        .unwrap()
        .last_insert_id();
        let fee = sqlx::query("INSERT INTO fees (name, amount) VALUES ('Tuition', 100)")
            .execute(pool)
            .await
            .unwrap()
            .last_insert_id();
        (actor, student, fee)
    }

    fn accountant(user_id: u64) -> AuthUser {
        AuthUser {
            user_id,
            username: "acct".into(),
            email: "acct@school.edu".into(),
            role: Role::Accountant,
        }
    }

    fn payment(student_id: u64, fee_id: u64) -> CreatePayment {
        CreatePayment {
            student_id,
            fee_id,
            amount_paid: 100.0,
            payment_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            payment_method: Some("cash".into()),
            reference_no: None,
            status: Some("completed".into()),
        }
    }

    async fn row_counts(pool: &MySqlPool) -> (i64, i64) {
        let payments = sqlx::query_scalar("SELECT COUNT(*) FROM fee_payments")
            .fetch_one(pool)
            .await
            .unwrap();
        let audits = sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs")
            .fetch_one(pool)
            .await
            .unwrap();
        (payments, audits)
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn payment_commits_with_its_audit_row(pool: MySqlPool) {
        let (actor, student, fee) = seed_actor_student_fee(&pool).await;

        create_payment(
            accountant(actor),
            Data::new(pool.clone()),
            Json(payment(student, fee)),
        )
        .await
        .unwrap();

        assert_eq!(row_counts(&pool).await, (1, 1));

        let (table_name, record_id): (String, u64) =
            sqlx::query_as("SELECT table_name, record_id FROM audit_logs")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(table_name, "fee_payments");
        assert!(record_id > 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn failed_audit_rolls_back_the_payment(pool: MySqlPool) {
        let (_actor, student, fee) = seed_actor_student_fee(&pool).await;

        // An actor id with no user row makes the audit insert violate its
        // foreign key after the payment insert already succeeded. Neither
        // row may survive.
        let result = create_payment(
            accountant(999_999),
            Data::new(pool.clone()),
            Json(payment(student, fee)),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(row_counts(&pool).await, (0, 0));
    }
}
