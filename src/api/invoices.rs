use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::invoice::{Invoice, InvoiceStatus};
use crate::model::student::Student;
use crate::service::invoice_number;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use std::str::FromStr;
use tracing::{info, warn};
use utoipa::{IntoParams, ToSchema};

// Bounded retries for the races the FOR UPDATE lock cannot serialize: an
// empty year has no tail row to lock, so concurrent first-of-year creations
// end as a duplicate key or a deadlock victim depending on isolation level.
const CREATE_ATTEMPTS: u32 = 3;

#[derive(Deserialize, ToSchema)]
pub struct CreateInvoice {
    pub student_id: u64,
    pub total_amount: f64,
    #[schema(value_type = String, format = "date")]
    pub issue_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub due_date: Option<NaiveDate>,
    #[schema(example = "issued")]
    pub status: String,
}

/// The invoice number and student reference are immutable after creation.
#[derive(Deserialize, ToSchema)]
pub struct UpdateInvoice {
    pub total_amount: Option<f64>,
    #[schema(value_type = String, format = "date")]
    pub due_date: Option<NaiveDate>,
    #[schema(example = "paid")]
    pub status: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct InvoiceQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub student_id: Option<u64>,
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct InvoiceListResponse {
    pub data: Vec<Invoice>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

#[derive(Serialize, ToSchema)]
pub struct InvoiceLineItem {
    pub description: String,
    pub amount: f64,
}

/// Printable document model consumed by the external PDF renderer.
#[derive(Serialize, ToSchema)]
pub struct InvoiceDocument {
    pub invoice: Invoice,
    pub student: Student,
    pub line_items: Vec<InvoiceLineItem>,
}

fn validate_status(status: &str) -> Result<(), ApiError> {
    InvoiceStatus::from_str(status)
        .map(|_| ())
        .map_err(|_| ApiError::Validation(format!("unknown invoice status '{status}'")))
}

/// Create an invoice
///
/// Allocates the next `INV-{year}-{nnnn}` number atomically with the
/// insert.
#[utoipa::path(
    post,
    path = "/api/v1/invoices",
    request_body = CreateInvoice,
    responses(
        (status = 201, description = "Invoice created", body = Invoice),
        (status = 400, description = "Unknown status value"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Invoices"
)]
pub async fn create_invoice(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateInvoice>,
) -> Result<impl Responder, ApiError> {
    validate_status(&payload.status)?;

    let year = Utc::now().year();

    for attempt in 1..=CREATE_ATTEMPTS {
        let mut tx = pool.begin().await?;

        let number = invoice_number::allocate(&mut tx, year).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO invoices
            (student_id, invoice_number, total_amount, issue_date, due_date, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(payload.student_id)
        .bind(&number)
        .bind(payload.total_amount)
        .bind(payload.issue_date)
        .bind(payload.due_date)
        .bind(&payload.status)
        .execute(&mut *tx)
        .await;

        match result {
            Ok(res) => {
                let invoice_id = res.last_insert_id();
                let invoice = sqlx::query_as::<_, Invoice>(
                    r#"
                    SELECT id, student_id, invoice_number, total_amount,
                           issue_date, due_date, status
                    FROM invoices
                    WHERE id = ?
                    "#,
                )
                .bind(invoice_id)
                .fetch_one(&mut *tx)
                .await?;

                tx.commit().await?;

                info!(invoice_id, number = %number, actor = auth.user_id, "Invoice created");

                return Ok(HttpResponse::Created().json(invoice));
            }
            Err(e) if crate::error::is_retryable_conflict(&e) && attempt < CREATE_ATTEMPTS => {
                warn!(attempt, number = %number, "invoice number conflict, retrying");
                tx.rollback().await?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ApiError::Fault)
}

#[utoipa::path(
    get,
    path = "/api/v1/invoices",
    params(InvoiceQuery),
    responses(
        (status = 200, description = "Paginated invoice list", body = InvoiceListResponse),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Invoices"
)]
pub async fn list_invoices(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<InvoiceQuery>,
) -> Result<impl Responder, ApiError> {
    let (page, per_page, offset) = super::page_window(query.page, query.per_page);

    let mut conditions = vec!["is_deleted = 0"];
    if query.student_id.is_some() {
        conditions.push("student_id = ?");
    }
    if query.status.is_some() {
        conditions.push("status = ?");
    }
    let where_clause = conditions.join(" AND ");

    let count_sql = format!("SELECT COUNT(*) FROM invoices WHERE {where_clause}");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(student_id) = query.student_id {
        count_query = count_query.bind(student_id);
    }
    if let Some(status) = &query.status {
        count_query = count_query.bind(status.clone());
    }
    let total = count_query.fetch_one(pool.get_ref()).await?;

    let data_sql = format!(
        "SELECT id, student_id, invoice_number, total_amount, issue_date, due_date, status \
         FROM invoices WHERE {where_clause} \
         ORDER BY issue_date DESC, id DESC LIMIT ? OFFSET ?"
    );
    let mut data_query = sqlx::query_as::<_, Invoice>(&data_sql);
    if let Some(student_id) = query.student_id {
        data_query = data_query.bind(student_id);
    }
    if let Some(status) = &query.status {
        data_query = data_query.bind(status.clone());
    }
    let data = data_query
        .bind(per_page as i64)
        .bind(offset as i64)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(InvoiceListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

async fn fetch_invoice(pool: &MySqlPool, invoice_id: u64) -> Result<Invoice, ApiError> {
    sqlx::query_as::<_, Invoice>(
        r#"
        SELECT id, student_id, invoice_number, total_amount, issue_date, due_date, status
        FROM invoices
        WHERE id = ? AND is_deleted = 0
        "#,
    )
    .bind(invoice_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ApiError::NotFound("Invoice"))
}

#[utoipa::path(
    get,
    path = "/api/v1/invoices/{invoice_id}",
    params(("invoice_id", description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice found", body = Invoice),
        (status = 404, description = "Invoice not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Invoices"
)]
pub async fn get_invoice(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let invoice = fetch_invoice(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(invoice))
}

#[utoipa::path(
    put,
    path = "/api/v1/invoices/{invoice_id}",
    params(("invoice_id", description = "Invoice ID")),
    request_body = UpdateInvoice,
    responses(
        (status = 200, description = "Invoice updated", body = Invoice),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Invoice not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Invoices"
)]
pub async fn update_invoice(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<UpdateInvoice>,
) -> Result<impl Responder, ApiError> {
    let invoice_id = path.into_inner();

    if let Some(status) = &body.status {
        validate_status(status)?;
    }

    let current = fetch_invoice(pool.get_ref(), invoice_id).await?;

    let total_amount = body.total_amount.unwrap_or(current.total_amount);
    let due_date = body.due_date.or(current.due_date);
    let status = body.status.clone().unwrap_or(current.status);

    sqlx::query(
        r#"
        UPDATE invoices
        SET total_amount = ?, due_date = ?, status = ?
        WHERE id = ?
        "#,
    )
    .bind(total_amount)
    .bind(due_date)
    .bind(&status)
    .bind(invoice_id)
    .execute(pool.get_ref())
    .await?;

    let updated = fetch_invoice(pool.get_ref(), invoice_id).await?;

    Ok(HttpResponse::Ok().json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/invoices/{invoice_id}",
    params(("invoice_id", description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice deleted"),
        (status = 404, description = "Invoice not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Invoices"
)]
pub async fn delete_invoice(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let invoice_id = path.into_inner();

    // Soft delete keeps the number and the row for the audit trail.
    let result = sqlx::query(
        r#"
        UPDATE invoices
        SET is_deleted = 1, deleted_at = NOW()
        WHERE id = ? AND is_deleted = 0
        "#,
    )
    .bind(invoice_id)
    .execute(pool.get_ref())
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Invoice"));
    }

    info!(invoice_id, actor = auth.user_id, "Invoice soft-deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Invoice deleted successfully"
    })))
}

/// Invoice document model
///
/// Assembles invoice, student and fee line items for the external PDF
/// renderer; rasterization happens outside this service.
#[utoipa::path(
    get,
    path = "/api/v1/invoices/{invoice_id}/pdf",
    params(("invoice_id", description = "Invoice ID")),
    responses(
        (status = 200, description = "Printable document model", body = InvoiceDocument),
        (status = 404, description = "Invoice not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Invoices"
)]
pub async fn invoice_document(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let invoice = fetch_invoice(pool.get_ref(), path.into_inner()).await?;

    let student = sqlx::query_as::<_, Student>(
        r#"
        SELECT id, name, admission_no, class_name, section, guardian_name,
               contact_info, joined_date, user_id
        FROM students
        WHERE id = ?
        "#,
    )
    .bind(invoice.student_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::NotFound("Student"))?;

    let line_items = sqlx::query_as::<_, (String, f64)>(
        r#"
        SELECT f.name, p.amount_paid
        FROM fee_payments p
        JOIN fees f ON f.id = p.fee_id
        WHERE p.student_id = ?
        ORDER BY p.payment_date
        "#,
    )
    .bind(invoice.student_id)
    .fetch_all(pool.get_ref())
    .await?
    .into_iter()
    .map(|(description, amount)| InvoiceLineItem {
        description,
        amount,
    })
    .collect();

    Ok(HttpResponse::Ok().json(InvoiceDocument {
        invoice,
        student,
        line_items,
    }))
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::model::role::Role;
    use actix_web::web::{Data, Json};
    use futures::future::join_all;

    async fn seed_student(pool: &MySqlPool) -> u64 {
        sqlx::query(
            "INSERT INTO students (name, admission_no, class_name) \
             VALUES ('A Student', 'ADM-0001', 'Grade 8')",
        )
        .execute(pool)
        .await
        .unwrap()
        .last_insert_id()
    }

    fn staff() -> AuthUser {
        AuthUser {
            user_id: 1,
            username: "clerk".into(),
            email: "clerk@school.edu".into(),
            role: Role::Staff,
        }
    }

    fn invoice(student_id: u64, year: i32) -> CreateInvoice {
        CreateInvoice {
            student_id,
            total_amount: 250.0,
            issue_date: NaiveDate::from_ymd_opt(year, 3, 1).unwrap(),
            due_date: None,
            status: "issued".into(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn concurrent_creations_get_distinct_consecutive_numbers(pool: MySqlPool) {
        let student = seed_student(&pool).await;
        let year = Utc::now().year();

        // Four creations race from an empty year, so every allocation path
        // is exercised: no tail row to lock, then contended tail locks.
        let calls = (0..4).map(|_| {
            create_invoice(
                staff(),
                Data::new(pool.clone()),
                Json(invoice(student, year)),
            )
        });
        for result in join_all(calls).await {
            result.unwrap();
        }

        let numbers: Vec<String> =
            sqlx::query_scalar("SELECT invoice_number FROM invoices ORDER BY invoice_number")
                .fetch_all(&pool)
                .await
                .unwrap();
        let expected: Vec<String> = (1..=4)
            .map(|n| format!("INV-{year}-{n:04}"))
            .collect();
        assert_eq!(numbers, expected);
    }
}
