use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::payroll::Payroll;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreatePayroll {
    pub employee_id: u64,
    #[schema(example = "2024-03")]
    pub month: String,
    #[schema(example = "processed")]
    pub status: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub processed_on: Option<NaiveDate>,
}

#[utoipa::path(
    post,
    path = "/api/v1/payroll",
    request_body = CreatePayroll,
    responses(
        (status = 201, description = "Payroll run recorded"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn create_payroll(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreatePayroll>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO payroll (employee_id, month, status, processed_on)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(payload.employee_id)
    .bind(&payload.month)
    .bind(&payload.status)
    .bind(payload.processed_on)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_id(),
        "message": "Payroll run recorded successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    responses(
        (status = 200, description = "Payroll list", body = [Payroll]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn list_payrolls(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    let rows = sqlx::query_as::<_, Payroll>(
        r#"
        SELECT id, employee_id, month, status, processed_on
        FROM payroll
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}
