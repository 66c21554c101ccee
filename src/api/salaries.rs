use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::salary::Salary;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateSalary {
    pub employee_id: u64,
    pub base_salary: f64,
    pub bonus: f64,
    pub deductions: f64,
    #[schema(value_type = String, format = "date")]
    pub pay_date: Option<NaiveDate>,
}

#[utoipa::path(
    post,
    path = "/api/v1/salaries",
    request_body = CreateSalary,
    responses(
        (status = 201, description = "Salary recorded"),
        (status = 401),
        (status = 500)
    ),
    security(("bearer_auth" = [])),
    tag = "Salaries"
)]
pub async fn create_salary(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateSalary>,
) -> Result<impl Responder, ApiError> {
    let net_salary = payload.base_salary + payload.bonus - payload.deductions;

    let result = sqlx::query(
        r#"
        INSERT INTO salaries (employee_id, base_salary, bonus, deductions, net_salary, pay_date)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.base_salary)
    .bind(payload.bonus)
    .bind(payload.deductions)
    .bind(net_salary)
    .bind(payload.pay_date)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_id(),
        "message": "Salary recorded successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/salaries",
    responses(
        (status = 200, description = "Salary list", body = [Salary]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Salaries"
)]
pub async fn list_salaries(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    let salaries = sqlx::query_as::<_, Salary>(
        r#"
        SELECT id, employee_id, base_salary, bonus, deductions, net_salary, pay_date
        FROM salaries
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(salaries))
}
