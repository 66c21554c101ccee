use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::employee::Employee;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    pub name: String,
    #[schema(example = "Accountant")]
    pub designation: Option<String>,
    #[schema(example = "Finance")]
    pub department: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub join_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub user_id: Option<u64>,
}

#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn create_employee(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateEmployee>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO employees (name, designation, department, join_date, salary, user_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.designation)
    .bind(&payload.department)
    .bind(payload.join_date)
    .bind(payload.salary)
    .bind(payload.user_id)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_id(),
        "message": "Employee created successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses(
        (status = 200, description = "Employee list", body = [Employee]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn list_employees(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, name, designation, department, join_date, salary, user_id
        FROM employees
        WHERE is_deleted = 0
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(employees))
}
