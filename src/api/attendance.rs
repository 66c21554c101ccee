use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::attendance::Attendance;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateAttendance {
    pub employee_id: u64,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "present")]
    pub status: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn create_attendance(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateAttendance>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, status)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.date)
    .bind(&payload.status)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_id(),
        "message": "Attendance recorded successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    responses(
        (status = 200, description = "Attendance list", body = [Attendance]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_attendance(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    let rows = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, date, status
        FROM attendance
        ORDER BY date DESC, id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}
