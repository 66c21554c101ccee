use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::student::Student;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateStudent {
    pub name: String,
    #[schema(example = "ADM-2024-117")]
    pub admission_no: String,
    pub class_name: String,
    pub section: Option<String>,
    pub guardian_name: Option<String>,
    #[schema(value_type = Object)]
    pub contact_info: Option<serde_json::Value>,
    #[schema(value_type = String, format = "date")]
    pub joined_date: Option<NaiveDate>,
    pub user_id: Option<u64>,
}

#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = CreateStudent,
    responses(
        (status = 201, description = "Student created"),
        (status = 400, description = "Duplicate admission number"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn create_student(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateStudent>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO students
        (name, admission_no, class_name, section, guardian_name, contact_info, joined_date, user_id)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.admission_no)
    .bind(&payload.class_name)
    .bind(&payload.section)
    .bind(&payload.guardian_name)
    .bind(&payload.contact_info)
    .bind(payload.joined_date)
    .bind(payload.user_id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(res) => Ok(HttpResponse::Created().json(json!({
            "id": res.last_insert_id(),
            "message": "Student created successfully"
        }))),
        Err(e) if crate::error::is_duplicate_key(&e) => Err(ApiError::Validation(
            "Admission number already registered".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Student list", body = [Student]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn list_students(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    // Soft-deleted students stay in storage but never in listings.
    let students = sqlx::query_as::<_, Student>(
        r#"
        SELECT id, name, admission_no, class_name, section, guardian_name,
               contact_info, joined_date, user_id
        FROM students
        WHERE is_deleted = 0
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(students))
}
