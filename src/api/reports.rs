use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::report::Report;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateReport {
    pub name: String,
    pub file_path: Option<String>,
    #[schema(example = "income_statement")]
    pub report_type: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/reports",
    request_body = CreateReport,
    responses(
        (status = 201, description = "Report registered"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn create_report(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateReport>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO reports (name, created_by, file_path, report_type)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&payload.name)
    .bind(auth.user_id)
    .bind(&payload.file_path)
    .bind(&payload.report_type)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_id(),
        "message": "Report registered successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports",
    responses(
        (status = 200, description = "Report list", body = [Report]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn list_reports(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    let rows = sqlx::query_as::<_, Report>(
        r#"
        SELECT id, name, created_by, created_on, file_path, report_type
        FROM reports
        ORDER BY created_on DESC, id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}
