use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::grant::Grant;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateGrant {
    pub source: String,
    pub amount: f64,
    #[schema(value_type = String, format = "date")]
    pub received_on: Option<NaiveDate>,
    pub purpose: Option<String>,
    pub linked_expense_id: Option<u64>,
}

#[utoipa::path(
    post,
    path = "/api/v1/grants",
    request_body = CreateGrant,
    responses(
        (status = 201, description = "Grant recorded"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Grants"
)]
pub async fn create_grant(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateGrant>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO grants (source, amount, received_on, purpose, linked_expense_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.source)
    .bind(payload.amount)
    .bind(payload.received_on)
    .bind(&payload.purpose)
    .bind(payload.linked_expense_id)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_id(),
        "message": "Grant recorded successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/grants",
    responses(
        (status = 200, description = "Grant list", body = [Grant]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Grants"
)]
pub async fn list_grants(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    let rows = sqlx::query_as::<_, Grant>(
        r#"
        SELECT id, source, amount, received_on, purpose, linked_expense_id
        FROM grants
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}
