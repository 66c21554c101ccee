use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::fee::Fee;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateFee {
    #[schema(example = "Tuition Q1")]
    pub name: String,
    pub amount: f64,
    #[schema(value_type = String, format = "date")]
    pub due_date: Option<NaiveDate>,
    #[schema(example = "Grade 8")]
    pub class_name: Option<String>,
    pub is_recurring: bool,
}

/// Explicit mutable-field set; unknown fields cannot reach the update.
#[derive(Deserialize, ToSchema)]
pub struct UpdateFee {
    pub name: Option<String>,
    pub amount: Option<f64>,
    #[schema(value_type = String, format = "date")]
    pub due_date: Option<NaiveDate>,
    pub class_name: Option<String>,
    pub is_recurring: Option<bool>,
}

#[derive(Deserialize, IntoParams)]
pub struct FeeQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct FeeListResponse {
    pub data: Vec<Fee>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

#[utoipa::path(
    post,
    path = "/api/v1/fees",
    request_body = CreateFee,
    responses(
        (status = 201, description = "Fee created"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
pub async fn create_fee(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateFee>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO fees (name, amount, due_date, class_name, is_recurring)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.name)
    .bind(payload.amount)
    .bind(payload.due_date)
    .bind(&payload.class_name)
    .bind(payload.is_recurring)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_id(),
        "message": "Fee created successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/fees",
    params(FeeQuery),
    responses(
        (status = 200, description = "Paginated fee list", body = FeeListResponse),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
pub async fn list_fees(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<FeeQuery>,
) -> Result<impl Responder, ApiError> {
    let (page, per_page, offset) = super::page_window(query.page, query.per_page);

    let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM fees"#)
        .fetch_one(pool.get_ref())
        .await?;

    let data = sqlx::query_as::<_, Fee>(
        r#"
        SELECT id, name, amount, due_date, class_name, is_recurring
        FROM fees
        ORDER BY id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(per_page as i64)
    .bind(offset as i64)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(FeeListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/fees/{fee_id}",
    params(("fee_id", description = "Fee ID")),
    responses(
        (status = 200, description = "Fee found", body = Fee),
        (status = 404, description = "Fee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
pub async fn get_fee(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let fee_id = path.into_inner();

    let fee = sqlx::query_as::<_, Fee>(
        r#"
        SELECT id, name, amount, due_date, class_name, is_recurring
        FROM fees
        WHERE id = ?
        "#,
    )
    .bind(fee_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::NotFound("Fee"))?;

    Ok(HttpResponse::Ok().json(fee))
}

#[utoipa::path(
    put,
    path = "/api/v1/fees/{fee_id}",
    params(("fee_id", description = "Fee ID")),
    request_body = UpdateFee,
    responses(
        (status = 200, description = "Fee updated"),
        (status = 404, description = "Fee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
pub async fn update_fee(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<UpdateFee>,
) -> Result<impl Responder, ApiError> {
    let fee_id = path.into_inner();

    let current = sqlx::query_as::<_, Fee>(
        r#"
        SELECT id, name, amount, due_date, class_name, is_recurring
        FROM fees
        WHERE id = ?
        "#,
    )
    .bind(fee_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::NotFound("Fee"))?;

    let name = body.name.clone().unwrap_or(current.name);
    let amount = body.amount.unwrap_or(current.amount);
    let due_date = body.due_date.or(current.due_date);
    let class_name = body.class_name.clone().or(current.class_name);
    let is_recurring = body.is_recurring.unwrap_or(current.is_recurring);

    sqlx::query(
        r#"
        UPDATE fees
        SET name = ?, amount = ?, due_date = ?, class_name = ?, is_recurring = ?
        WHERE id = ?
        "#,
    )
    .bind(&name)
    .bind(amount)
    .bind(due_date)
    .bind(&class_name)
    .bind(is_recurring)
    .bind(fee_id)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Fee updated successfully"
    })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/fees/{fee_id}",
    params(("fee_id", description = "Fee ID")),
    responses(
        (status = 200, description = "Fee deleted"),
        (status = 404, description = "Fee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
pub async fn delete_fee(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let fee_id = path.into_inner();

    let result = sqlx::query(r#"DELETE FROM fees WHERE id = ?"#)
        .bind(fee_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Fee"));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Fee deleted successfully"
    })))
}
