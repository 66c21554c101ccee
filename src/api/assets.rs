use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::asset::Asset;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateAsset {
    pub name: String,
    pub category: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub purchase_date: Option<NaiveDate>,
    pub value: f64,
    pub depreciation: Option<f64>,
    pub current_value: Option<f64>,
}

#[utoipa::path(
    post,
    path = "/api/v1/assets",
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset recorded"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Assets"
)]
pub async fn create_asset(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateAsset>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO assets (name, category, purchase_date, value, depreciation, current_value)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.category)
    .bind(payload.purchase_date)
    .bind(payload.value)
    .bind(payload.depreciation)
    .bind(payload.current_value)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_id(),
        "message": "Asset recorded successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/assets",
    responses(
        (status = 200, description = "Asset list", body = [Asset]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Assets"
)]
pub async fn list_assets(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    let rows = sqlx::query_as::<_, Asset>(
        r#"
        SELECT id, name, category, purchase_date, value, depreciation, current_value
        FROM assets
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}
