use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::purchase::Purchase;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreatePurchase {
    pub item_name: String,
    pub vendor_name: Option<String>,
    pub amount: f64,
    #[schema(value_type = String, format = "date")]
    pub purchase_date: Option<NaiveDate>,
    pub category: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/purchases",
    request_body = CreatePurchase,
    responses(
        (status = 201, description = "Purchase recorded"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Purchases"
)]
pub async fn create_purchase(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreatePurchase>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO purchases (item_name, vendor_name, amount, purchase_date, category)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.item_name)
    .bind(&payload.vendor_name)
    .bind(payload.amount)
    .bind(payload.purchase_date)
    .bind(&payload.category)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_id(),
        "message": "Purchase recorded successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/purchases",
    responses(
        (status = 200, description = "Purchase list", body = [Purchase]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Purchases"
)]
pub async fn list_purchases(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    let rows = sqlx::query_as::<_, Purchase>(
        r#"
        SELECT id, item_name, vendor_name, amount, purchase_date, category
        FROM purchases
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}
