use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::transaction::Transaction;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateTransaction {
    #[schema(example = "expense")]
    pub kind: String,
    pub amount: f64,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub category: Option<String>,
    pub reference_id: Option<u64>,
    pub description: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = CreateTransaction,
    responses(
        (status = 201, description = "Transaction recorded"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn create_transaction(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateTransaction>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO transactions (kind, amount, date, category, reference_id, description)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.kind)
    .bind(payload.amount)
    .bind(payload.date)
    .bind(&payload.category)
    .bind(payload.reference_id)
    .bind(&payload.description)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_id(),
        "message": "Transaction recorded successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    responses(
        (status = 200, description = "Transaction list", body = [Transaction]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn list_transactions(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    let rows = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT id, kind, amount, date, category, reference_id, description
        FROM transactions
        ORDER BY date DESC, id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}
