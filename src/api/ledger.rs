use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::ledger_entry::LedgerEntry;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateLedgerEntry {
    #[schema(example = "cash")]
    pub debit_account: String,
    #[schema(example = "tuition_income")]
    pub credit_account: String,
    pub amount: f64,
    #[schema(value_type = String, format = "date")]
    pub entry_date: NaiveDate,
    pub description: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/ledger",
    request_body = CreateLedgerEntry,
    responses(
        (status = 201, description = "Ledger entry recorded"),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Ledger"
)]
pub async fn create_ledger_entry(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLedgerEntry>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO ledger_entries (debit_account, credit_account, amount, entry_date, description)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.debit_account)
    .bind(&payload.credit_account)
    .bind(payload.amount)
    .bind(payload.entry_date)
    .bind(&payload.description)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_id(),
        "message": "Ledger entry recorded successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/ledger",
    responses(
        (status = 200, description = "Ledger entries", body = [LedgerEntry]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Ledger"
)]
pub async fn list_ledger_entries(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    let rows = sqlx::query_as::<_, LedgerEntry>(
        r#"
        SELECT id, debit_account, credit_account, amount, entry_date, description
        FROM ledger_entries
        ORDER BY entry_date DESC, id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}
