use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct LedgerEntry {
    pub id: u64,
    #[schema(example = "cash")]
    pub debit_account: String,
    #[schema(example = "tuition_income")]
    pub credit_account: String,
    pub amount: f64,
    #[schema(value_type = String, format = "date")]
    pub entry_date: NaiveDate,
    pub description: Option<String>,
}
