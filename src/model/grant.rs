use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Grant {
    pub id: u64,
    pub source: String,
    pub amount: f64,
    #[schema(value_type = String, format = "date")]
    pub received_on: Option<NaiveDate>,
    pub purpose: Option<String>,
    pub linked_expense_id: Option<u64>,
}
