use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Transaction {
    pub id: u64,
    #[schema(example = "expense")]
    pub kind: String,
    pub amount: f64,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub category: Option<String>,
    pub reference_id: Option<u64>,
    pub description: Option<String>,
}
