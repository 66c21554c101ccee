use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Payroll {
    pub id: u64,
    pub employee_id: u64,
    #[schema(example = "2024-03")]
    pub month: String,
    pub status: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub processed_on: Option<NaiveDate>,
}
