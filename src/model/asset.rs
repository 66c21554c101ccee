use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    pub category: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub purchase_date: Option<NaiveDate>,
    pub value: f64,
    pub depreciation: Option<f64>,
    pub current_value: Option<f64>,
}
