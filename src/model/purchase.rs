use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Purchase {
    pub id: u64,
    pub item_name: String,
    pub vendor_name: Option<String>,
    pub amount: f64,
    #[schema(value_type = String, format = "date")]
    pub purchase_date: Option<NaiveDate>,
    pub category: Option<String>,
}
