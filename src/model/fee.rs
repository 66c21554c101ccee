use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Fee {
    pub id: u64,
    pub name: String,
    pub amount: f64,
    #[schema(value_type = String, format = "date")]
    pub due_date: Option<NaiveDate>,
    pub class_name: Option<String>,
    pub is_recurring: bool,
}
