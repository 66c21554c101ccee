use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub designation: Option<String>,
    pub department: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub join_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub user_id: Option<u64>,
}
