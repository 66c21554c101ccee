use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Report {
    pub id: u64,
    pub name: String,
    pub created_by: Option<u64>,
    #[schema(value_type = String, format = "date-time")]
    pub created_on: NaiveDateTime,
    pub file_path: Option<String>,
    pub report_type: Option<String>,
}
