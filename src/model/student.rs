use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    pub id: u64,
    pub name: String,
    #[schema(example = "ADM-2024-117")]
    pub admission_no: String,
    pub class_name: String,
    pub section: Option<String>,
    pub guardian_name: Option<String>,
    /// Free-form contact details (phone, address, ...).
    #[schema(value_type = Object)]
    pub contact_info: Option<sqlx::types::JsonValue>,
    #[schema(value_type = String, format = "date")]
    pub joined_date: Option<NaiveDate>,
    pub user_id: Option<u64>,
}
