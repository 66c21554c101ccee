use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

/// API-facing user record. The password hash never leaves the auth layer.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "jdoe")]
    pub username: String,
    #[schema(example = "jdoe@school.edu")]
    pub email: String,
    #[schema(example = 2)]
    pub role_id: u8,
    pub is_active: bool,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,
}
