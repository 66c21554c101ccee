use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

/// Append-only. Rows are written by the audit recorder inside the
/// triggering transaction; no mutation path exists.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct AuditLog {
    pub id: u64,
    pub user_id: u64,
    #[schema(example = "create")]
    pub action: String,
    #[schema(example = "fee_payments")]
    pub table_name: String,
    pub record_id: u64,
    #[schema(value_type = String, format = "date-time")]
    pub timestamp: NaiveDateTime,
    /// JSON snapshot of the change.
    pub details: Option<String>,
}
