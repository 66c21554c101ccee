use crate::error::ApiError;
use sqlx::{MySql, Transaction};

/// Appends one audit row inside the caller's transaction. Audited writes
/// commit with their audit entry or not at all: a failure here propagates
/// and the dropped transaction rolls back the business write too.
pub async fn record(
    tx: &mut Transaction<'_, MySql>,
    actor_id: u64,
    action: &str,
    table_name: &str,
    record_id: u64,
    details: &serde_json::Value,
) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        INSERT INTO audit_logs (user_id, action, table_name, record_id, details)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(actor_id)
    .bind(action)
    .bind(table_name)
    .bind(record_id)
    .bind(details.to_string())
    .execute(&mut **tx)
    .await?;

    Ok(())
}
