use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::audit_log::AuditLog;
use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;

/// List audit log entries
///
/// Read-only surface. Entries are appended by the audit recorder inside
/// audited transactions; no create/update/delete route exists.
#[utoipa::path(
    get,
    path = "/api/v1/audit",
    responses(
        (status = 200, description = "Audit trail, newest first", body = [AuditLog]),
        (status = 401),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    auth.require_admin()?;

    let logs = sqlx::query_as::<_, AuditLog>(
        r#"
        SELECT id, user_id, action, table_name, record_id, timestamp, details
        FROM audit_logs
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(logs))
}
