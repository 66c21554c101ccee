use crate::auth::auth::AuthUser;
use crate::auth::password::hash_password;
use crate::error::ApiError;
use crate::model::role::Role;
use crate::model::user::User;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateUser {
    #[schema(example = "jdoe")]
    pub username: String,
    #[schema(example = "jdoe@school.edu")]
    pub email: String,
    pub password: String,
    #[schema(example = 2)]
    pub role_id: u8,
}

/// Mutable fields only. Username, email and password hash are not
/// updatable through this route.
#[derive(Deserialize, ToSchema)]
pub struct UpdateUser {
    pub role_id: Option<u8>,
    pub is_active: Option<bool>,
}

fn validate_new_user(payload: &CreateUser) -> Result<(), ApiError> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::Validation("username must not be empty".into()));
    }
    let email = payload.email.trim();
    if !email.contains('@') || !email.contains('.') || email.len() < 5 {
        return Err(ApiError::Validation("email is malformed".into()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }
    if Role::from_id(payload.role_id).is_none() {
        return Err(ApiError::Validation("unknown role".into()));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Validation failure or duplicate email"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateUser>,
) -> Result<impl Responder, ApiError> {
    auth.require_admin()?;
    validate_new_user(&payload)?;

    let hashed = hash_password(&payload.password)?;

    let result = sqlx::query(
        r#"
        INSERT INTO users (username, email, hashed_password, role_id)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(payload.username.trim())
    .bind(payload.email.trim())
    .bind(&hashed)
    .bind(payload.role_id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(res) => {
            info!(user_id = res.last_insert_id(), "User created");
            Ok(HttpResponse::Created().json(json!({
                "id": res.last_insert_id(),
                "message": "User created successfully"
            })))
        }
        Err(e) if crate::error::is_duplicate_key(&e) => Err(ApiError::Validation(
            "Email or username already registered".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "User list", body = [User]),
        (status = 401)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<impl Responder, ApiError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, role_id, is_active, created_at
        FROM users
        WHERE is_deleted = 0
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    params(("user_id", description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let user_id = path.into_inner();

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, role_id, is_active, created_at
        FROM users
        WHERE id = ? AND is_deleted = 0
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::NotFound("User"))?;

    Ok(HttpResponse::Ok().json(user))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    params(("user_id", description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<UpdateUser>,
) -> Result<impl Responder, ApiError> {
    auth.require_admin()?;

    let user_id = path.into_inner();

    if let Some(role_id) = body.role_id {
        if Role::from_id(role_id).is_none() {
            return Err(ApiError::Validation("unknown role".into()));
        }
    }

    let current = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, role_id, is_active, created_at
        FROM users
        WHERE id = ? AND is_deleted = 0
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::NotFound("User"))?;

    let role_id = body.role_id.unwrap_or(current.role_id);
    let is_active = body.is_active.unwrap_or(current.is_active);

    sqlx::query(r#"UPDATE users SET role_id = ?, is_active = ? WHERE id = ?"#)
        .bind(role_id)
        .bind(is_active)
        .bind(user_id)
        .execute(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "User updated successfully"
    })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    params(("user_id", description = "User ID")),
    responses(
        (status = 200, description = "User deactivated"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    auth.require_admin()?;

    let user_id = path.into_inner();

    // Users are never hard-deleted.
    let result = sqlx::query(
        r#"
        UPDATE users
        SET is_deleted = 1, deleted_at = NOW(), is_active = 0
        WHERE id = ? AND is_deleted = 0
        "#,
    )
    .bind(user_id)
    .execute(pool.get_ref())
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("User"));
    }

    info!(user_id, actor = auth.user_id, "User soft-deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "User deleted successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CreateUser {
        CreateUser {
            username: "jdoe".into(),
            email: "jdoe@school.edu".into(),
            password: "longenough".into(),
            role_id: 2,
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(validate_new_user(&payload()).is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut p = payload();
        p.password = "short".into();
        assert!(matches!(
            validate_new_user(&p),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut p = payload();
        p.email = "not-an-email".into();
        assert!(validate_new_user(&p).is_err());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut p = payload();
        p.role_id = 99;
        assert!(validate_new_user(&p).is_err());
    }
}
