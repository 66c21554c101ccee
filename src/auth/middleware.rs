use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::role::Role;
use crate::models::{TokenType, UserCredentialSql};
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use actix_web::ResponseError;
use sqlx::MySqlPool;

/// Bearer-token admission for the protected scope. Verifies the access
/// token, then resolves the subject to a live user row (must exist, be
/// active, and not soft-deleted) so revoked accounts lose access within
/// one request. Every failure yields the same opaque 401.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?
        .clone();
    let pool = req
        .app_data::<Data<MySqlPool>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("DB pool missing"))?
        .clone();

    let auth_user = match admit(&req, &config, &pool).await {
        Ok(user) => user,
        Err(e) => {
            let resp = e.error_response().map_into_boxed_body();
            return Ok(req.into_response(resp));
        }
    };

    req.extensions_mut().insert(auth_user);

    next.call(req).await
}

async fn admit(
    req: &ServiceRequest,
    config: &Config,
    pool: &MySqlPool,
) -> Result<AuthUser, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(ApiError::InvalidToken)?;

    let claims = verify_token(token, TokenType::Access, &config.jwt_secret)?;

    let user = sqlx::query_as::<_, UserCredentialSql>(
        r#"
        SELECT id, username, email, hashed_password, role_id, is_active, is_deleted
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(claims.user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ApiError::InvalidToken)?;

    if !user.is_active || user.is_deleted {
        return Err(ApiError::InvalidToken);
    }

    let role = Role::from_id(user.role_id).ok_or(ApiError::InvalidToken)?;

    Ok(AuthUser {
        user_id: user.id,
        username: user.username,
        email: user.email,
        role,
    })
}
