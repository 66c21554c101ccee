use crate::{
    auth::{
        jwt::generate_token,
        password::{hash_password, verify_password},
    },
    config::Config,
    error::ApiError,
    models::{LoginReqDto, TokenPairDto, TokenType, UserCredentialSql},
};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use sqlx::MySqlPool;
use tracing::{debug, info, instrument};

async fn fetch_credential_by_email(
    email: &str,
    pool: &MySqlPool,
) -> Result<Option<UserCredentialSql>, ApiError> {
    let user = sqlx::query_as::<_, UserCredentialSql>(
        r#"
        SELECT id, username, email, hashed_password, role_id, is_active, is_deleted
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

fn mint_pair(user: &UserCredentialSql, config: &Config) -> Result<TokenPairDto, ApiError> {
    let access_token = generate_token(
        user.id,
        &user.email,
        TokenType::Access,
        &config.jwt_secret,
        config.access_token_ttl,
    )?;
    let refresh_token = generate_token(
        user.id,
        &user.email,
        TokenType::Refresh,
        &config.jwt_secret,
        config.refresh_token_ttl,
    )?;

    Ok(TokenPairDto {
        access_token,
        refresh_token,
        token_type: "bearer".to_string(),
    })
}

/// Login
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Token pair issued", body = TokenPairDto),
        (status = 400, description = "Empty username or password"),
        (status = 403, description = "Invalid credentials")
    ),
    tag = "Authentication"
)]
#[instrument(
    name = "auth_login",
    skip(pool, config, body),
    fields(username = %body.username)
)]
pub async fn login(
    body: web::Json<LoginReqDto>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> Result<impl Responder, ApiError> {
    info!("Login request received");

    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    debug!("Fetching user from database");

    // Missing account, bad password, and deactivated/deleted account must
    // all fail with the identical response.
    let Some(user) = fetch_credential_by_email(body.username.trim(), pool.get_ref()).await? else {
        // Burn a full hash so an unknown account costs the same wall time
        // as a failed password check.
        let _ = hash_password(&body.password);
        info!("Invalid credentials");
        return Err(ApiError::InvalidCredentials);
    };

    if user.is_deleted || !user.is_active {
        info!("Invalid credentials");
        return Err(ApiError::InvalidCredentials);
    }

    debug!("Verifying password");

    if !verify_password(&body.password, &user.hashed_password) {
        info!("Invalid credentials");
        return Err(ApiError::InvalidCredentials);
    }

    debug!(user_id = user.id, "Password verified, issuing tokens");

    let pair = mint_pair(&user, config.get_ref())?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(pair))
}

/// Exchange a refresh token for a fresh pair
#[utoipa::path(
    post,
    path = "/refresh",
    responses(
        (status = 200, description = "New token pair", body = TokenPairDto),
        (status = 401, description = "Invalid or expired token")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn refresh_token(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> Result<impl Responder, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(ApiError::InvalidToken)?;

    // Issuance is stateless: an access token presented here fails the
    // class check inside verify_token.
    let claims = crate::auth::jwt::verify_token(token, TokenType::Refresh, &config.jwt_secret)?;

    let user = sqlx::query_as::<_, UserCredentialSql>(
        r#"
        SELECT id, username, email, hashed_password, role_id, is_active, is_deleted
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(claims.user_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::InvalidToken)?;

    if user.is_deleted || !user.is_active {
        return Err(ApiError::InvalidToken);
    }

    debug!(user_id = user.id, "Refresh accepted, issuing new pair");

    let pair = mint_pair(&user, config.get_ref())?;

    Ok(HttpResponse::Ok().json(pair))
}
