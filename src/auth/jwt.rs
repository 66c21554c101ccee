use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ApiError;
use crate::models::{Claims, TokenType};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or(0)
}

pub fn generate_token(
    user_id: u64,
    email: &str,
    token_type: TokenType,
    secret: &str,
    ttl: usize,
) -> Result<String, ApiError> {
    let claims = Claims {
        user_id,
        sub: email.to_string(),
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!(error = %e, "failed to sign token");
        ApiError::Fault
    })
}

/// Validates signature, expiry and class tag. Every failure mode collapses
/// into the same `InvalidToken` so callers cannot probe which check failed.
pub fn verify_token(token: &str, expected: TokenType, secret: &str) -> Result<Claims, ApiError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::InvalidToken)?;

    if data.claims.token_type != expected {
        return Err(ApiError::InvalidToken);
    }

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn access_token_round_trips() {
        let token = generate_token(7, "a@x.com", TokenType::Access, SECRET, 900).unwrap();
        let claims = verify_token(&token, TokenType::Access, SECRET).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn class_mismatch_is_rejected_both_ways() {
        let access = generate_token(1, "a@x.com", TokenType::Access, SECRET, 900).unwrap();
        let refresh = generate_token(1, "a@x.com", TokenType::Refresh, SECRET, 900).unwrap();

        assert!(matches!(
            verify_token(&access, TokenType::Refresh, SECRET),
            Err(ApiError::InvalidToken)
        ));
        assert!(matches!(
            verify_token(&refresh, TokenType::Access, SECRET),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        // exp well past the default validation leeway
        let claims = Claims {
            user_id: 1,
            sub: "a@x.com".into(),
            exp: now().saturating_sub(3600),
            jti: Uuid::new_v4().to_string(),
            token_type: TokenType::Access,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&token, TokenType::Access, SECRET),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_token(1, "a@x.com", TokenType::Access, SECRET, 900).unwrap();
        assert!(matches!(
            verify_token(&token, TokenType::Access, "other-secret"),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            verify_token("not-a-jwt", TokenType::Access, SECRET),
            Err(ApiError::InvalidToken)
        ));
    }
}
