use crate::error::ApiError;
use crate::model::role::Role;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

/// Authenticated caller identity, resolved against live user rows by the
/// auth middleware and stashed in request extensions.
#[derive(Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // Only populated by the middleware on the protected scope.
        match req.extensions().get::<AuthUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(ApiError::InvalidToken.into())),
        }
    }
}

impl AuthUser {
    /// Fail-closed role check: the caller's role must be in the allow-set.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "role '{}' may not perform this operation",
                self.role.as_str()
            )))
        }
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        self.require_role(&[Role::Admin])
    }

    pub fn require_accountant_or_admin(&self) -> Result<(), ApiError> {
        self.require_role(&[Role::Accountant, Role::Admin])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: 1,
            username: "jdoe".into(),
            email: "jdoe@school.edu".into(),
            role,
        }
    }

    #[test]
    fn payment_roles_are_allowed() {
        assert!(user(Role::Admin).require_accountant_or_admin().is_ok());
        assert!(user(Role::Accountant).require_accountant_or_admin().is_ok());
    }

    #[test]
    fn staff_is_denied_payment_access() {
        let err = user(Role::Staff).require_accountant_or_admin().unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn admin_only_check_denies_accountant() {
        assert!(user(Role::Admin).require_admin().is_ok());
        assert!(user(Role::Accountant).require_admin().is_err());
    }

    #[test]
    fn empty_allow_set_denies_everyone() {
        assert!(user(Role::Admin).require_role(&[]).is_err());
    }
}
