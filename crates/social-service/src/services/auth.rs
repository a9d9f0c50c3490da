//! Authentication service
//!
//! Handles signup and login. Both hand back a signed access token.

use social_common::auth::{hash_password, validate_password_strength, verify_password};
use social_common::AppError;
use social_core::entities::{User, UserRole};
use social_core::error::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, SignupRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// The first account ever created becomes an administrator.
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let role = if self.ctx.user_repo().count().await? == 0 {
            UserRole::Admin
        } else {
            UserRole::Normal
        };

        let password_hash = hash_password(&request.password)?;

        let user = User::new(request.username, request.email, role);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, role = role.as_str(), "User registered successfully");

        self.issue(&user)
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.issue(&user)
    }

    fn issue(&self, user: &User) -> ServiceResult<AuthResponse> {
        let token = self.ctx.jwt_service().issue(user)?;
        Ok(AuthResponse::new(
            token.access_token,
            token.expires_in,
            UserResponse::from(user),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::Fixture;

    fn signup_request(username: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_user_is_admin() {
        let fx = Fixture::new();
        let auth = AuthService::new(&fx.ctx);

        let first = auth.signup(signup_request("first", "Password1")).await.unwrap();
        let second = auth.signup(signup_request("second", "Password1")).await.unwrap();

        assert_eq!(first.user.role, UserRole::Admin);
        assert_eq!(second.user.role, UserRole::Normal);

        let claims = fx.ctx.jwt_service().decode_token(&second.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), second.user.id);
        assert_eq!(claims.name, "second");
        assert!(!claims.is_admin());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let fx = Fixture::new();
        let auth = AuthService::new(&fx.ctx);

        auth.signup(signup_request("ana", "Password1")).await.unwrap();
        let err = auth.signup(signup_request("ana", "Password1")).await.unwrap_err();

        assert!(matches!(err, ServiceError::Domain(DomainError::EmailAlreadyExists)));
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_weak_password() {
        let fx = Fixture::new();
        let err = AuthService::new(&fx.ctx)
            .signup(signup_request("ana", "alllowercase1"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_login() {
        let fx = Fixture::new();
        let auth = AuthService::new(&fx.ctx);
        auth.signup(signup_request("ana", "Password1")).await.unwrap();

        let ok = auth
            .login(LoginRequest {
                email: "ana@example.com".to_string(),
                password: "Password1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(ok.token_type, "Bearer");

        let err = auth
            .login(LoginRequest {
                email: "ana@example.com".to_string(),
                password: "Password2".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");

        let err = auth
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "Password1".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
