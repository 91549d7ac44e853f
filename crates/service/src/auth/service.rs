use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use models::user::NewUser;
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, AuthUser, LoginInput, RegisterInput, StaffInput};
use super::errors::AuthError;
use super::policy;
use super::repository::AuthRepository;
use crate::validation::{required_text, FieldErrors};

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub password_algorithm: String,
}

impl Default for AuthConfig {
    fn default() -> Self { Self { password_algorithm: "argon2".into() } }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig::default());
    /// let input = RegisterInput {
    ///     username: Some("bob".into()),
    ///     email: Some("b@x.com".into()),
    ///     password: Some("Abcdef12".into()),
    ///     first_name: Some("Bob".into()),
    /// };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "bob");
    /// ```
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        let mut errors = FieldErrors::new();
        let username = policy::check_username(&mut errors, input.username.as_deref());
        let email = policy::check_email(&mut errors, input.email.as_deref());
        let password = policy::check_password(&mut errors, input.password.as_deref());
        let first_name = required_text(&mut errors, "first_name", input.first_name.as_deref(), Some(policy::FIRST_NAME_MAX));

        if let Some(u) = &username {
            if self.repo.find_user_by_username(u).await?.is_some() {
                debug!("username taken");
                errors.add("username", super::errors::conflict_message("username"));
            }
        }
        if let Some(e) = &email {
            if self.repo.find_user_by_email(e).await?.is_some() {
                debug!("email taken");
                errors.add("email", super::errors::conflict_message("email"));
            }
        }

        let (Some(username), Some(email), Some(password), Some(first_name)) = (username, email, password, first_name) else {
            return Err(AuthError::Validation(errors));
        };
        errors.into_result()?;

        let new = NewUser { username, email, first_name, ..Default::default() };
        let user = self.create_account(new, &password).await?;
        info!(user_id = user.id, username = %user.username, "user_registered");
        Ok(user)
    }

    /// Create a staff account; only the password policy and field syntax are enforced.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_staff(&self, input: StaffInput) -> Result<AuthUser, AuthError> {
        let mut errors = FieldErrors::new();
        let username = policy::check_username(&mut errors, Some(&input.username));
        let email = policy::check_email(&mut errors, Some(&input.email));
        let password = policy::check_password(&mut errors, Some(&input.password));
        let first_name = input.first_name.trim();
        let last_name = input.last_name.trim();
        if first_name.chars().count() > policy::NAME_MAX {
            errors.add("first_name", format!("Ensure this field has no more than {} characters.", policy::NAME_MAX));
        }
        if last_name.chars().count() > policy::NAME_MAX {
            errors.add("last_name", format!("Ensure this field has no more than {} characters.", policy::NAME_MAX));
        }
        let (Some(username), Some(email), Some(password)) = (username, email, password) else {
            return Err(AuthError::Validation(errors));
        };
        errors.into_result()?;

        let new = NewUser {
            username,
            email,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            is_staff: true,
            is_superuser: input.superuser,
        };
        let user = self.create_account(new, &password).await?;
        info!(user_id = user.id, username = %user.username, superuser = user.is_superuser, "staff_created");
        Ok(user)
    }

    async fn create_account(&self, new: NewUser, password: &str) -> Result<AuthUser, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();
        self.repo.create_user(new, hash, self.cfg.password_algorithm.clone()).await
    }

    /// Check credentials and issue (or reuse) the user's token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig::default());
    /// let _ = tokio_test::block_on(svc.register(RegisterInput {
    ///     username: Some("u".into()), email: Some("u@e.com".into()),
    ///     password: Some("Passw0rdX".into()), first_name: Some("U".into()),
    /// }));
    /// let session = tokio_test::block_on(svc.login(LoginInput {
    ///     username: Some("u".into()), password: Some("Passw0rdX".into()),
    /// })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert_eq!(session.token.len(), 40);
    /// ```
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let mut errors = FieldErrors::new();
        let username = required_text(&mut errors, "username", input.username.as_deref(), None);
        let password = match input.password.as_deref() {
            None => { errors.add("password", crate::validation::REQUIRED); None }
            Some("") => { errors.add("password", crate::validation::BLANK); None }
            Some(p) => Some(p.to_string()),
        };
        let (Some(username), Some(password)) = (username, password) else {
            return Err(AuthError::Validation(errors));
        };

        let user = self.repo
            .find_user_by_username(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(AuthError::AccountDisabled);
        }

        let (token, created) = self.repo
            .get_or_create_token(user.id, common::crypto::generate_token_key())
            .await?;
        info!(user_id = user.id, created, "token_issued");
        Ok(AuthSession { user, token, created })
    }

    /// Resolve a presented token to an active user.
    pub async fn authenticate(&self, key: &str) -> Result<AuthUser, AuthError> {
        let user = self.repo
            .find_user_by_token(key)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }
        Ok(user)
    }

    /// Invalidate the user's token; returns whether one existed.
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: i32) -> Result<bool, AuthError> {
        let removed = self.repo.delete_token(user_id).await?;
        info!(user_id, removed, "token_revoked");
        Ok(removed)
    }
}
