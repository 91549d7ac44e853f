use async_trait::async_trait;
use models::user::NewUser;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    /// Create the user row and its credentials as one unit.
    async fn create_user(&self, new: NewUser, password_hash: String, password_algorithm: String) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError>;

    /// Existing token for the user, or `fresh_key` stored as a new one. `true` when created.
    async fn get_or_create_token(&self, user_id: i32, fresh_key: String) -> Result<(String, bool), AuthError>;
    async fn find_user_by_token(&self, key: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn delete_token(&self, user_id: i32) -> Result<bool, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<i32, AuthUser>>,     // key: user id
        creds: Mutex<HashMap<i32, Credentials>>,  // key: user id
        tokens: Mutex<HashMap<String, i32>>,      // key: token key
    }

    fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, AuthError> {
        m.lock().map_err(|_| AuthError::Repository("mock lock poisoned".into()))
    }

    impl MockAuthRepository {
        /// Flip `is_active` on a stored user.
        pub fn set_active(&self, user_id: i32, active: bool) -> Result<(), AuthError> {
            let mut users = lock(&self.users)?;
            let user = users.get_mut(&user_id).ok_or_else(|| AuthError::Repository("user not found".into()))?;
            user.is_active = active;
            Ok(())
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = lock(&self.users)?;
            Ok(users.values().find(|u| u.username == username).cloned())
        }

        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = lock(&self.users)?;
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn create_user(&self, new: NewUser, password_hash: String, password_algorithm: String) -> Result<AuthUser, AuthError> {
            let mut users = lock(&self.users)?;
            if users.values().any(|u| u.username == new.username) {
                return Err(AuthError::Conflict("username"));
            }
            if users.values().any(|u| u.email == new.email) {
                return Err(AuthError::Conflict("email"));
            }
            let id = users.keys().max().copied().unwrap_or(0) + 1;
            let user = AuthUser {
                id,
                username: new.username,
                email: new.email,
                first_name: new.first_name,
                last_name: new.last_name,
                is_staff: new.is_staff,
                is_superuser: new.is_superuser,
                is_active: true,
            };
            users.insert(id, user.clone());
            lock(&self.creds)?.insert(id, Credentials { user_id: id, password_hash, password_algorithm });
            Ok(user)
        }

        async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
            let creds = lock(&self.creds)?;
            Ok(creds.get(&user_id).cloned())
        }

        async fn get_or_create_token(&self, user_id: i32, fresh_key: String) -> Result<(String, bool), AuthError> {
            let mut tokens = lock(&self.tokens)?;
            if let Some((key, _)) = tokens.iter().find(|(_, uid)| **uid == user_id) {
                return Ok((key.clone(), false));
            }
            tokens.insert(fresh_key.clone(), user_id);
            Ok((fresh_key, true))
        }

        async fn find_user_by_token(&self, key: &str) -> Result<Option<AuthUser>, AuthError> {
            let Some(user_id) = lock(&self.tokens)?.get(key).copied() else { return Ok(None) };
            Ok(lock(&self.users)?.get(&user_id).cloned())
        }

        async fn delete_token(&self, user_id: i32) -> Result<bool, AuthError> {
            let mut tokens = lock(&self.tokens)?;
            let before = tokens.len();
            tokens.retain(|_, uid| *uid != user_id);
            Ok(tokens.len() != before)
        }
    }
}
